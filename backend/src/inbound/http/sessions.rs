//! Session HTTP handlers, membership endpoints included.
//!
//! ```text
//! GET    /api/session
//! POST   /api/session {"name":"Yoga","date":"2026-03-01T09:00:00Z","teacher_id":1,"description":"..."}
//! GET    /api/session/{id}
//! PUT    /api/session/{id}
//! DELETE /api/session/{id}
//! POST   /api/session/{id}/participate/{userId}
//! DELETE /api/session/{id}/participate/{userId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Session, SessionDescription, SessionDraft, SessionId, SessionName,
    SessionValidationError, TeacherId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, missing_field_error, parse_id, parse_rfc3339_timestamp,
};

/// Session representation returned to clients.
///
/// `users` lists participant ids in the order they joined.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SessionDto {
    pub id: i64,
    pub name: String,
    #[schema(format = "date-time")]
    pub date: String,
    pub teacher_id: i64,
    pub description: String,
    pub users: Vec<i64>,
    #[serde(rename = "createdAt")]
    #[schema(format = "date-time")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().get(),
            name: session.name().as_ref().to_owned(),
            date: session.date().to_rfc3339(),
            teacher_id: session.teacher_id().get(),
            description: session.description().as_ref().to_owned(),
            users: session.participants().iter().map(|id| id.get()).collect(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Create/update payload. Participants are never read from it; membership
/// only changes through the participate endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SessionRequest {
    #[schema(example = "Morning flow")]
    pub name: Option<String>,
    #[schema(format = "date-time")]
    pub date: Option<String>,
    pub teacher_id: Option<i64>,
    pub description: Option<String>,
}

fn map_session_validation_error(err: SessionValidationError) -> Error {
    let field = match err {
        SessionValidationError::EmptyName | SessionValidationError::NameTooLong { .. } => "name",
        SessionValidationError::DescriptionTooLong { .. } => "description",
    };
    invalid_field_error(field, err.to_string())
}

fn parse_session_request(payload: SessionRequest) -> Result<SessionDraft, Error> {
    let name = payload
        .name
        .ok_or_else(|| missing_field_error(FieldName::new("name")))?;
    let date = payload
        .date
        .ok_or_else(|| missing_field_error(FieldName::new("date")))?;
    let teacher_id = payload
        .teacher_id
        .ok_or_else(|| missing_field_error(FieldName::new("teacher_id")))?;
    Ok(SessionDraft {
        name: SessionName::new(name).map_err(map_session_validation_error)?,
        description: SessionDescription::new(payload.description.unwrap_or_default())
            .map_err(map_session_validation_error)?,
        date: parse_rfc3339_timestamp(&date, FieldName::new("date"))?,
        teacher_id: TeacherId::new(teacher_id),
    })
}

fn session_id(raw: &str) -> Result<SessionId, Error> {
    parse_id(raw, FieldName::new("id")).map(SessionId::new)
}

fn membership_ids(path: &(String, String)) -> Result<(SessionId, UserId), Error> {
    let (session, user) = path;
    Ok((
        session_id(session)?,
        parse_id(user, FieldName::new("userId")).map(UserId::new)?,
    ))
}

/// List every session.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Sessions", body = [SessionDto]),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "listSessions",
    security(("bearer" = []))
)]
#[get("")]
pub async fn list_sessions(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<SessionDto>>> {
    let sessions = state.sessions_query.list().await?;
    Ok(web::Json(sessions.iter().map(SessionDto::from).collect()))
}

/// Fetch one session.
#[utoipa::path(
    get,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    responses(
        (status = 200, description = "Session", body = SessionDto),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "getSession",
    security(("bearer" = []))
)]
#[get("/{id}")]
pub async fn get_session(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SessionDto>> {
    let id = session_id(&path)?;
    let session = state.sessions_query.get(id).await?;
    Ok(web::Json(SessionDto::from(&session)))
}

/// Create a session with an empty participant set.
#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session created", body = SessionDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Teacher not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "createSession",
    security(("bearer" = []))
)]
#[post("")]
pub async fn create_session(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    payload: web::Json<SessionRequest>,
) -> ApiResult<web::Json<SessionDto>> {
    let draft = parse_session_request(payload.into_inner())?;
    let session = state.sessions.create(draft).await?;
    Ok(web::Json(SessionDto::from(&session)))
}

/// Replace a session's descriptive fields; participants are kept.
#[utoipa::path(
    put,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Session or teacher not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "updateSession",
    security(("bearer" = []))
)]
#[put("/{id}")]
pub async fn update_session(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<SessionRequest>,
) -> ApiResult<web::Json<SessionDto>> {
    let id = session_id(&path)?;
    let draft = parse_session_request(payload.into_inner())?;
    let session = state.sessions.update(id, draft).await?;
    Ok(web::Json(SessionDto::from(&session)))
}

/// Delete a session.
#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    params(("id" = String, Path, description = "Numeric session id")),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "deleteSession",
    security(("bearer" = []))
)]
#[delete("/{id}")]
pub async fn delete_session(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = session_id(&path)?;
    state.sessions.delete(id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Add a user to a session's participant set.
#[utoipa::path(
    post,
    path = "/api/session/{id}/participate/{userId}",
    params(
        ("id" = String, Path, description = "Numeric session id"),
        ("userId" = String, Path, description = "Numeric user id")
    ),
    responses(
        (status = 200, description = "User now participates"),
        (status = 400, description = "Malformed id or already participating", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Session or user not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "participate",
    security(("bearer" = []))
)]
#[post("/{id}/participate/{userId}")]
pub async fn participate(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (session, user) = membership_ids(&path)?;
    state.sessions.participate(session, user).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove a user from a session's participant set.
#[utoipa::path(
    delete,
    path = "/api/session/{id}/participate/{userId}",
    params(
        ("id" = String, Path, description = "Numeric session id"),
        ("userId" = String, Path, description = "Numeric user id")
    ),
    responses(
        (status = 200, description = "User no longer participates"),
        (status = 400, description = "Malformed id or not participating", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Session not found", body = ErrorSchema)
    ),
    tags = ["sessions"],
    operation_id = "noLongerParticipate",
    security(("bearer" = []))
)]
#[delete("/{id}/participate/{userId}")]
pub async fn no_longer_participate(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (session, user) = membership_ids(&path)?;
    state.sessions.no_longer_participate(session, user).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
