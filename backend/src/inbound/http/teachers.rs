//! Teacher HTTP handlers.
//!
//! ```text
//! GET /api/teacher
//! GET /api/teacher/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Teacher, TeacherId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Teacher representation returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&Teacher> for TeacherDto {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id().get(),
            last_name: teacher.last_name().to_string(),
            first_name: teacher.first_name().to_string(),
            created_at: teacher.created_at().to_rfc3339(),
            updated_at: teacher.updated_at().to_rfc3339(),
        }
    }
}

/// List every teacher.
#[utoipa::path(
    get,
    path = "/api/teacher",
    responses(
        (status = 200, description = "Teachers", body = [TeacherDto]),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["teachers"],
    operation_id = "listTeachers",
    security(("bearer" = []))
)]
#[get("")]
pub async fn list_teachers(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<TeacherDto>>> {
    let teachers = state.teachers.list().await?;
    Ok(web::Json(teachers.iter().map(TeacherDto::from).collect()))
}

/// Fetch one teacher.
#[utoipa::path(
    get,
    path = "/api/teacher/{id}",
    params(("id" = String, Path, description = "Numeric teacher id")),
    responses(
        (status = 200, description = "Teacher", body = TeacherDto),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["teachers"],
    operation_id = "getTeacher",
    security(("bearer" = []))
)]
#[get("/{id}")]
pub async fn get_teacher(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TeacherDto>> {
    let id = parse_id(&path, FieldName::new("id")).map(TeacherId::new)?;
    let teacher = state.teachers.get(id).await?;
    Ok(web::Json(TeacherDto::from(&teacher)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, PersonName, TeacherDraft};
    use crate::inbound::http::test_utils::{TestPorts, bearer, fixture_timestamp, test_principal};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    fn teacher(id: i64, first: &str, last: &str) -> Teacher {
        Teacher::new(TeacherDraft {
            id: TeacherId::new(id),
            first_name: PersonName::new(first).expect("valid name"),
            last_name: PersonName::new(last).expect("valid name"),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        })
    }

    async fn get(ports: TestPorts, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new().app_data(ports.into_state()).service(
                web::scope("/api/teacher")
                    .service(list_teachers)
                    .service(get_teacher),
            ),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer())
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn lists_teachers_in_camel_case() {
        let mut ports = TestPorts::authenticated(test_principal(1, "yoga@studio.com"));
        ports.teachers.expect_list().returning(|| {
            Ok(vec![
                teacher(1, "Margot", "DELAHAYE"),
                teacher(2, "Hélène", "THIERCELIN"),
            ])
        });

        let (status, body) = get(ports, "/api/teacher").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["firstName"], "Margot");
        assert_eq!(body[1]["lastName"], "THIERCELIN");
    }

    #[actix_web::test]
    async fn absent_teacher_is_404() {
        let mut ports = TestPorts::authenticated(test_principal(1, "yoga@studio.com"));
        ports
            .teachers
            .expect_get()
            .returning(|id| Err(Error::not_found(format!("teacher {id} not found"))));

        let (status, body) = get(ports, "/api/teacher/9").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "teacher 9 not found");
    }

    #[actix_web::test]
    async fn malformed_teacher_id_is_400() {
        let mut ports = TestPorts::authenticated(test_principal(1, "yoga@studio.com"));
        ports.teachers.expect_get().times(0);

        let (status, body) = get(ports, "/api/teacher/one").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "malformed_request");
    }
}
