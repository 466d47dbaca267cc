//! Signup and login handlers.
//!
//! ```text
//! POST /api/auth/register {"email":"a@test.com","firstName":"Ada","lastName":"Lovelace","password":"pw"}
//! POST /api/auth/login {"email":"a@test.com","password":"pw"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginOutcome, LoginValidationError, SignupDetails, SignupFields,
    SignupValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

/// Acknowledgement returned by `POST /api/auth/register`.
pub const REGISTERED_MESSAGE: &str = "User registered successfully!";

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "yoga@studio.com")]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Plain acknowledgement payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Token plus the profile snapshot a client needs right after login.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    /// Always `Bearer`.
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    /// Login email.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl From<LoginOutcome> for JwtResponse {
    fn from(outcome: LoginOutcome) -> Self {
        let LoginOutcome { token, user } = outcome;
        Self {
            token: token.as_str().to_owned(),
            token_type: "Bearer".to_owned(),
            id: user.id().get(),
            username: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            admin: user.is_admin(),
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, Error> {
    value
        .as_deref()
        .ok_or_else(|| missing_field_error(FieldName::new(field)))
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    invalid_field_error(err.field(), err.to_string())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let payload = payload.into_inner();
    let details = SignupDetails::try_from_fields(SignupFields {
        email: required(&payload.email, "email")?,
        first_name: required(&payload.first_name, "firstName")?,
        last_name: required(&payload.last_name, "lastName")?,
        password: required(&payload.password, "password")?,
    })
    .map_err(map_signup_validation_error)?;

    state.registration.register(&details).await?;
    Ok(web::Json(MessageResponse {
        message: REGISTERED_MESSAGE.to_owned(),
    }))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = JwtResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Bad credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<JwtResponse>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        required(&payload.email, "email")?,
        required(&payload.password, "password")?,
    )
    .map_err(map_login_validation_error)?;

    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(JwtResponse::from(outcome)))
}
