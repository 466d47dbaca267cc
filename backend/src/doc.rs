//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound layer, the request
//! and response bodies, the error schemas from
//! [`crate::inbound::http::schemas`], and the bearer security scheme.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::sessions::{SessionDto, SessionRequest};
use crate::inbound::http::teachers::TeacherDto;
use crate::inbound::http::users::UserDto;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the JWT bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Yoga studio backend API",
        description = "Accounts, teachers, and yoga sessions with participant enrolment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::sessions::list_sessions,
        crate::inbound::http::sessions::get_session,
        crate::inbound::http::sessions::create_session,
        crate::inbound::http::sessions::update_session,
        crate::inbound::http::sessions::delete_session,
        crate::inbound::http::sessions::participate,
        crate::inbound::http::sessions::no_longer_participate,
        crate::inbound::http::teachers::list_teachers,
        crate::inbound::http::teachers::get_teacher,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        MessageResponse,
        JwtResponse,
        SessionDto,
        SessionRequest,
        TeacherDto,
        UserDto,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "sessions", description = "Session management and enrolment"),
        (name = "teachers", description = "Teacher lookups"),
        (name = "users", description = "Account lookups and deletion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
