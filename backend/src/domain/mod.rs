//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of the booking backend and the
//! use-case services that operate on them. Inbound adapters talk to services
//! through driving ports; services talk to storage and crypto through driven
//! ports (see [`ports`]).
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - User, Teacher, Session: persisted aggregates and their identifiers.
//! - SessionService, AuthService, UserService, TeacherService: driving port
//!   implementations.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod session;
pub mod session_service;
pub mod teacher;
pub mod teacher_service;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    AccessToken, LoginCredentials, LoginOutcome, LoginValidationError, PASSWORD_MAX, Principal,
    SignupDetails, SignupFields, SignupValidationError,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::session::{
    MembershipError, SESSION_DESCRIPTION_MAX, SESSION_NAME_MAX, Session, SessionDescription,
    SessionDraft, SessionId, SessionName, SessionParts, SessionValidationError,
};
pub use self::session_service::SessionService;
pub use self::teacher::{Teacher, TeacherDraft, TeacherId};
pub use self::teacher_service::TeacherService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, Email, NewUser, PERSON_NAME_MAX, PasswordHash, PersonName, User, UserDraft, UserId,
    UserValidationError,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use yoga_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
