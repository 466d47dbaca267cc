//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TokenService`], [`PasswordHasher`]) are
//! implemented by outbound adapters. Driving ports (`*Query`, `*Command`,
//! [`LoginService`] and friends) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod session_command;
mod session_query;
mod session_repository;
mod teacher_query;
mod teacher_repository;
mod token_service;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use login_service::{MockLoginService, MockPrincipalResolver, MockRegistrationService};
pub use login_service::{LoginService, PrincipalResolver, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_command::MockSessionCommand;
pub use session_command::SessionCommand;
#[cfg(test)]
pub use session_query::MockSessionQuery;
pub use session_query::SessionQuery;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionPersistenceError, SessionRepository};
#[cfg(test)]
pub use teacher_query::MockTeacherQuery;
pub use teacher_query::TeacherQuery;
#[cfg(test)]
pub use teacher_repository::MockTeacherRepository;
pub use teacher_repository::{TeacherPersistenceError, TeacherRepository};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::{MockUserCommand, MockUserQuery};
pub use users_query::{UserCommand, UserQuery};

#[cfg(test)]
mod tests;
