//! Yoga studio backend: accounts, teachers and sessions with participant
//! enrolment, served over a JWT-protected REST API.
//!
//! The crate follows a hexagonal layout. [`domain`] owns entities, services
//! and ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports over PostgreSQL, memory, JWT and Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
