//! Driving ports for authentication use-cases.
//!
//! Inbound adapters call these to register accounts, exchange credentials for
//! a bearer token, and turn a presented token back into a principal, without
//! importing the persistence or crypto adapters behind them.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome, Principal, SignupDetails, User};

/// Exchange credentials for a signed token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate `credentials` and issue a token for the matching user.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::AuthenticationFailed`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Create new accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a non-admin account, rejecting emails already in use.
    async fn register(&self, details: &SignupDetails) -> Result<User, Error>;
}

/// Resolve a presented bearer token into the authenticated principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Principal, Error>;
}
