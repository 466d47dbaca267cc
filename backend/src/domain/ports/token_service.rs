//! Driven port issuing and verifying signed bearer tokens.
//!
//! The subject of every token is the user's email address.

use crate::domain::{AccessToken, Email};

use super::define_port_error;

define_port_error! {
    /// Reasons a token could not be issued or accepted.
    pub enum TokenError {
        /// The token is not a well-formed signed token.
        Malformed { message: String } => "malformed token: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
        /// The signature does not match the configured secret.
        BadSignature => "token signature mismatch",
        /// Signing a new token failed.
        Encoding { message: String } => "token encoding failed: {message}",
    }
}

/// Token issuer and verifier.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `subject`, stamped with issue and expiry times.
    fn issue(&self, subject: &Email) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry and return the subject.
    fn verify(&self, token: &str) -> Result<Email, TokenError>;

    /// Collapse [`TokenService::verify`] to a yes/no answer.
    fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}
