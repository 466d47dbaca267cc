//! Driving ports for user lookups and account removal.

use async_trait::async_trait;

use crate::domain::{Error, Principal, User, UserId};

/// Read a single user profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// A single user; `NotFound` when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;
}

/// Delete accounts on behalf of an authenticated principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Delete `id` when it belongs to `principal`.
    ///
    /// Fails with `NotFound` when the target is missing and with
    /// `Unauthorized` when the principal's email differs from the target's.
    async fn delete(&self, id: UserId, principal: &Principal) -> Result<(), Error>;
}
