//! Driven port for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected an insert.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Entity store operations for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Whether an account already uses `email`.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserPersistenceError>;

    /// Persist a new account, assigning its id and timestamps.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Delete a user and its participations. Returns `false` when no row
    /// matched.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
