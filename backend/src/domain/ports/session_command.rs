//! Driving port for session mutations, membership transitions included.

use async_trait::async_trait;

use crate::domain::{Error, Session, SessionDraft, SessionId, UserId};

/// Write-side session use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCommand: Send + Sync {
    /// Create a session with no participants.
    async fn create(&self, draft: SessionDraft) -> Result<Session, Error>;

    /// Replace the descriptive fields of an existing session. The participant
    /// set is kept.
    async fn update(&self, id: SessionId, draft: SessionDraft) -> Result<Session, Error>;

    async fn delete(&self, id: SessionId) -> Result<(), Error>;

    /// Add `user_id` to the session's participant set.
    ///
    /// Fails with `NotFound` when either record is missing and with
    /// `InvalidRequest` when the user already participates.
    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), Error>;

    /// Remove `user_id` from the session's participant set.
    ///
    /// Fails with `NotFound` when the session is missing and with
    /// `InvalidRequest` when the user is not a participant.
    async fn no_longer_participate(&self, id: SessionId, user_id: UserId) -> Result<(), Error>;
}
