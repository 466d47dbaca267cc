//! Driven port for session persistence, participant sets included.

use async_trait::async_trait;

use crate::domain::{Session, SessionDraft, SessionId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by session repository adapters.
    pub enum SessionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session repository query failed: {message}",
        /// A referenced teacher or user vanished before the write landed.
        MissingReference { message: String } => "session references a missing record: {message}",
    }
}

/// Entity store operations for [`Session`] aggregates.
///
/// `save` writes the descriptive fields and the full participant set as one
/// atomic unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch a session with its participants.
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionPersistenceError>;

    /// List every session ordered by id.
    async fn list_all(&self) -> Result<Vec<Session>, SessionPersistenceError>;

    /// Persist a new session with an empty participant set.
    async fn insert(&self, draft: &SessionDraft) -> Result<Session, SessionPersistenceError>;

    /// Overwrite an existing session, participant set included.
    async fn save(&self, session: &Session) -> Result<(), SessionPersistenceError>;

    /// Delete a session. Returns `false` when no row matched.
    async fn delete(&self, id: SessionId) -> Result<bool, SessionPersistenceError>;
}
