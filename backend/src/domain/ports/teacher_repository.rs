//! Driven port for teacher lookups.

use async_trait::async_trait;

use crate::domain::{Teacher, TeacherId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by teacher repository adapters.
    pub enum TeacherPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "teacher repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "teacher repository query failed: {message}",
    }
}

/// Read-only entity store operations for [`Teacher`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Fetch a teacher by identifier.
    async fn find_by_id(&self, id: TeacherId) -> Result<Option<Teacher>, TeacherPersistenceError>;

    /// List every teacher ordered by id.
    async fn list_all(&self) -> Result<Vec<Teacher>, TeacherPersistenceError>;
}
