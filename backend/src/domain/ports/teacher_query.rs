//! Driving port for teacher reads.

use async_trait::async_trait;

use crate::domain::{Error, Teacher, TeacherId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherQuery: Send + Sync {
    async fn list(&self) -> Result<Vec<Teacher>, Error>;

    /// A single teacher; `NotFound` when absent.
    async fn get(&self, id: TeacherId) -> Result<Teacher, Error>;
}
