//! Driving port for session reads.

use async_trait::async_trait;

use crate::domain::{Error, Session, SessionId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionQuery: Send + Sync {
    /// Every session, ordered by id.
    async fn list(&self) -> Result<Vec<Session>, Error>;

    /// A single session; `NotFound` when absent.
    async fn get(&self, id: SessionId) -> Result<Session, Error>;
}
