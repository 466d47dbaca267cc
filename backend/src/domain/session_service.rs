//! Session domain services: CRUD plus the membership engine.
//!
//! `participate` and `no_longer_participate` are check-then-write sequences.
//! The service serialises them per session with an async mutex so that two
//! concurrent joins for the same pair cannot both observe "not participating".

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};
use tracing::{debug, info};

use crate::domain::ports::{
    SessionCommand, SessionPersistenceError, SessionQuery, SessionRepository,
    TeacherPersistenceError, TeacherRepository, UserRepository,
};
use crate::domain::user_service::map_user_error;
use crate::domain::{Error, Session, SessionDraft, SessionId, TeacherId, UserId};

fn map_session_error(error: SessionPersistenceError) -> Error {
    match error {
        SessionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionPersistenceError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
        SessionPersistenceError::MissingReference { message } => Error::not_found(message),
    }
}

fn map_teacher_error(error: TeacherPersistenceError) -> Error {
    match error {
        TeacherPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("teacher repository unavailable: {message}"))
        }
        TeacherPersistenceError::Query { message } => {
            Error::internal(format!("teacher repository error: {message}"))
        }
    }
}

fn session_not_found(id: SessionId) -> Error {
    Error::not_found(format!("session {id} not found"))
}

type SessionLocks = Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>;

/// Claim on one session's mutex. The map entry is dropped with the last
/// claim, so ids of absent sessions leave nothing behind.
struct SessionLock<'a> {
    locks: &'a SessionLocks,
    id: SessionId,
    lock: Arc<AsyncMutex<()>>,
}

impl SessionLock<'_> {
    async fn acquire(&self) -> AsyncMutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for SessionLock<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this claim hold the mutex; no one else can clone it
        // while the map is locked.
        let unshared = Arc::strong_count(&self.lock) == 2;
        if unshared
            && locks
                .get(&self.id)
                .is_some_and(|entry| Arc::ptr_eq(entry, &self.lock))
        {
            locks.remove(&self.id);
        }
    }
}

/// Session service implementing the session command and query driving ports.
pub struct SessionService<S, T, U> {
    sessions: Arc<S>,
    teachers: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
    locks: SessionLocks,
}

impl<S, T, U> SessionService<S, T, U> {
    /// Create a service over the three entity repositories.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use yoga_backend::domain::SessionService;
    /// use yoga_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
    /// let _service = SessionService::new(
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(sessions: Arc<S>, teachers: Arc<T>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            teachers,
            users,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, id: SessionId) -> SessionLock<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        SessionLock {
            locks: &self.locks,
            id,
            lock: Arc::clone(locks.entry(id).or_default()),
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<S, T, U> SessionService<S, T, U>
where
    S: SessionRepository,
    T: TeacherRepository,
    U: UserRepository,
{
    async fn load(&self, id: SessionId) -> Result<Session, Error> {
        self.sessions
            .find_by_id(id)
            .await
            .map_err(map_session_error)?
            .ok_or_else(|| session_not_found(id))
    }

    async fn ensure_teacher(&self, id: TeacherId) -> Result<(), Error> {
        self.teachers
            .find_by_id(id)
            .await
            .map_err(map_teacher_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("teacher {id} not found")))
    }

    async fn ensure_user(&self, id: UserId) -> Result<(), Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<S, T, U> SessionCommand for SessionService<S, T, U>
where
    S: SessionRepository,
    T: TeacherRepository,
    U: UserRepository,
{
    async fn create(&self, draft: SessionDraft) -> Result<Session, Error> {
        self.ensure_teacher(draft.teacher_id).await?;
        let session = self
            .sessions
            .insert(&draft)
            .await
            .map_err(map_session_error)?;
        info!(session_id = %session.id(), "session created");
        Ok(session)
    }

    async fn update(&self, id: SessionId, draft: SessionDraft) -> Result<Session, Error> {
        let lock = self.lock_for(id);
        let _guard = lock.acquire().await;

        let mut session = self.load(id).await?;
        self.ensure_teacher(draft.teacher_id).await?;
        session.apply(draft);
        session.touch(self.clock.utc());
        self.sessions
            .save(&session)
            .await
            .map_err(map_session_error)?;
        info!(session_id = %id, "session updated");
        Ok(session)
    }

    async fn delete(&self, id: SessionId) -> Result<(), Error> {
        let lock = self.lock_for(id);
        let _guard = lock.acquire().await;

        if !self.sessions.delete(id).await.map_err(map_session_error)? {
            return Err(session_not_found(id));
        }
        info!(session_id = %id, "session deleted");
        Ok(())
    }

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<(), Error> {
        let lock = self.lock_for(id);
        let _guard = lock.acquire().await;

        let mut session = self.load(id).await?;
        self.ensure_user(user_id).await?;
        session
            .add_participant(user_id)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        session.touch(self.clock.utc());
        self.sessions
            .save(&session)
            .await
            .map_err(map_session_error)?;
        info!(session_id = %id, user_id = %user_id, "user joined session");
        Ok(())
    }

    async fn no_longer_participate(&self, id: SessionId, user_id: UserId) -> Result<(), Error> {
        let lock = self.lock_for(id);
        let _guard = lock.acquire().await;

        let mut session = self.load(id).await?;
        session
            .remove_participant(user_id)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        session.touch(self.clock.utc());
        self.sessions
            .save(&session)
            .await
            .map_err(map_session_error)?;
        debug!(
            session_id = %id,
            user_id = %user_id,
            remaining = session.participants().len(),
            "user left session"
        );
        Ok(())
    }
}

#[async_trait]
impl<S, T, U> SessionQuery for SessionService<S, T, U>
where
    S: SessionRepository,
    T: TeacherRepository,
    U: UserRepository,
{
    async fn list(&self) -> Result<Vec<Session>, Error> {
        self.sessions.list_all().await.map_err(map_session_error)
    }

    async fn get(&self, id: SessionId) -> Result<Session, Error> {
        self.load(id).await
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
