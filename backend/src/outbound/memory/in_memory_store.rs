//! Mutex-guarded implementation of the user, teacher and session repository
//! ports.
//!
//! Ids come from per-entity sequences starting at 1. Email uniqueness and
//! teacher/participant references are enforced the same way the PostgreSQL
//! constraints enforce them, so services observe identical failures.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    SessionPersistenceError, SessionRepository, TeacherPersistenceError, TeacherRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Email, NewUser, PersonName, Session, SessionDraft, SessionId, SessionParts, Teacher,
    TeacherDraft, TeacherId, User, UserDraft, UserId,
};

const SEED_TEACHERS: [(&str, &str); 2] = [("Margot", "DELAHAYE"), ("Hélène", "THIERCELIN")];

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    teachers: BTreeMap<TeacherId, Teacher>,
    sessions: BTreeMap<SessionId, Session>,
    last_user_id: i64,
    last_teacher_id: i64,
    last_session_id: i64,
}

/// Entity store holding every table in one mutex.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping timestamps from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    /// Create a store pre-populated with the studio's two teachers, matching
    /// the database migration seed.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use yoga_backend::domain::ports::TeacherRepository;
    /// use yoga_backend::outbound::memory::InMemoryStore;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let store = InMemoryStore::seeded(Arc::new(DefaultClock));
    /// assert_eq!(store.list_all().await.unwrap().len(), 2);
    /// # });
    /// ```
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        let store = Self::new(clock);
        let now = store.clock.utc();
        if let Ok(mut tables) = store.tables.lock() {
            for (first, last) in SEED_TEACHERS {
                let (Ok(first_name), Ok(last_name)) = (PersonName::new(first), PersonName::new(last))
                else {
                    continue;
                };
                tables.last_teacher_id += 1;
                let id = TeacherId::new(tables.last_teacher_id);
                tables.teachers.insert(
                    id,
                    Teacher::new(TeacherDraft {
                        id,
                        first_name,
                        last_name,
                        created_at: now,
                        updated_at: now,
                    }),
                );
            }
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.values().any(|user| user.email() == email))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables.users.values().any(|existing| existing.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.to_string()));
        }
        tables.last_user_id += 1;
        let id = UserId::new(tables.last_user_id);
        let now = self.clock.utc();
        let stored = User::new(UserDraft {
            id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password: user.password.clone(),
            admin: user.admin,
            created_at: now,
            updated_at: now,
        });
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        for session in tables.sessions.values_mut() {
            // Mirrors the ON DELETE CASCADE on participate.user_id.
            session.discard_participant(id);
        }
        Ok(true)
    }
}

#[async_trait]
impl TeacherRepository for InMemoryStore {
    async fn find_by_id(&self, id: TeacherId) -> Result<Option<Teacher>, TeacherPersistenceError> {
        let tables = self.lock().map_err(TeacherPersistenceError::query)?;
        Ok(tables.teachers.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Teacher>, TeacherPersistenceError> {
        let tables = self.lock().map_err(TeacherPersistenceError::query)?;
        Ok(tables.teachers.values().cloned().collect())
    }
}

fn check_references(tables: &Tables, session: &Session) -> Result<(), SessionPersistenceError> {
    if !tables.teachers.contains_key(&session.teacher_id()) {
        return Err(SessionPersistenceError::missing_reference(format!(
            "teacher {}",
            session.teacher_id()
        )));
    }
    if let Some(user_id) = session
        .participants()
        .iter()
        .find(|user_id| !tables.users.contains_key(user_id))
    {
        return Err(SessionPersistenceError::missing_reference(format!(
            "user {user_id}"
        )));
    }
    Ok(())
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionPersistenceError> {
        let tables = self.lock().map_err(SessionPersistenceError::query)?;
        Ok(tables.sessions.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Session>, SessionPersistenceError> {
        let tables = self.lock().map_err(SessionPersistenceError::query)?;
        Ok(tables.sessions.values().cloned().collect())
    }

    async fn insert(&self, draft: &SessionDraft) -> Result<Session, SessionPersistenceError> {
        let mut tables = self.lock().map_err(SessionPersistenceError::query)?;
        let now = self.clock.utc();
        let session = Session::new(SessionParts {
            id: SessionId::new(tables.last_session_id + 1),
            details: draft.clone(),
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        check_references(&tables, &session)?;
        tables.last_session_id += 1;
        tables.sessions.insert(session.id(), session.clone());
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), SessionPersistenceError> {
        let mut tables = self.lock().map_err(SessionPersistenceError::query)?;
        if !tables.sessions.contains_key(&session.id()) {
            return Err(SessionPersistenceError::missing_reference(format!(
                "session {}",
                session.id()
            )));
        }
        check_references(&tables, session)?;
        tables.sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionPersistenceError> {
        let mut tables = self.lock().map_err(SessionPersistenceError::query)?;
        Ok(tables.sessions.remove(&id).is_some())
    }
}
