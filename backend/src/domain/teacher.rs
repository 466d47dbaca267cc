//! Teachers leading yoga sessions. Read-only from the backend's point of view.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

use crate::domain::PersonName;

/// Numeric teacher identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeacherId(i64);

impl TeacherId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field bundle for [`Teacher::new`].
#[derive(Debug, Clone)]
pub struct TeacherDraft {
    pub id: TeacherId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted teacher. Equality and hashing consider the id only.
#[derive(Debug, Clone)]
pub struct Teacher {
    id: TeacherId,
    first_name: PersonName,
    last_name: PersonName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Teacher {
    #[must_use]
    pub fn new(draft: TeacherDraft) -> Self {
        let TeacherDraft {
            id,
            first_name,
            last_name,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> TeacherId {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl PartialEq for Teacher {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Teacher {}

impl Hash for Teacher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
