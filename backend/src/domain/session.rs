//! Yoga sessions and their participant sets.
//!
//! A [`Session`] owns its participant set. The set keeps insertion order for
//! display and never holds the same [`UserId`] twice; the two membership
//! transitions are guarded and reject illegal moves instead of correcting
//! them.
//!
//! ```text
//! NOT_PARTICIPATING --participate--> PARTICIPATING
//! PARTICIPATING --no_longer_participate--> NOT_PARTICIPATING
//! ```

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{TeacherId, UserId};

/// Maximum length of a session name.
pub const SESSION_NAME_MAX: usize = 50;
/// Maximum length of a session description.
pub const SESSION_DESCRIPTION_MAX: usize = 2500;

/// Validation errors for session fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionValidationError {
    #[error("session name must not be empty")]
    EmptyName,
    #[error("session name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("session description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

/// Rejected membership transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("user {user_id} is already participating in session {session_id}")]
    AlreadyParticipating {
        session_id: SessionId,
        user_id: UserId,
    },
    #[error("user {user_id} is not participating in session {session_id}")]
    NotParticipating {
        session_id: SessionId,
        user_id: UserId,
    },
}

/// Numeric session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(i64);

impl SessionId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank session title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self, SessionValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SessionValidationError::EmptyName);
        }
        if name.chars().count() > SESSION_NAME_MAX {
            return Err(SessionValidationError::NameTooLong {
                max: SESSION_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for SessionName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Free-text description; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionDescription(String);

impl SessionDescription {
    pub fn new(description: impl Into<String>) -> Result<Self, SessionValidationError> {
        let description = description.into();
        if description.chars().count() > SESSION_DESCRIPTION_MAX {
            return Err(SessionValidationError::DescriptionTooLong {
                max: SESSION_DESCRIPTION_MAX,
            });
        }
        Ok(Self(description))
    }
}

impl AsRef<str> for SessionDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Descriptive fields supplied when creating or updating a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub name: SessionName,
    pub description: SessionDescription,
    pub date: DateTime<Utc>,
    pub teacher_id: TeacherId,
}

/// Field bundle used by stores to rehydrate a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionParts {
    pub id: SessionId,
    pub details: SessionDraft,
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted session aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    details: SessionDraft,
    participants: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Rehydrate a session. Repeated participant ids are collapsed to their
    /// first occurrence so the set invariant holds whatever the store returns.
    #[must_use]
    pub fn new(parts: SessionParts) -> Self {
        let SessionParts {
            id,
            details,
            participants,
            created_at,
            updated_at,
        } = parts;
        let mut unique = Vec::with_capacity(participants.len());
        for user_id in participants {
            if !unique.contains(&user_id) {
                unique.push(user_id);
            }
        }
        Self {
            id,
            details,
            participants: unique,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &SessionName {
        &self.details.name
    }

    #[must_use]
    pub fn description(&self) -> &SessionDescription {
        &self.details.description
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.details.date
    }

    #[must_use]
    pub fn teacher_id(&self) -> TeacherId {
        self.details.teacher_id
    }

    /// Descriptive fields as a draft.
    #[must_use]
    pub fn details(&self) -> &SessionDraft {
        &self.details
    }

    /// Participants in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` is in the participant set.
    #[must_use]
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.participants.contains(&user_id)
    }

    /// Append `user_id` to the participant set.
    ///
    /// # Errors
    /// [`MembershipError::AlreadyParticipating`] when the user is already a
    /// member; the set is left untouched.
    pub fn add_participant(&mut self, user_id: UserId) -> Result<(), MembershipError> {
        if self.is_participant(user_id) {
            return Err(MembershipError::AlreadyParticipating {
                session_id: self.id,
                user_id,
            });
        }
        self.participants.push(user_id);
        Ok(())
    }

    /// Remove every entry equal to `user_id` from the participant set.
    ///
    /// # Errors
    /// [`MembershipError::NotParticipating`] when the user is not a member.
    pub fn remove_participant(&mut self, user_id: UserId) -> Result<(), MembershipError> {
        if !self.discard_participant(user_id) {
            return Err(MembershipError::NotParticipating {
                session_id: self.id,
                user_id,
            });
        }
        Ok(())
    }

    /// Drop `user_id` from the participant set if present. Returns whether
    /// anything was removed.
    pub fn discard_participant(&mut self, user_id: UserId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|member| *member != user_id);
        self.participants.len() != before
    }

    /// Replace the descriptive fields, keeping identity and participants.
    pub fn apply(&mut self, details: SessionDraft) {
        self.details = details;
    }

    /// Stamp the modification time.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
