//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.
//!
//! A session aggregate spans the `sessions` row and its `participate` rows.
//! Saving rewrites both inside one transaction so readers never observe a
//! half-applied participant set.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{
    Session, SessionDescription, SessionDraft, SessionId, SessionName, SessionParts, TeacherId,
    UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_constraint,
};
use super::models::{
    NewParticipationRow, NewSessionRow, ParticipationRow, SessionRow, SessionUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{participate, sessions};

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionPersistenceError {
    map_basic_pool_error(error, SessionPersistenceError::connection)
}

/// Foreign key violations mean a teacher or participant vanished.
fn map_diesel_error(error: DieselError) -> SessionPersistenceError {
    if let Some(constraint) = violated_constraint(&error, DatabaseErrorKind::ForeignKeyViolation)
    {
        return SessionPersistenceError::missing_reference(constraint);
    }
    map_basic_diesel_error(
        error,
        SessionPersistenceError::query,
        SessionPersistenceError::connection,
    )
}

fn row_to_session(
    row: SessionRow,
    participants: Vec<UserId>,
) -> Result<Session, SessionPersistenceError> {
    let SessionRow {
        id,
        name,
        date,
        description,
        teacher_id,
        created_at,
        updated_at,
    } = row;
    let invalid = |err: crate::domain::SessionValidationError| {
        SessionPersistenceError::query(format!("stored session {id} is invalid: {err}"))
    };
    Ok(Session::new(SessionParts {
        id: SessionId::new(id),
        details: SessionDraft {
            name: SessionName::new(name).map_err(invalid)?,
            description: SessionDescription::new(description).map_err(invalid)?,
            date,
            teacher_id: TeacherId::new(teacher_id),
        },
        participants,
        created_at,
        updated_at,
    }))
}

/// Group participation rows by session, keeping join order.
fn group_participants(rows: Vec<ParticipationRow>) -> HashMap<i64, Vec<UserId>> {
    let mut grouped: HashMap<i64, Vec<UserId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.session_id)
            .or_default()
            .push(UserId::new(row.user_id));
    }
    grouped
}

fn participation_rows(session: &Session) -> Result<Vec<NewParticipationRow>, SessionPersistenceError> {
    session
        .participants()
        .iter()
        .enumerate()
        .map(|(index, user_id)| {
            let position = i32::try_from(index).map_err(|_| {
                SessionPersistenceError::query("participant set exceeds position range")
            })?;
            Ok(NewParticipationRow {
                session_id: session.id().get(),
                user_id: user_id.get(),
                position,
            })
        })
        .collect()
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(row) = sessions::table
            .filter(sessions::id.eq(id.get()))
            .select(SessionRow::as_select())
            .first::<SessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let participants: Vec<i64> = participate::table
            .filter(participate::session_id.eq(id.get()))
            .order(participate::position.asc())
            .select(participate::user_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_session(row, participants.into_iter().map(UserId::new).collect()).map(Some)
    }

    async fn list_all(&self) -> Result<Vec<Session>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, participation) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<SessionRow> = sessions::table
                        .order(sessions::id.asc())
                        .select(SessionRow::as_select())
                        .load(conn)
                        .await?;
                    let participation: Vec<ParticipationRow> = participate::table
                        .order((participate::session_id.asc(), participate::position.asc()))
                        .select(ParticipationRow::as_select())
                        .load(conn)
                        .await?;
                    Ok::<_, DieselError>((rows, participation))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut grouped = group_participants(participation);
        rows.into_iter()
            .map(|row| {
                let participants = grouped.remove(&row.id).unwrap_or_default();
                row_to_session(row, participants)
            })
            .collect()
    }

    async fn insert(&self, draft: &SessionDraft) -> Result<Session, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSessionRow {
            name: draft.name.as_ref(),
            date: draft.date,
            description: draft.description.as_ref(),
            teacher_id: draft.teacher_id.get(),
        };

        let row = diesel::insert_into(sessions::table)
            .values(&new_row)
            .returning(SessionRow::as_returning())
            .get_result::<SessionRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_session(row, Vec::new())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = session.id().get();
        let participants = participation_rows(session)?;
        let update = SessionUpdate {
            name: session.name().as_ref(),
            date: session.date(),
            description: session.description().as_ref(),
            teacher_id: session.teacher_id().get(),
            updated_at: session.updated_at(),
        };

        let updated = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(sessions::table.filter(sessions::id.eq(id)))
                        .set(&update)
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Ok(false);
                    }
                    diesel::delete(participate::table.filter(participate::session_id.eq(id)))
                        .execute(conn)
                        .await?;
                    if !participants.is_empty() {
                        diesel::insert_into(participate::table)
                            .values(&participants)
                            .execute(conn)
                            .await?;
                    }
                    Ok::<_, DieselError>(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if updated {
            Ok(())
        } else {
            Err(SessionPersistenceError::missing_reference(format!(
                "session {id}"
            )))
        }
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(sessions::table.filter(sessions::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn row(id: i64, name: &str) -> SessionRow {
        SessionRow {
            id,
            name: name.to_owned(),
            date: Utc::now(),
            description: "Morning flow".to_owned(),
            teacher_id: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn participants_are_grouped_in_join_order() {
        let rows = vec![
            ParticipationRow { session_id: 1, user_id: 7 },
            ParticipationRow { session_id: 2, user_id: 3 },
            ParticipationRow { session_id: 1, user_id: 5 },
        ];

        let grouped = group_participants(rows);

        assert_eq!(grouped.get(&1), Some(&vec![UserId::new(7), UserId::new(5)]));
        assert_eq!(grouped.get(&2), Some(&vec![UserId::new(3)]));
    }

    #[rstest]
    fn participation_rows_record_positions() {
        let session = row_to_session(row(9, "Yoga"), vec![UserId::new(4), UserId::new(1)])
            .expect("valid row");

        let rows = participation_rows(&session).expect("rows");

        let positions: Vec<_> = rows.iter().map(|r| (r.user_id, r.position)).collect();
        assert_eq!(positions, vec![(4, 0), (1, 1)]);
        assert!(rows.iter().all(|r| r.session_id == 9));
    }

    #[rstest]
    fn blank_stored_names_are_query_errors() {
        let err = row_to_session(row(3, "  "), Vec::new()).expect_err("invalid row");

        assert!(matches!(err, SessionPersistenceError::Query { .. }));
    }

    #[rstest]
    fn foreign_key_violations_become_missing_references() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert or update violates foreign key constraint".to_owned()),
        );

        assert!(matches!(
            map_diesel_error(error),
            SessionPersistenceError::MissingReference { .. }
        ));
    }
}
