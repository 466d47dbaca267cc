//! PostgreSQL-backed `TeacherRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TeacherPersistenceError, TeacherRepository};
use crate::domain::{PersonName, Teacher, TeacherDraft, TeacherId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TeacherRow;
use super::pool::{DbPool, PoolError};
use super::schema::teachers;

/// Diesel-backed implementation of the teacher repository port.
#[derive(Clone)]
pub struct DieselTeacherRepository {
    pool: DbPool,
}

impl DieselTeacherRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TeacherPersistenceError {
    map_basic_pool_error(error, TeacherPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TeacherPersistenceError {
    map_basic_diesel_error(
        error,
        TeacherPersistenceError::query,
        TeacherPersistenceError::connection,
    )
}

fn row_to_teacher(row: TeacherRow) -> Result<Teacher, TeacherPersistenceError> {
    let invalid = |err: crate::domain::UserValidationError| {
        TeacherPersistenceError::query(format!("stored teacher {} is invalid: {err}", row.id))
    };
    Ok(Teacher::new(TeacherDraft {
        id: TeacherId::new(row.id),
        first_name: PersonName::new(row.first_name.clone()).map_err(invalid)?,
        last_name: PersonName::new(row.last_name.clone()).map_err(invalid)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl TeacherRepository for DieselTeacherRepository {
    async fn find_by_id(&self, id: TeacherId) -> Result<Option<Teacher>, TeacherPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = teachers::table
            .filter(teachers::id.eq(id.get()))
            .select(TeacherRow::as_select())
            .first::<TeacherRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_teacher).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Teacher>, TeacherPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TeacherRow> = teachers::table
            .order(teachers::id.asc())
            .select(TeacherRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_teacher).collect()
    }
}
