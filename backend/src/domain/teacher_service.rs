//! Teacher lookups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TeacherPersistenceError, TeacherQuery, TeacherRepository};
use crate::domain::{Error, Teacher, TeacherId};

fn map_repository_error(error: TeacherPersistenceError) -> Error {
    match error {
        TeacherPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("teacher repository unavailable: {message}"))
        }
        TeacherPersistenceError::Query { message } => {
            Error::internal(format!("teacher repository error: {message}"))
        }
    }
}

/// Teacher service implementing the teacher query driving port.
pub struct TeacherService<T> {
    teachers: Arc<T>,
}

impl<T> TeacherService<T> {
    pub fn new(teachers: Arc<T>) -> Self {
        Self { teachers }
    }
}

#[async_trait]
impl<T> TeacherQuery for TeacherService<T>
where
    T: TeacherRepository,
{
    async fn list(&self) -> Result<Vec<Teacher>, Error> {
        self.teachers.list_all().await.map_err(map_repository_error)
    }

    async fn get(&self, id: TeacherId) -> Result<Teacher, Error> {
        self.teachers
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("teacher {id} not found")))
    }
}
