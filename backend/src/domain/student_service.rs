//! Student record service.
//!
//! Implements the [`StudentsQuery`] and [`StudentsCommand`] driving ports on
//! top of a [`StudentRepository`]. All record lifecycle rules live here:
//! field validation before any write, path/body identity checks, and the
//! single existence re-check that resolves update races.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    RemoveOutcome, StudentRepository, StudentRepositoryError, StudentsCommand, StudentsQuery,
    UpdateOutcome,
};
use crate::domain::{Error, Student, StudentId, StudentValidationError};

/// How strictly replacement records are validated.
///
/// Updates historically skip field validation, so [`Permissive`] is the
/// default. [`Strict`] applies the create-time rules to updates as well.
///
/// [`Permissive`]: UpdateValidation::Permissive
/// [`Strict`]: UpdateValidation::Strict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateValidation {
    /// Only the path/body identifier match is enforced.
    #[default]
    Permissive,
    /// Field constraints are enforced on update too.
    Strict,
}

/// Student service implementing the driving ports.
#[derive(Clone)]
pub struct StudentService<R> {
    repository: Arc<R>,
    update_validation: UpdateValidation,
}

impl<R> StudentService<R> {
    /// Create a service with permissive update validation.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            update_validation: UpdateValidation::default(),
        }
    }

    /// Override the update validation mode.
    #[must_use]
    pub fn with_update_validation(mut self, update_validation: UpdateValidation) -> Self {
        self.update_validation = update_validation;
        self
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    fn map_repository_error(error: StudentRepositoryError) -> Error {
        match error {
            StudentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("student repository unavailable: {message}"))
            }
            StudentRepositoryError::Query { message } => {
                Error::internal(format!("student repository error: {message}"))
            }
            StudentRepositoryError::DuplicateId { id } => Self::duplicate_id(id),
        }
    }

    fn validation_error(error: &StudentValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(error.details())
    }

    fn duplicate_id(id: StudentId) -> Error {
        Error::conflict(format!("student {id} already exists")).with_details(json!({
            "id": id,
            "code": "duplicate_id",
        }))
    }

    fn not_found(id: StudentId) -> Error {
        Error::not_found(format!("student {id} not found"))
    }

    fn concurrent_update(id: StudentId) -> Error {
        Error::conflict(format!("student {id} was modified concurrently")).with_details(json!({
            "id": id,
            "code": "concurrent_update",
        }))
    }

    fn id_mismatch(path_id: StudentId, body_id: StudentId) -> Error {
        Error::invalid_request("path id does not match body id").with_details(json!({
            "field": "id",
            "code": "id_mismatch",
            "pathId": path_id,
            "bodyId": body_id,
        }))
    }

    async fn exists(&self, id: StudentId) -> Result<bool, Error> {
        self.repository
            .exists(id)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Resolve an update that found no row at write time.
    ///
    /// Existence is re-checked exactly once. Still absent means the caller gets
    /// not-found; present again means another writer recreated it between
    /// the write and the re-check, which is reported as a conflict rather than
    /// retried.
    async fn resolve_missing_on_update(&self, id: StudentId) -> Error {
        match self.exists(id).await {
            Ok(false) => Self::not_found(id),
            Ok(true) => {
                warn!(student_id = %id, "student reappeared during update");
                Self::concurrent_update(id)
            }
            Err(err) => err,
        }
    }
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn fetch_student(&self, id: StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository,
{
    async fn create_student(&self, student: Student) -> Result<Student, Error> {
        if let Err(err) = student.validate() {
            debug!(student_id = %student.id, reason = %err, "rejected student create");
            return Err(Self::validation_error(&err));
        }

        self.repository
            .add(&student)
            .await
            .map_err(Self::map_repository_error)?;

        info!(student_id = %student.id, "student created");
        Ok(student)
    }

    async fn update_student(&self, id: StudentId, student: Student) -> Result<(), Error> {
        if id != student.id {
            return Err(Self::id_mismatch(id, student.id));
        }
        if self.update_validation == UpdateValidation::Strict {
            student
                .validate()
                .map_err(|err| Self::validation_error(&err))?;
        }

        let outcome = self
            .repository
            .update(&student)
            .await
            .map_err(Self::map_repository_error)?;

        match outcome {
            UpdateOutcome::Updated => {
                info!(student_id = %id, "student updated");
                Ok(())
            }
            UpdateOutcome::Conflict => Err(Self::concurrent_update(id)),
            UpdateOutcome::NotFound => Err(self.resolve_missing_on_update(id).await),
        }
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), Error> {
        if !self.exists(id).await? {
            return Err(Self::not_found(id));
        }

        let outcome = self
            .repository
            .remove(id)
            .await
            .map_err(Self::map_repository_error)?;

        match outcome {
            RemoveOutcome::Removed => {
                info!(student_id = %id, "student deleted");
                Ok(())
            }
            RemoveOutcome::NotFound => Err(Self::not_found(id)),
        }
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
