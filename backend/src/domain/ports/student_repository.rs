//! Port for student record persistence.
//!
//! The [`StudentRepository`] trait is the only seam that touches storage.
//! Expected outcomes of a write (the row vanished, a concurrent writer won)
//! are reported as tagged values so the service can branch on them without
//! inspecting error strings. Infrastructure failures stay in
//! [`StudentRepositoryError`].

use async_trait::async_trait;

use crate::domain::{Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// A record with the same identifier is already stored.
        DuplicateId { id: StudentId } =>
            "student {id} already exists",
    }
}

/// Result of replacing a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The stored record now matches the supplied one.
    Updated,
    /// No record with that identifier existed at write time.
    NotFound,
    /// The store detected a concurrent write to the same record.
    Conflict,
}

/// Result of deleting a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The record was deleted.
    Removed,
    /// No record with that identifier existed at delete time.
    NotFound,
}

/// Port for student storage and retrieval.
///
/// Every mutation is atomic per identifier: two concurrent `add` calls for
/// one id resolve with exactly one success and one
/// [`StudentRepositoryError::DuplicateId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Return every stored record ordered by ascending identifier.
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Fetch a record, returning `None` when the identifier is unknown.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Insert a new record.
    ///
    /// Fails with [`StudentRepositoryError::DuplicateId`] if the identifier
    /// is already taken; the stored record is left untouched.
    async fn add(&self, student: &Student) -> Result<(), StudentRepositoryError>;

    /// Replace every field of the record matching `student.id`.
    async fn update(&self, student: &Student) -> Result<UpdateOutcome, StudentRepositoryError>;

    /// Delete the record with the given identifier.
    async fn remove(&self, id: StudentId) -> Result<RemoveOutcome, StudentRepositoryError>;

    /// Report whether a record with the given identifier is stored.
    async fn exists(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;
}
