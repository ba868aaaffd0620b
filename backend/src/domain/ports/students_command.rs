//! Driving port for student mutations.
//!
//! The port covers the full write lifecycle of a record: create, replace and
//! delete. Implementations own validation and existence checks; adapters only
//! translate the resulting [`Error`] codes.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Domain use-case port for mutating students.
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Validate and store a new record, returning it as stored.
    async fn create_student(&self, student: Student) -> Result<Student, Error>;

    /// Replace the record addressed by `id` with `student`.
    ///
    /// `id` must equal `student.id`.
    async fn update_student(&self, id: StudentId, student: Student) -> Result<(), Error>;

    /// Delete the record addressed by `id`.
    async fn delete_student(&self, id: StudentId) -> Result<(), Error>;
}

/// Fixture command that accepts every request without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentsCommand;

#[async_trait]
impl StudentsCommand for FixtureStudentsCommand {
    async fn create_student(&self, student: Student) -> Result<Student, Error> {
        Ok(student)
    }

    async fn update_student(&self, _id: StudentId, _student: Student) -> Result<(), Error> {
        Ok(())
    }

    async fn delete_student(&self, _id: StudentId) -> Result<(), Error> {
        Ok(())
    }
}
