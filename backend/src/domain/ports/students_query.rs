//! Driving port for student reads.
//!
//! Inbound adapters use this port to read records without importing
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Domain use-case port for reading students.
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Return every stored student.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// Return one student, failing with a not-found error when absent.
    async fn fetch_student(&self, id: StudentId) -> Result<Student, Error>;
}

/// Deterministic query returning a single canned record with id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentsQuery;

impl FixtureStudentsQuery {
    fn canned() -> Student {
        Student::new(StudentId::new(1), "John", "Doe", 22)
    }
}

#[async_trait]
impl StudentsQuery for FixtureStudentsQuery {
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        Ok(vec![Self::canned()])
    }

    async fn fetch_student(&self, id: StudentId) -> Result<Student, Error> {
        let student = Self::canned();
        if student.id == id {
            Ok(student)
        } else {
            Err(Error::not_found(format!("student {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_lists_canned_student() {
        let students = FixtureStudentsQuery
            .list_students()
            .await
            .expect("fixture list");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].first_name, "John");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_unknown_ids_as_missing() {
        let error = FixtureStudentsQuery
            .fetch_student(StudentId::new(2))
            .await
            .expect_err("only id 1 exists");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
