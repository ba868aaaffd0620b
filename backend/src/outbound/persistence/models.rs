//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Student, StudentId};

use super::schema::students;

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student::new(StudentId::new(row.id), row.first_name, row.last_name, row.age)
    }
}

/// Insertable struct for creating new student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: i32,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            id: student.id.get(),
            first_name: &student.first_name,
            last_name: &student.last_name,
            age: student.age,
        }
    }
}

/// Changeset replacing every mutable column of a student record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
}

impl<'a> From<&'a Student> for StudentUpdate<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            first_name: &student.first_name,
            last_name: &student.last_name,
            age: student.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_converts_to_domain_student() {
        let row = StudentRow {
            id: 5,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            age: 36,
        };

        let student = Student::from(row);

        assert_eq!(student, Student::new(StudentId::new(5), "Ada", "Lovelace", 36));
    }

    #[rstest]
    fn changeset_borrows_every_mutable_field() {
        let student = Student::new(StudentId::new(2), "Gob", "Smacker", 12);

        let update = StudentUpdate::from(&student);
        let insert = NewStudentRow::from(&student);

        assert_eq!(update.first_name, "Gob");
        assert_eq!(update.last_name, "Smacker");
        assert_eq!(update.age, 12);
        assert_eq!(insert.id, 2);
    }
}
