//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`StudentsQuery`], [`StudentsCommand`]) are what inbound
//! adapters call. The driven port ([`StudentRepository`]) is what outbound
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod student_repository;
mod students_command;
mod students_query;

#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{
    RemoveOutcome, StudentRepository, StudentRepositoryError, UpdateOutcome,
};
pub use students_command::{FixtureStudentsCommand, StudentsCommand};
pub use students_query::{FixtureStudentsQuery, StudentsQuery};
