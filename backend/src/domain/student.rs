//! Student data model.
//!
//! A student is a flat record keyed by a caller-supplied integer identifier.
//! Field constraints are checked by [`Student::validate`] rather than at
//! construction time so the update path can stay permissive when configured
//! that way.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Stable student identifier.
///
/// # Examples
/// ```
/// use students_backend::domain::StudentId;
///
/// let id = StudentId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i32);

impl StudentId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for StudentId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-level validation failures for [`Student`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// `firstName` was the empty string.
    #[error("first name must not be empty")]
    EmptyFirstName,
    /// `lastName` was the empty string.
    #[error("last name must not be empty")]
    EmptyLastName,
    /// `age` was below zero.
    #[error("age must not be negative")]
    NegativeAge { age: i32 },
}

impl StudentValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "firstName",
            Self::EmptyLastName => "lastName",
            Self::NegativeAge { .. } => "age",
        }
    }

    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => "empty_first_name",
            Self::EmptyLastName => "empty_last_name",
            Self::NegativeAge { .. } => "negative_age",
        }
    }

    /// Structured details attached to the domain error.
    pub fn details(&self) -> Value {
        match self {
            Self::NegativeAge { age } => json!({
                "field": self.field(),
                "code": self.code(),
                "value": age,
            }),
            _ => json!({
                "field": self.field(),
                "code": self.code(),
            }),
        }
    }
}

/// Student record.
///
/// ## Invariants
/// Records accepted by the create path satisfy `first_name != ""`,
/// `last_name != ""` and `age >= 0`. Whitespace-only names are not empty.
///
/// # Examples
/// ```
/// use students_backend::domain::{Student, StudentId};
///
/// let student = Student::new(StudentId::new(1), "John", "Doe", 22);
/// assert!(student.validate().is_ok());
///
/// let json = serde_json::to_value(&student).expect("serialises");
/// assert_eq!(json["firstName"], "John");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Caller-supplied identifier.
    pub id: StudentId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age in years.
    pub age: i32,
}

impl Student {
    /// Build a record from its parts.
    pub fn new(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    /// Check field constraints, reporting the first violation found.
    ///
    /// Fields are checked in wire order: `firstName`, `lastName`, `age`.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.first_name.is_empty() {
            return Err(StudentValidationError::EmptyFirstName);
        }
        if self.last_name.is_empty() {
            return Err(StudentValidationError::EmptyLastName);
        }
        if self.age < 0 {
            return Err(StudentValidationError::NegativeAge { age: self.age });
        }
        Ok(())
    }
}
