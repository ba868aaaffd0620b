//! Domain primitives, ports and services.
//!
//! Purpose: define the student record model and the lifecycle rules around
//! it, independent of HTTP and storage concerns.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Student / StudentId — the record and its key.
//! - StudentService — validation and orchestration over a repository port.
//! - TraceId — request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::student::{Student, StudentId, StudentValidationError};
pub use self::student_service::{StudentService, UpdateValidation};
pub use self::trace_id::TraceId;
