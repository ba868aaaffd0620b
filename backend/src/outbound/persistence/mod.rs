//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the Diesel-backed implementation of the student repository port
//! with async support through `diesel-async` and `bb8` connection pooling.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module. Database errors are mapped to port error types before they
//! leave an adapter.
//!
//! # Example
//!
//! ```ignore
//! use students_backend::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/students")).await?;
//! let repo = DieselStudentRepository::new(pool);
//! ```

mod diesel_student_repository;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
