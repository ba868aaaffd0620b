//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! Each operation is a single statement, so per-identifier atomicity comes
//! from the primary key: a duplicate insert raises a unique violation and an
//! update or delete of a missing row affects zero rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    RemoveOutcome, StudentRepository, StudentRepositoryError, UpdateOutcome,
};
use crate::domain::{Student, StudentId};

use super::models::{NewStudentRow, StudentRow, StudentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to student repository errors.
fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Startup { message } => {
            StudentRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to student repository errors.
fn map_diesel_error(error: DieselError) -> StudentRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StudentRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => StudentRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentRepositoryError::connection("database connection error")
        }
        _ => StudentRepositoryError::query("database error"),
    }
}

/// Map an insert failure, recognising primary key collisions.
fn map_insert_error(error: DieselError, id: StudentId) -> StudentRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StudentRepositoryError::duplicate_id(id)
        }
        other => map_diesel_error(other),
    }
}

/// Map an update failure, recognising serialization conflicts.
fn map_update_error(error: DieselError) -> Result<UpdateOutcome, StudentRepositoryError> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            Ok(UpdateOutcome::Conflict)
        }
        other => Err(map_diesel_error(other)),
    }
}

fn update_outcome(affected_rows: usize) -> UpdateOutcome {
    if affected_rows == 0 {
        UpdateOutcome::NotFound
    } else {
        UpdateOutcome::Updated
    }
}

fn remove_outcome(affected_rows: usize) -> RemoveOutcome {
    if affected_rows == 0 {
        RemoveOutcome::NotFound
    } else {
        RemoveOutcome::Removed
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Student::from))
    }

    async fn add(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(students::table)
            .values(NewStudentRow::from(student))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, student.id))
    }

    async fn update(&self, student: &Student) -> Result<UpdateOutcome, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = diesel::update(students::table.find(student.id.get()))
            .set(StudentUpdate::from(student))
            .execute(&mut conn)
            .await;

        match result {
            Ok(affected_rows) => Ok(update_outcome(affected_rows)),
            Err(err) => map_update_error(err),
        }
    }

    async fn remove(&self, id: StudentId) -> Result<RemoveOutcome, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected_rows = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(remove_outcome(affected_rows))
    }

    async fn exists(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(students::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
