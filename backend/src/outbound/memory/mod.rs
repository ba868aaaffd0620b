//! In-process student store.
//!
//! Backs the `StudentRepository` port with an ordered map guarded by a Tokio
//! `RwLock`. Every mutation performs its existence check and its write under
//! one write guard, so operations on the same identifier are atomic with
//! respect to each other. Used for local runs without `DATABASE_URL` and as
//! the store behind HTTP integration tests.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    RemoveOutcome, StudentRepository, StudentRepositoryError, UpdateOutcome,
};
use crate::domain::{Student, StudentId};

/// Map-backed implementation of the `StudentRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    records: RwLock<BTreeMap<StudentId, Student>>,
}

impl InMemoryStudentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `students`.
    ///
    /// Later entries replace earlier ones sharing an identifier.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let records = students
            .into_iter()
            .map(|student| (student.id, student))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn add(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut records = self.records.write().await;
        match records.entry(student.id) {
            Entry::Occupied(_) => {
                debug!(student_id = %student.id, "in-memory insert hit existing id");
                Err(StudentRepositoryError::duplicate_id(student.id))
            }
            Entry::Vacant(slot) => {
                slot.insert(student.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, student: &Student) -> Result<UpdateOutcome, StudentRepositoryError> {
        let mut records = self.records.write().await;
        match records.get_mut(&student.id) {
            Some(stored) => {
                *stored = student.clone();
                Ok(UpdateOutcome::Updated)
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    async fn remove(&self, id: StudentId) -> Result<RemoveOutcome, StudentRepositoryError> {
        let mut records = self.records.write().await;
        Ok(match records.remove(&id) {
            Some(_) => RemoveOutcome::Removed,
            None => RemoveOutcome::NotFound,
        })
    }

    async fn exists(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        Ok(self.records.read().await.contains_key(&id))
    }
}
