//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{StudentsCommand, StudentsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentsQuery>,
    pub students_command: Arc<dyn StudentsCommand>,
}

impl HttpState {
    /// Construct state from the query and command ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use students_backend::domain::ports::{FixtureStudentsCommand, FixtureStudentsQuery};
    /// use students_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureStudentsQuery), Arc::new(FixtureStudentsCommand));
    /// let _students = state.students.clone();
    /// ```
    pub fn new(
        students: Arc<dyn StudentsQuery>,
        students_command: Arc<dyn StudentsCommand>,
    ) -> Self {
        Self {
            students,
            students_command,
        }
    }

    /// Construct state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: StudentsQuery + StudentsCommand + 'static,
    {
        Self {
            students: service.clone(),
            students_command: service,
        }
    }
}
