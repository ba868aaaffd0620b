//! Builders wiring the student service to its configured store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use students_backend::domain::StudentService;
use students_backend::domain::ports::StudentRepository;
use students_backend::inbound::http::state::HttpState;
use students_backend::outbound::memory::InMemoryStudentRepository;
use students_backend::outbound::persistence::DieselStudentRepository;

use super::ServerConfig;

fn state_for<R>(repository: R, config: &ServerConfig) -> HttpState
where
    R: StudentRepository + 'static,
{
    let service = StudentService::new(Arc::new(repository))
        .with_update_validation(config.update_validation);
    HttpState::from_service(Arc::new(service))
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL student store");
            state_for(DieselStudentRepository::new(pool.clone()), config)
        }
        None => {
            info!("no database configured; using in-memory student store");
            state_for(InMemoryStudentRepository::new(), config)
        }
    };
    web::Data::new(state)
}
