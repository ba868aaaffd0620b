//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;

pub use error::{ApiResult, json_error_handler, path_error_handler};
