//! todoctl-server: PostgreSQL store and HTTP routes
//!
//! Serves the todo / todo-item REST API on top of any
//! [`Store`](todoctl_core::Store): [`db::PgStore`] in production,
//! [`MemoryStore`](todoctl_core::MemoryStore) for tests and local runs.

pub mod db;
pub mod http;
pub mod state;

pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
