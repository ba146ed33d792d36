//! Subcommand implementations

pub mod schema;
pub mod serve;

pub use schema::{run_schema, SchemaArgs};
pub use serve::{run_serve, ServeArgs};
