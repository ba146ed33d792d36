//! Database layer - connection pool, schema and the PostgreSQL store
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Relation loads use JOINs or one batched query - no N+1 queries
//! - Rely on DB constraints, handle violations - no check-then-insert
//! - Transactions for multi-step operations

pub mod pg_store;
pub mod pool;
pub mod schema;

pub use pg_store::PgStore;
pub use pool::{create_pool, create_pool_with_options, PoolConfig};
