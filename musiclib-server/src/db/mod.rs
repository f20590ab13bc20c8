//! Database layer - connection pool, statement builders, repositories
//!
//! # Design Principles
//!
//! - One PgPool per process, passed explicitly; no global handle
//! - Caller-driven predicates are built as numbered placeholders + bound args
//! - Single statements only; the store's row atomicity is the only locking

pub mod pool;
pub mod statement;
pub mod query;
pub mod migrations;
pub mod repos;

pub use pool::{close_pool, create_pool, PoolConfig};
pub use migrations::MigrateAction;
pub use repos::{DbError, SongRepo, SongStore};
