//! musiclib-server: HTTP catalog service for songs
//!
//! Filtered listing, enrichment from an external metadata service on create,
//! partial updates, deletes and verse-paginated lyrics, stored in Postgres.

pub mod config;
pub mod db;
pub mod enrichment;
pub mod http;
pub mod models;
pub mod service;

pub use config::ConfigError;
pub use db::{DbError, MigrateAction, PoolConfig, SongRepo, SongStore};
pub use enrichment::{HttpMetadataClient, LookupError, MetadataLookup};
pub use http::{run_server, ServerConfig, ServerError};
pub use service::{Catalog, CatalogError, CatalogService, TracedCatalog, TracedLookup, TracedStore};
