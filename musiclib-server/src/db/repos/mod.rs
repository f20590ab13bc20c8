//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - "no rows" becomes `DbError::NotFound`, never a raw sqlx error
//! - every other failure carries the name of the operation, not the SQL
//! - statements with caller-chosen predicates come from `db::query`

pub mod songs;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{NewSong, Song, SongFilter, SongId, SongPatch, ValidationError};

pub use songs::SongRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to {operation}: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("rejected: {0}")]
    Invalid(#[from] ValidationError),
}

impl DbError {
    /// Wrap a sqlx error with the operation that produced it.
    pub fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
        move |source| DbError::Query { operation, source }
    }

    pub fn song_not_found(id: SongId) -> Self {
        DbError::NotFound {
            resource: "song",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Song persistence, implemented by [`SongRepo`] over PostgreSQL.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Songs matching every present predicate, ordered by id.
    async fn select(&self, filter: &SongFilter) -> Result<Vec<Song>, DbError>;

    /// Insert and return the generated id.
    async fn insert(&self, song: &NewSong) -> Result<SongId, DbError>;

    /// One song by id, `NotFound` when absent.
    async fn get(&self, id: SongId) -> Result<Song, DbError>;

    /// Apply a non-empty patch to an existing song, `NotFound` when absent.
    async fn update(&self, id: SongId, patch: &SongPatch) -> Result<(), DbError>;

    /// Delete by id, `NotFound` when nothing was removed.
    async fn delete(&self, id: SongId) -> Result<(), DbError>;
}

#[async_trait]
impl<T: SongStore + ?Sized> SongStore for Arc<T> {
    async fn select(&self, filter: &SongFilter) -> Result<Vec<Song>, DbError> {
        (**self).select(filter).await
    }

    async fn insert(&self, song: &NewSong) -> Result<SongId, DbError> {
        (**self).insert(song).await
    }

    async fn get(&self, id: SongId) -> Result<Song, DbError> {
        (**self).get(id).await
    }

    async fn update(&self, id: SongId, patch: &SongPatch) -> Result<(), DbError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: SongId) -> Result<(), DbError> {
        (**self).delete(id).await
    }
}
