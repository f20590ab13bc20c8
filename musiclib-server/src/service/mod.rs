//! Catalog service - the operations the HTTP layer calls
//!
//! [`CatalogService`] holds the rules (defaults, enrichment, not-found
//! translation, lyric paging, deadlines). The `traced` decorators add
//! logging around any [`Catalog`], [`SongStore`] or [`MetadataLookup`]
//! without touching those rules.
//!
//! [`SongStore`]: crate::db::SongStore
//! [`MetadataLookup`]: crate::enrichment::MetadataLookup

pub mod catalog;
pub mod traced;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::DbError;
use crate::enrichment::LookupError;
use crate::models::{PageError, Song, SongDraft, SongFilter, SongId, SongPatch, TextPage, ValidationError};

pub use catalog::CatalogService;
pub use traced::{TracedCatalog, TracedLookup, TracedStore};

/// Classified catalog failure. Every error path reports exactly one of these.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("song {id} not found")]
    NotFound { id: SongId },

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] PageError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Metadata service has no entry; the song is not created
    #[error("cannot create song: no metadata for '{group}' - '{title}'")]
    CannotEnrich { group: String, title: String },

    #[error("metadata service unavailable: {0}")]
    UpstreamUnavailable(#[source] LookupError),

    #[error("{operation} exceeded its {}ms deadline", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("{0}")]
    Internal(#[source] DbError),
}

impl CatalogError {
    /// Failures caused by the request rather than the system.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidParams(_)
                | Self::Validation(_)
                | Self::CannotEnrich { .. }
        )
    }

    /// Translate a store error for song `id`.
    pub(crate) fn from_store(id: Option<SongId>, err: DbError) -> Self {
        match (err, id) {
            (DbError::NotFound { .. }, Some(id)) => Self::NotFound { id },
            (DbError::Invalid(e), _) => Self::Validation(e),
            (other, _) => Self::Internal(other),
        }
    }
}

/// Song catalog operations
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Filtered listing. Page 1 / size 10 when neither is given.
    async fn list_songs(&self, filter: SongFilter) -> Result<Vec<Song>, CatalogError>;

    async fn get_song(&self, id: SongId) -> Result<Song, CatalogError>;

    /// Enrich from the metadata service, then insert. Returns the new id.
    async fn create_song(&self, draft: SongDraft) -> Result<SongId, CatalogError>;

    async fn update_song(&self, id: SongId, patch: SongPatch) -> Result<(), CatalogError>;

    async fn delete_song(&self, id: SongId) -> Result<(), CatalogError>;

    /// Verses `[page, page + page_size)` of the song's lyrics.
    async fn song_text(
        &self,
        id: SongId,
        page: usize,
        page_size: usize,
    ) -> Result<TextPage, CatalogError>;
}
