//! Catalog rules on top of a song store and a metadata source

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::{Catalog, CatalogError};
use crate::db::SongStore;
use crate::enrichment::{LookupError, MetadataLookup, SongDetail};
use crate::models::{Song, SongDraft, SongFilter, SongId, SongPatch, TextPage};

/// Default deadline for one catalog operation
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog service over any store and lookup
pub struct CatalogService<S, L> {
    store: S,
    lookup: L,
    deadline: Duration,
}

impl<S, L> CatalogService<S, L>
where
    S: SongStore,
    L: MetadataLookup,
{
    pub fn new(store: S, lookup: L) -> Self {
        Self {
            store,
            lookup,
            deadline: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-operation deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        tokio::time::timeout(self.deadline, fut)
            .await
            .unwrap_or(Err(CatalogError::Timeout {
                operation,
                after: self.deadline,
            }))
    }

    async fn enrich(&self, mut draft: SongDraft) -> Result<SongDraft, CatalogError> {
        let SongDetail {
            release_date,
            text,
            link,
        } = self
            .lookup
            .lookup(&draft.group, &draft.title)
            .await
            .map_err(|err| match err {
                LookupError::NotFound { .. } => CatalogError::CannotEnrich {
                    group: draft.group.clone(),
                    title: draft.title.clone(),
                },
                other => CatalogError::UpstreamUnavailable(other),
            })?;

        draft.release_date = release_date.or(draft.release_date);
        draft.text = text.or(draft.text);
        draft.link = link.or(draft.link);
        Ok(draft)
    }
}

#[async_trait]
impl<S, L> Catalog for CatalogService<S, L>
where
    S: SongStore,
    L: MetadataLookup,
{
    async fn list_songs(&self, filter: SongFilter) -> Result<Vec<Song>, CatalogError> {
        let filter = filter.with_default_pagination();
        filter.validate()?;

        self.bounded("list songs", async {
            self.store
                .select(&filter)
                .await
                .map_err(|e| CatalogError::from_store(None, e))
        })
        .await
    }

    async fn get_song(&self, id: SongId) -> Result<Song, CatalogError> {
        self.bounded("get song", async {
            self.store
                .get(id)
                .await
                .map_err(|e| CatalogError::from_store(Some(id), e))
        })
        .await
    }

    async fn create_song(&self, draft: SongDraft) -> Result<SongId, CatalogError> {
        draft.validate()?;

        self.bounded("create song", async {
            let song = self.enrich(draft).await?.into_new_song()?;
            self.store
                .insert(&song)
                .await
                .map_err(|e| CatalogError::from_store(None, e))
        })
        .await
    }

    async fn update_song(&self, id: SongId, patch: SongPatch) -> Result<(), CatalogError> {
        patch.validate()?;

        self.bounded("update song", async {
            self.store
                .update(id, &patch)
                .await
                .map_err(|e| CatalogError::from_store(Some(id), e))
        })
        .await
    }

    async fn delete_song(&self, id: SongId) -> Result<(), CatalogError> {
        self.bounded("delete song", async {
            self.store
                .delete(id)
                .await
                .map_err(|e| CatalogError::from_store(Some(id), e))
        })
        .await
    }

    async fn song_text(
        &self,
        id: SongId,
        page: usize,
        page_size: usize,
    ) -> Result<TextPage, CatalogError> {
        self.bounded("song text", async {
            let song = self
                .store
                .get(id)
                .await
                .map_err(|e| CatalogError::from_store(Some(id), e))?;
            Ok(TextPage::paginate(&song.text, page, page_size)?)
        })
        .await
    }
}
