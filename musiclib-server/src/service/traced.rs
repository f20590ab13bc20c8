//! Logging decorators
//!
//! Each wrapper forwards to the inner implementation and records one event
//! per call: operation, parameters, outcome and elapsed time. Successes and
//! caller mistakes go to `debug`, system failures to `error`.

use std::fmt;
use std::time::Instant;

use async_trait::async_trait;

use super::{Catalog, CatalogError};
use crate::db::{DbError, SongStore};
use crate::enrichment::{LookupError, MetadataLookup, SongDetail};
use crate::models::{NewSong, Song, SongDraft, SongFilter, SongId, SongPatch, TextPage};

fn record<T, E>(
    layer: &'static str,
    operation: &'static str,
    params: &dyn fmt::Debug,
    outcome: &Result<T, E>,
    summary: impl FnOnce(&T) -> String,
    expected: impl FnOnce(&E) -> bool,
    started: Instant,
) where
    E: fmt::Display,
{
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(value) => tracing::debug!(
            layer,
            operation,
            params = ?params,
            result = %summary(value),
            elapsed_ms,
            "ok"
        ),
        Err(err) if expected(err) => tracing::debug!(
            layer,
            operation,
            params = ?params,
            error = %err,
            elapsed_ms,
            "rejected"
        ),
        Err(err) => tracing::error!(
            layer,
            operation,
            params = ?params,
            error = %err,
            elapsed_ms,
            "failed"
        ),
    }
}

fn count(songs: &Vec<Song>) -> String {
    format!("{} songs", songs.len())
}

fn unit(_: &()) -> String {
    "done".to_owned()
}

/// Logs every [`SongStore`] call.
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn store_expected(err: &DbError) -> bool {
    matches!(err, DbError::NotFound { .. } | DbError::Invalid(_))
}

#[async_trait]
impl<S: SongStore> SongStore for TracedStore<S> {
    async fn select(&self, filter: &SongFilter) -> Result<Vec<Song>, DbError> {
        let started = Instant::now();
        let outcome = self.inner.select(filter).await;
        record("store", "select", filter, &outcome, count, store_expected, started);
        outcome
    }

    async fn insert(&self, song: &NewSong) -> Result<SongId, DbError> {
        let started = Instant::now();
        let outcome = self.inner.insert(song).await;
        record("store", "insert", song, &outcome, |id| format!("id {id}"), store_expected, started);
        outcome
    }

    async fn get(&self, id: SongId) -> Result<Song, DbError> {
        let started = Instant::now();
        let outcome = self.inner.get(id).await;
        record("store", "get", &id, &outcome, |s| format!("{} - {}", s.group, s.title), store_expected, started);
        outcome
    }

    async fn update(&self, id: SongId, patch: &SongPatch) -> Result<(), DbError> {
        let started = Instant::now();
        let outcome = self.inner.update(id, patch).await;
        record("store", "update", &(id, patch), &outcome, unit, store_expected, started);
        outcome
    }

    async fn delete(&self, id: SongId) -> Result<(), DbError> {
        let started = Instant::now();
        let outcome = self.inner.delete(id).await;
        record("store", "delete", &id, &outcome, unit, store_expected, started);
        outcome
    }
}

/// Logs every [`MetadataLookup`] call.
pub struct TracedLookup<L> {
    inner: L,
}

impl<L> TracedLookup<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: MetadataLookup> MetadataLookup for TracedLookup<L> {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetail, LookupError> {
        let started = Instant::now();
        let outcome = self.inner.lookup(group, title).await;
        record(
            "lookup",
            "info",
            &(group, title),
            &outcome,
            |d| format!("release date {:?}", d.release_date),
            |e| matches!(e, LookupError::NotFound { .. }),
            started,
        );
        outcome
    }
}

/// Logs every [`Catalog`] call.
pub struct TracedCatalog<C> {
    inner: C,
}

impl<C> TracedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Catalog> Catalog for TracedCatalog<C> {
    async fn list_songs(&self, filter: SongFilter) -> Result<Vec<Song>, CatalogError> {
        let started = Instant::now();
        let params = filter.clone();
        let outcome = self.inner.list_songs(filter).await;
        record("catalog", "list_songs", &params, &outcome, count, CatalogError::is_caller_error, started);
        outcome
    }

    async fn get_song(&self, id: SongId) -> Result<Song, CatalogError> {
        let started = Instant::now();
        let outcome = self.inner.get_song(id).await;
        record("catalog", "get_song", &id, &outcome, |s| format!("{} - {}", s.group, s.title), CatalogError::is_caller_error, started);
        outcome
    }

    async fn create_song(&self, draft: SongDraft) -> Result<SongId, CatalogError> {
        let started = Instant::now();
        let params = (draft.group.clone(), draft.title.clone());
        let outcome = self.inner.create_song(draft).await;
        record("catalog", "create_song", &params, &outcome, |id| format!("id {id}"), CatalogError::is_caller_error, started);
        outcome
    }

    async fn update_song(&self, id: SongId, patch: SongPatch) -> Result<(), CatalogError> {
        let started = Instant::now();
        let params = (id, patch.clone());
        let outcome = self.inner.update_song(id, patch).await;
        record("catalog", "update_song", &params, &outcome, unit, CatalogError::is_caller_error, started);
        outcome
    }

    async fn delete_song(&self, id: SongId) -> Result<(), CatalogError> {
        let started = Instant::now();
        let outcome = self.inner.delete_song(id).await;
        record("catalog", "delete_song", &id, &outcome, unit, CatalogError::is_caller_error, started);
        outcome
    }

    async fn song_text(
        &self,
        id: SongId,
        page: usize,
        page_size: usize,
    ) -> Result<TextPage, CatalogError> {
        let started = Instant::now();
        let outcome = self.inner.song_text(id, page, page_size).await;
        record(
            "catalog",
            "song_text",
            &(id, page, page_size),
            &outcome,
            |p| format!("{} verses", p.len()),
            CatalogError::is_caller_error,
            started,
        );
        outcome
    }
}
