//! In-memory store and metadata fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use musiclib_server::db::{DbError, SongStore};
use musiclib_server::enrichment::{LookupError, MetadataLookup, SongDetail};
use musiclib_server::models::{NewSong, Song, SongFilter, SongId, SongPatch};
use musiclib_server::service::{Catalog, CatalogService};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_song(group: &str, title: &str, released: NaiveDate, text: &str) -> NewSong {
    NewSong {
        group: group.into(),
        title: title.into(),
        release_date: released,
        text: text.into(),
        link: format!("https://example.test/{group}/{title}"),
    }
}

/// Song store backed by a map, with the same filter semantics as the SQL store.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<i64, Song>>,
    next_id: Mutex<i64>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long first.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn seed(&self, song: NewSong) -> SongId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = SongId::new(*next).unwrap();
        self.rows.lock().unwrap().insert(id.get(), song.into_song(id));
        id
    }

    pub fn snapshot(&self) -> Vec<Song> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn matches(filter: &SongFilter, song: &Song) -> bool {
        filter.group.as_ref().map_or(true, |g| &song.group == g)
            && filter.title.as_ref().map_or(true, |t| &song.title == t)
            && filter.text.as_ref().map_or(true, |t| song.text.contains(t.as_str()))
            && filter.date_from.map_or(true, |d| song.release_date >= d)
            && filter.date_to.map_or(true, |d| song.release_date <= d)
    }
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn select(&self, filter: &SongFilter) -> Result<Vec<Song>, DbError> {
        self.pause().await;
        let rows = self.rows.lock().unwrap();
        let matching = rows.values().filter(|s| Self::matches(filter, s)).cloned();

        Ok(match filter.pagination() {
            Some(page) => matching
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect(),
            None => matching.collect(),
        })
    }

    async fn insert(&self, song: &NewSong) -> Result<SongId, DbError> {
        self.pause().await;
        song.validate()?;
        Ok(self.seed(song.clone()))
    }

    async fn get(&self, id: SongId) -> Result<Song, DbError> {
        self.pause().await;
        self.rows
            .lock()
            .unwrap()
            .get(&id.get())
            .cloned()
            .ok_or_else(|| DbError::song_not_found(id))
    }

    async fn update(&self, id: SongId, patch: &SongPatch) -> Result<(), DbError> {
        self.pause().await;
        patch.validate()?;
        let mut rows = self.rows.lock().unwrap();
        let song = rows
            .get_mut(&id.get())
            .ok_or_else(|| DbError::song_not_found(id))?;
        patch.apply_to(song);
        Ok(())
    }

    async fn delete(&self, id: SongId) -> Result<(), DbError> {
        self.pause().await;
        self.rows
            .lock()
            .unwrap()
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| DbError::song_not_found(id))
    }
}

/// What the fake metadata service answers for unknown songs
#[derive(Clone, Copy)]
pub enum Miss {
    NotFound,
    Unavailable,
    Timeout,
}

/// Metadata service with a fixed table of known songs
pub struct FakeLookup {
    known: HashMap<(String, String), SongDetail>,
    miss: Miss,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self {
            known: HashMap::new(),
            miss: Miss::NotFound,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(miss: Miss) -> Self {
        Self {
            miss,
            ..Self::new()
        }
    }

    pub fn with(mut self, group: &str, title: &str, detail: SongDetail) -> Self {
        self.known.insert((group.into(), title.into()), detail);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataLookup for FakeLookup {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetail, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((group.to_owned(), title.to_owned()));

        match self.known.get(&(group.to_owned(), title.to_owned())) {
            Some(detail) => Ok(detail.clone()),
            None => Err(match self.miss {
                Miss::NotFound => LookupError::NotFound { status: 404 },
                Miss::Unavailable => LookupError::Unavailable("connection refused".into()),
                Miss::Timeout => LookupError::Timeout,
            }),
        }
    }
}

pub fn detail(released: NaiveDate, text: &str, link: &str) -> SongDetail {
    SongDetail {
        release_date: Some(released),
        text: Some(text.into()),
        link: Some(link.into()),
    }
}

/// Catalog over shared fakes, so tests can inspect them afterwards.
pub fn catalog(
    store: Arc<MemoryStore>,
    lookup: Arc<FakeLookup>,
) -> CatalogService<Arc<MemoryStore>, Arc<FakeLookup>> {
    CatalogService::new(store, lookup)
}

pub fn shared_catalog(store: Arc<MemoryStore>, lookup: Arc<FakeLookup>) -> Arc<dyn Catalog> {
    Arc::new(catalog(store, lookup))
}
