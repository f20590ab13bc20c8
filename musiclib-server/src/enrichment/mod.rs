//! External song metadata lookup
//!
//! New songs are enriched before insert: the metadata service is asked for
//! `group` + `title` and answers with release date, lyrics and link.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::models::release_date;

pub use client::HttpMetadataClient;

/// Metadata returned for a song. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    #[serde(default, with = "release_date::option")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Lookup failure
#[derive(Debug, Error)]
pub enum LookupError {
    /// Service answered, but not with success: the song cannot be enriched
    #[error("metadata service has no entry (status {status})")]
    NotFound { status: u16 },

    #[error("metadata service unavailable: {0}")]
    Unavailable(String),

    #[error("metadata request timed out")]
    Timeout,

    #[error("metadata response could not be decoded: {0}")]
    Decode(String),
}

/// Source of song metadata
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetail, LookupError>;
}

#[async_trait]
impl<T: MetadataLookup + ?Sized> MetadataLookup for Arc<T> {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetail, LookupError> {
        (**self).lookup(group, title).await
    }
}
