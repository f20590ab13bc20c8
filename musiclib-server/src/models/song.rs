//! Song records, insert payloads and partial updates

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::require_text;
use super::{release_date, ValidationError};

/// Maximum length for group and title
const MAX_NAME_LEN: usize = 255;

/// Store-generated song identifier (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(i64);

impl SongId {
    /// Wrap a raw id, rejecting zero and negatives.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw < 1 {
            return Err(ValidationError::NotPositive { field: "id" });
        }
        Ok(Self(raw))
    }

    /// Trust an id read back from the store (BIGSERIAL starts at 1).
    pub(crate) fn from_store(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Song as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub group: String,
    pub title: String,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    /// Lyrics: verses separated by a blank line, lines by a single newline
    pub text: String,
    pub link: String,
}

/// Insert payload. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl NewSong {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("group", &self.group, MAX_NAME_LEN)?;
        require_text("title", &self.title, MAX_NAME_LEN)?;
        Ok(())
    }

    /// Attach the store-generated id.
    pub fn into_song(self, id: SongId) -> Song {
        Song {
            id,
            group: self.group,
            title: self.title,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Create request. Only group and title are required; the rest may be
/// filled in by the metadata lookup, which wins over client values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDraft {
    pub group: String,
    #[serde(alias = "song")]
    pub title: String,
    #[serde(
        default,
        with = "release_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SongDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("group", &self.group, MAX_NAME_LEN)?;
        require_text("title", &self.title, MAX_NAME_LEN)?;
        Ok(())
    }

    /// Finish the insert payload; a release date is mandatory by now.
    pub fn into_new_song(self) -> Result<NewSong, ValidationError> {
        let release_date = self
            .release_date
            .ok_or(ValidationError::Missing { field: "releaseDate" })?;
        Ok(NewSong {
            group: self.group,
            title: self.title,
            release_date,
            text: self.text.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
        })
    }
}

/// Partial update. Present fields overwrite, absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        with = "release_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SongPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.title.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }

    /// Reject empty patches and blank group/title values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if let Some(group) = &self.group {
            require_text("group", group, MAX_NAME_LEN)?;
        }
        if let Some(title) = &self.title {
            require_text("title", title, MAX_NAME_LEN)?;
        }
        Ok(())
    }

    /// Apply to an in-memory song (used by non-SQL stores).
    pub fn apply_to(&self, song: &mut Song) {
        if let Some(group) = &self.group {
            song.group = group.clone();
        }
        if let Some(title) = &self.title {
            song.title = title.clone();
        }
        if let Some(date) = self.release_date {
            song.release_date = date;
        }
        if let Some(text) = &self.text {
            song.text = text.clone();
        }
        if let Some(link) = &self.link {
            song.link = link.clone();
        }
    }
}
