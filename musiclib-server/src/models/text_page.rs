//! Lyrics pagination by verse
//!
//! Verses are separated by a blank line (`"\n\n"`), lines inside a verse by
//! a single `'\n'`. Pages address verses 1-based: page `p` with size `s`
//! returns verses `[p, p + s)`, clamped to the verses that exist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const VERSE_DELIMITER: &str = "\n\n";
const LINE_DELIMITER: char = '\n';

/// A slice of lyrics: verses, each an ordered list of lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPage {
    pub text: Vec<Vec<String>>,
}

/// Rejected lyric page request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page must be 1 or greater")]
    ZeroPage,

    #[error("page size must be 1 or greater")]
    ZeroPageSize,

    #[error("page {page} is past the last verse ({verses} verses)")]
    PageOutOfRange { page: usize, verses: usize },
}

impl TextPage {
    /// Slice `text` into a page of verses.
    ///
    /// Empty input still has one verse (a single empty line), so page 1 of
    /// an empty text returns `[[""]]` and page 2 fails.
    pub fn paginate(text: &str, page: usize, page_size: usize) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageError::ZeroPageSize);
        }

        let verses: Vec<&str> = text.split(VERSE_DELIMITER).collect();
        if page > verses.len() {
            return Err(PageError::PageOutOfRange {
                page,
                verses: verses.len(),
            });
        }

        let start = page - 1;
        let end = start.saturating_add(page_size).min(verses.len());
        let text = verses[start..end]
            .iter()
            .map(|verse| verse.split(LINE_DELIMITER).map(str::to_owned).collect())
            .collect();

        Ok(Self { text })
    }

    /// Number of verses in this page
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
