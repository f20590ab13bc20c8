//! Domain models with validation at construction
//!
//! All user input is validated before it reaches the store.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod release_date;
pub mod song;
pub mod filter;
pub mod pagination;
pub mod text_page;

pub use validation::ValidationError;
pub use song::{NewSong, Song, SongDraft, SongId, SongPatch};
pub use filter::SongFilter;
pub use pagination::Pagination;
pub use text_page::{PageError, TextPage};
