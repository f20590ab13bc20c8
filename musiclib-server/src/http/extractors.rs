//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{SongId, ValidationError};

/// Extract and validate a song id from path
pub struct ValidSongId(pub SongId);

impl<S> FromRequestParts<S> for ValidSongId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let malformed = || {
            ApiError::from(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        };

        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| malformed())?;

        let id = raw.parse::<i64>().map_err(|_| malformed())?;

        Ok(Self(SongId::new(id)?))
    }
}
