//! Song endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::http::extractors::ValidSongId;
use crate::http::server::AppState;
use crate::models::{Song, SongDraft, SongFilter, SongId, SongPatch, TextPage};

/// Lyrics paging parameters
#[derive(Debug, Deserialize)]
pub struct TextQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Create song response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: SongId,
}

/// GET /songs - filtered, paginated listing
async fn list_songs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SongFilter>, QueryRejection>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let Query(filter) = query?;
    let songs = state.catalog.list_songs(filter).await?;
    Ok(Json(songs))
}

/// POST /songs - enrich from the metadata service and insert
async fn create_song(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SongDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(draft) = body?;
    let id = state.catalog.create_song(draft).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /songs/{id}
async fn get_song(
    State(state): State<Arc<AppState>>,
    ValidSongId(id): ValidSongId,
) -> Result<Json<Song>, ApiError> {
    let song = state.catalog.get_song(id).await?;
    Ok(Json(song))
}

/// PATCH /songs/{id} - overwrite the fields present in the body
async fn update_song(
    State(state): State<Arc<AppState>>,
    ValidSongId(id): ValidSongId,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(patch) = body?;
    state.catalog.update_song(id, patch).await?;
    Ok(Json(json!({})))
}

/// DELETE /songs/{id}
async fn delete_song(
    State(state): State<Arc<AppState>>,
    ValidSongId(id): ValidSongId,
) -> Result<Json<Value>, ApiError> {
    state.catalog.delete_song(id).await?;
    Ok(Json(json!({})))
}

/// GET /songs/{id}/text - one page of verses, 1 verse from verse 1 by default
async fn song_text(
    State(state): State<Arc<AppState>>,
    ValidSongId(id): ValidSongId,
    query: Result<Query<TextQuery>, QueryRejection>,
) -> Result<Json<TextPage>, ApiError> {
    let Query(params) = query?;
    let page = state
        .catalog
        .song_text(id, params.page.unwrap_or(1), params.page_size.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

/// Song routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song).patch(update_song).delete(delete_song),
        )
        .route("/songs/{id}/text", get(song_text))
}
