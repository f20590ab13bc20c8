//! Song repository
//!
//! Handles song CRUD with:
//! - dynamic filtered listing (see `db::query::select_songs`)
//! - existence check before partial update
//! - not-found detection on read, update and delete

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use super::{DbError, SongStore};
use crate::db::query::{self, SONG_COLUMNS};
use crate::models::{NewSong, Song, SongFilter, SongId, SongPatch};

/// Song record from database
#[derive(Debug, Clone, FromRow)]
struct SongRow {
    id: i64,
    group: String,
    title: String,
    release_date: NaiveDate,
    text: String,
    link: String,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: SongId::from_store(row.id),
            group: row.group,
            title: row.title,
            release_date: row.release_date,
            text: row.text,
            link: row.link,
        }
    }
}

/// Song repository over a shared pool
#[derive(Clone)]
pub struct SongRepo {
    pool: PgPool,
}

impl SongRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: SongId) -> Result<bool, DbError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM songs WHERE id = $1)")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::query("check song exists"))?;
        Ok(exists)
    }
}

#[async_trait]
impl SongStore for SongRepo {
    async fn select(&self, filter: &SongFilter) -> Result<Vec<Song>, DbError> {
        let stmt = query::select_songs(filter);
        let rows: Vec<SongRow> = stmt
            .query_as::<SongRow>()
            .map_err(DbError::query("bind song filter"))?
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query("select songs"))?;

        Ok(rows.into_iter().map(Song::from).collect())
    }

    async fn insert(&self, song: &NewSong) -> Result<SongId, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO songs ("group", title, release_date, text, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&song.group)
        .bind(&song.title)
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::query("insert song"))?;

        Ok(SongId::from_store(id))
    }

    async fn get(&self, id: SongId) -> Result<Song, DbError> {
        let sql = format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = $1");
        let row: SongRow = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::query("select song"))?
            .ok_or_else(|| DbError::song_not_found(id))?;

        Ok(row.into())
    }

    /// Check-then-update is two statements without a transaction: a delete
    /// landing in between turns the update into a silent no-op.
    async fn update(&self, id: SongId, patch: &SongPatch) -> Result<(), DbError> {
        let stmt = query::update_song(id, patch)?;

        if !self.exists(id).await? {
            return Err(DbError::song_not_found(id));
        }

        stmt.query()
            .map_err(DbError::query("bind song patch"))?
            .execute(&self.pool)
            .await
            .map_err(DbError::query("update song"))?;
        Ok(())
    }

    async fn delete(&self, id: SongId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(DbError::query("delete song"))?;

        if result.rows_affected() == 0 {
            return Err(DbError::song_not_found(id));
        }
        Ok(())
    }
}
