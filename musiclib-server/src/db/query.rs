//! Dynamic statement builders for the `songs` table
//!
//! - `select_songs`: AND of every present filter predicate, ordered by id
//! - `update_song`: SET list of exactly the present patch fields
//!
//! All values are bound; nothing from the caller is spliced into SQL text.

use crate::models::{SongFilter, SongId, SongPatch, ValidationError};

use super::statement::{SqlArg, Statement};

/// Column list shared by every song read
pub const SONG_COLUMNS: &str = r#"id, "group", title, release_date, text, link"#;

/// Build the filtered, ordered, optionally paginated listing query.
///
/// LIMIT/OFFSET is appended only when both `page` and `page_size` are set;
/// with just one of them every matching row is returned.
pub fn select_songs(filter: &SongFilter) -> Statement {
    let mut stmt = Statement::new(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE 1=1"));

    if let Some(group) = &filter.group {
        stmt.push(r#" AND "group" = "#)
            .push_bind(SqlArg::Text(group.clone()));
    }
    if let Some(title) = &filter.title {
        stmt.push(" AND title = ").push_bind(SqlArg::Text(title.clone()));
    }
    if let Some(text) = &filter.text {
        stmt.push(" AND text LIKE ")
            .push_bind(SqlArg::Text(format!("%{}%", escape_like(text))));
    }
    if let Some(from) = filter.date_from {
        stmt.push(" AND release_date >= ").push_bind(SqlArg::Date(from));
    }
    if let Some(to) = filter.date_to {
        stmt.push(" AND release_date <= ").push_bind(SqlArg::Date(to));
    }

    stmt.push(" ORDER BY id ASC");

    if let Some(page) = filter.pagination() {
        stmt.push(" LIMIT ")
            .push_bind(SqlArg::Int(page.limit()))
            .push(" OFFSET ")
            .push_bind(SqlArg::Int(page.offset()));
    }

    stmt
}

/// Build the partial update for `id`.
///
/// An empty patch is rejected rather than producing `UPDATE songs SET WHERE`.
pub fn update_song(id: SongId, patch: &SongPatch) -> Result<Statement, ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }

    let mut assignments: Vec<(&str, SqlArg)> = Vec::with_capacity(5);
    if let Some(group) = &patch.group {
        assignments.push((r#""group" = "#, SqlArg::Text(group.clone())));
    }
    if let Some(title) = &patch.title {
        assignments.push(("title = ", SqlArg::Text(title.clone())));
    }
    if let Some(date) = patch.release_date {
        assignments.push(("release_date = ", SqlArg::Date(date)));
    }
    if let Some(text) = &patch.text {
        assignments.push(("text = ", SqlArg::Text(text.clone())));
    }
    if let Some(link) = &patch.link {
        assignments.push(("link = ", SqlArg::Text(link.clone())));
    }

    let mut stmt = Statement::new("UPDATE songs SET ");
    for (i, (column, value)) in assignments.into_iter().enumerate() {
        if i > 0 {
            stmt.push(", ");
        }
        stmt.push(column).push_bind(value);
    }
    stmt.push(" WHERE id = ").push_bind(SqlArg::Int(id.get()));

    Ok(stmt)
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
