//! Schema migrations for the song catalog
//!
//! Each migration has a forward and a backward script. Applied versions are
//! recorded in `schema_migrations`, so `up` is idempotent and `down` rolls
//! back only the most recent version. Run before the server accepts traffic.

use std::str::FromStr;

use sqlx::PgPool;

/// One versioned schema step
struct Migration {
    version: i64,
    name: &'static str,
    up: &'static [&'static str],
    down: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_songs",
    up: &[
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id BIGSERIAL PRIMARY KEY,
            "group" TEXT NOT NULL,
            title TEXT NOT NULL,
            release_date DATE NOT NULL,
            text TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT ''
        )
        "#,
        r#"CREATE INDEX IF NOT EXISTS idx_songs_group_title ON songs ("group", title)"#,
        "CREATE INDEX IF NOT EXISTS idx_songs_release_date ON songs (release_date)",
    ],
    down: &[
        "DROP INDEX IF EXISTS idx_songs_release_date",
        "DROP INDEX IF EXISTS idx_songs_group_title",
        "DROP TABLE IF EXISTS songs",
    ],
}];

/// What to do with the schema at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MigrateAction {
    /// Apply every pending migration
    Up,
    /// Roll back the latest applied migration
    Down,
    /// Leave the schema alone
    #[default]
    None,
}

impl FromStr for MigrateAction {
    type Err = std::convert::Infallible;

    /// `up` / `down` in any case; anything else means "do nothing".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::None,
        })
    }
}

/// Run the requested action.
pub async fn apply(pool: &PgPool, action: MigrateAction) -> Result<(), sqlx::Error> {
    match action {
        MigrateAction::Up => up(pool).await.map(|_| ()),
        MigrateAction::Down => down(pool).await.map(|_| ()),
        MigrateAction::None => {
            tracing::debug!("migrations skipped");
            Ok(())
        }
    }
}

/// Apply all pending migrations. Returns how many ran.
pub async fn up(pool: &PgPool) -> Result<usize, sqlx::Error> {
    ensure_version_table(pool).await?;
    let current = current_version(pool).await?;

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let mut tx = pool.begin().await?;
        for statement in migration.up {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO schema_migrations (version, name) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(version = migration.version, name = migration.name, "migration applied");
        applied += 1;
    }

    if applied == 0 {
        tracing::info!(version = current, "schema up to date");
    }
    Ok(applied)
}

/// Roll back the most recent migration. Returns the reverted version, if any.
pub async fn down(pool: &PgPool) -> Result<Option<i64>, sqlx::Error> {
    ensure_version_table(pool).await?;
    let current = current_version(pool).await?;

    let Some(migration) = MIGRATIONS.iter().find(|m| m.version == current) else {
        tracing::info!("nothing to roll back");
        return Ok(None);
    };

    let mut tx = pool.begin().await?;
    for statement in migration.down {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    sqlx::query("DELETE FROM schema_migrations WHERE version = $1")
        .bind(migration.version)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!(version = migration.version, name = migration.name, "migration reverted");
    Ok(Some(migration.version))
}

/// Latest applied version, 0 when none.
pub async fn current_version(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (version,): (Option<i64>,) = sqlx::query_as("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

async fn ensure_version_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
