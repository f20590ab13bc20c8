//! Schema migration command

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::time::Duration;

use musiclib_server::db::{close_pool, create_pool, migrations};

use crate::config::DatabaseArgs;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply all pending migrations
    Up,
    /// Roll back the latest migration
    Down,
    /// Print the current schema version
    Status,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// What to do with the schema
    #[arg(value_enum, default_value = "up")]
    pub direction: Direction,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Apply or roll back schema migrations, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.db.pool_config()?)
        .await
        .context("Failed to create database pool")?;

    let outcome = match args.direction {
        Direction::Up => migrations::up(&pool)
            .await
            .map(|applied| format!("Applied {applied} migration(s)")),
        Direction::Down => migrations::down(&pool).await.map(|reverted| match reverted {
            Some(version) => format!("Reverted migration {version}"),
            None => "Nothing to roll back".to_owned(),
        }),
        Direction::Status => migrations::current_version(&pool)
            .await
            .map(|version| format!("Schema version {version}")),
    };

    close_pool(&pool, Duration::from_secs(5)).await;
    println!("{}", outcome.context("Migration failed")?);
    Ok(())
}
