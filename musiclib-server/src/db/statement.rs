//! Parameterized SQL statement: text plus ordered bind arguments
//!
//! Placeholders are numbered (`$1`, `$2`, ...) in the order values are
//! pushed. Values never enter the SQL text.

use std::fmt::Write as _;

use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Arguments, FromRow, Postgres};

/// A bound statement argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Date(NaiveDate),
    Int(i64),
}

/// SQL text and its arguments, in placeholder order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    args: Vec<SqlArg>,
}

impl Statement {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_owned(),
            args: Vec::new(),
        }
    }

    /// Append raw SQL. Only ever called with literals from this crate.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append the next placeholder and record its value.
    pub fn push_bind(&mut self, arg: SqlArg) -> &mut Self {
        self.args.push(arg);
        // writing to a String cannot fail
        let _ = write!(self.sql, "${}", self.args.len());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    /// Encode every argument, in placeholder order.
    pub fn arguments(&self) -> Result<PgArguments, sqlx::Error> {
        let mut args = PgArguments::default();
        for arg in &self.args {
            let added = match arg {
                SqlArg::Text(s) => args.add(s.as_str()),
                SqlArg::Date(d) => args.add(*d),
                SqlArg::Int(n) => args.add(*n),
            };
            added.map_err(sqlx::Error::Encode)?;
        }
        Ok(args)
    }

    /// Build an executable sqlx query with every argument bound.
    pub fn query(&self) -> Result<Query<'_, Postgres, PgArguments>, sqlx::Error> {
        Ok(sqlx::query_with(&self.sql, self.arguments()?))
    }

    /// Like [`Statement::query`], mapping rows into `T`.
    pub fn query_as<T>(&self) -> Result<QueryAs<'_, Postgres, T, PgArguments>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        Ok(sqlx::query_as_with(&self.sql, self.arguments()?))
    }
}
