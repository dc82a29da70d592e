//! Bootstrap DDL: create the database, schema and mapped table when missing.
//! Deployments that manage their own migrations can skip all of this.

use crate::config::{validate, EntityMapping, ENV_DATABASE_URL};
use crate::error::{AppError, ConfigError};
use crate::sql::{create_schema, create_table};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// CREATE SCHEMA / CREATE TABLE IF NOT EXISTS for `mapping` in `schema`. Idempotent.
pub async fn apply_migrations(
    pool: &PgPool,
    schema: &str,
    mapping: &EntityMapping,
) -> Result<(), AppError> {
    validate(mapping)?;
    let mut tx = pool.begin().await?;
    sqlx::query(&create_schema(schema)).execute(&mut *tx).await?;
    sqlx::query(&create_table(schema, mapping))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    tracing::info!(schema, table = mapping.table, "schema ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|name| name != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// database named in the URL (`None` when the URL names none).
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: ENV_DATABASE_URL,
        value: "<redacted>".into(),
        reason: e.to_string(),
    })?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
