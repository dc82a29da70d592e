//! Person persistence: the `PersonStore` contract and its backends.
//!
//! Every operation is a single atomic step. Callers that combine steps (check
//! existence, then save) get no transaction across them.

mod memory;
mod postgres;

pub use memory::MemoryPersonStore;
pub use postgres::PgPersonStore;

use crate::config::{Settings, StoreBackend, PERSON};
use crate::error::AppError;
use crate::migration::{apply_migrations, ensure_database_exists};
use crate::model::Person;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All persons, ascending by id.
    async fn find_all(&self) -> Result<Vec<Person>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Insert, or replace every field of the record with the same id. Returns the stored value.
    async fn save(&self, person: Person) -> Result<Person, AppError>;

    /// Remove the record. Absent ids are a no-op.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Build the configured backend. For PostgreSQL this creates the pool and, when
/// `auto_migrate` is set, the database, schema and table.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn PersonStore>, AppError> {
    match settings.store {
        StoreBackend::Memory => {
            tracing::info!("using in-memory people store");
            Ok(Arc::new(MemoryPersonStore::new()))
        }
        StoreBackend::Postgres => {
            if settings.auto_migrate {
                ensure_database_exists(&settings.database_url).await?;
            }
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect(&settings.database_url)
                .await?;
            if settings.auto_migrate {
                apply_migrations(&pool, &settings.db_schema, &PERSON).await?;
            }
            tracing::info!(schema = %settings.db_schema, "using postgres people store");
            Ok(Arc::new(PgPersonStore::new(pool, &settings.db_schema)?))
        }
    }
}
