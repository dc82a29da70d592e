//! PostgreSQL store. Statements come from the entity mapping; values are bound as parameters.

use super::PersonStore;
use crate::config::{validate, EntityMapping, PERSON, PERSON_FIRST_NAME, PERSON_LAST_NAME};
use crate::error::{AppError, ConfigError};
use crate::model::Person;
use crate::sql::{person_values, Statements};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub struct PgPersonStore {
    pool: PgPool,
    mapping: &'static EntityMapping,
    statements: Statements,
    first_name_column: &'static str,
    last_name_column: &'static str,
}

impl PgPersonStore {
    /// Store over the `people` table in `schema`.
    pub fn new(pool: PgPool, schema: &str) -> Result<Self, ConfigError> {
        Self::with_mapping(pool, schema, &PERSON)
    }

    pub fn with_mapping(
        pool: PgPool,
        schema: &str,
        mapping: &'static EntityMapping,
    ) -> Result<Self, ConfigError> {
        validate(mapping)?;
        let column = |field: &str| {
            mapping.column(field).ok_or_else(|| ConfigError::Mapping {
                entity: mapping.entity,
                reason: format!("missing field '{}'", field),
            })
        };
        Ok(PgPersonStore {
            first_name_column: column(PERSON_FIRST_NAME)?,
            last_name_column: column(PERSON_LAST_NAME)?,
            statements: Statements::new(schema, mapping),
            mapping,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn person_from_row(&self, row: &PgRow) -> Result<Person, sqlx::Error> {
        Ok(Person {
            id: row.try_get(self.mapping.primary_key().column)?,
            first_name: row.try_get(self.first_name_column)?,
            last_name: row.try_get(self.last_name_column)?,
        })
    }
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        let sql = &self.statements.select_all;
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let people = rows
            .iter()
            .map(|r| self.person_from_row(r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(people)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        let sql = &self.statements.select_by_id;
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query(sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| self.person_from_row(&r)).transpose()?)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = &self.statements.exists_by_id;
        tracing::debug!(sql = %sql, %id, "query");
        let exists = sqlx::query_scalar::<_, bool>(sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn save(&self, person: Person) -> Result<Person, AppError> {
        let sql = &self.statements.upsert;
        tracing::debug!(sql = %sql, id = %person.id, "query");
        let mut query = sqlx::query(sql);
        for value in person_values(&person, self.mapping)? {
            query = value.bind(query);
        }
        let row = query.fetch_one(&self.pool).await?;
        Ok(self.person_from_row(&row)?)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let sql = &self.statements.delete_by_id;
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
