//! Values of mapped fields, in the order statements expect them.

use crate::config::{EntityMapping, FieldKind, PERSON_FIRST_NAME, PERSON_ID, PERSON_LAST_NAME};
use crate::error::ConfigError;
use crate::model::Person;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Uuid(uuid::Uuid),
    Text(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn bind<'q>(self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments>
    where
        'a: 'q,
    {
        match self {
            FieldValue::Uuid(u) => query.bind(u),
            FieldValue::Text(s) => query.bind(s),
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Uuid(_) => FieldKind::Uuid,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }
}

/// One value per mapped field, in mapping order. Fails when the mapping names a
/// field the Person record does not have or declares a different kind.
pub fn person_values<'a>(
    person: &'a Person,
    mapping: &EntityMapping,
) -> Result<Vec<FieldValue<'a>>, ConfigError> {
    mapping
        .fields
        .iter()
        .map(|f| {
            let value = match f.field {
                PERSON_ID => FieldValue::Uuid(person.id),
                PERSON_FIRST_NAME => FieldValue::Text(&person.first_name),
                PERSON_LAST_NAME => FieldValue::Text(&person.last_name),
                other => {
                    return Err(ConfigError::Mapping {
                        entity: mapping.entity,
                        reason: format!("unknown field '{}'", other),
                    })
                }
            };
            if value.kind() != f.kind {
                return Err(ConfigError::Mapping {
                    entity: mapping.entity,
                    reason: format!("field '{}' declared as {:?}", f.field, f.kind),
                });
            }
            Ok(value)
        })
        .collect()
}
