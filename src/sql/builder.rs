//! Builds parameterized SELECT, upsert, DELETE and DDL from an entity mapping.

use crate::config::EntityMapping;

/// Quote identifier for PostgreSQL (safe: only from mapping/settings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

fn column_list(mapping: &EntityMapping) -> String {
    mapping
        .fields
        .iter()
        .map(|f| quoted(f.column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Statements for one mapped table. Built once per store; the primary key is
/// always `$1` in keyed statements and params follow mapping field order in `upsert`.
#[derive(Clone, Debug)]
pub struct Statements {
    pub select_all: String,
    pub select_by_id: String,
    pub exists_by_id: String,
    pub upsert: String,
    pub delete_by_id: String,
}

impl Statements {
    pub fn new(schema: &str, mapping: &EntityMapping) -> Self {
        let table = qualified_table(schema, mapping.table);
        let pk = quoted(mapping.primary_key().column);
        let cols = column_list(mapping);

        let placeholders = (1..=mapping.fields.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        let sets = mapping
            .value_fields()
            .map(|f| format!("{0} = EXCLUDED.{0}", quoted(f.column)))
            .collect::<Vec<_>>()
            .join(", ");
        let conflict = if sets.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", sets)
        };

        Statements {
            select_all: format!("SELECT {} FROM {} ORDER BY {}", cols, table, pk),
            select_by_id: format!("SELECT {} FROM {} WHERE {} = $1", cols, table, pk),
            exists_by_id: format!("SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)", table, pk),
            upsert: format!(
                "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {} RETURNING {}",
                table, cols, placeholders, pk, conflict, cols
            ),
            delete_by_id: format!("DELETE FROM {} WHERE {} = $1", table, pk),
        }
    }
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

/// CREATE TABLE IF NOT EXISTS with one column per mapped field; value columns are NOT NULL.
pub fn create_table(schema: &str, mapping: &EntityMapping) -> String {
    let table = qualified_table(schema, mapping.table);
    let columns = mapping
        .fields
        .iter()
        .map(|f| {
            let constraint = if f.primary_key { "PRIMARY KEY" } else { "NOT NULL" };
            format!("{} {} {}", quoted(f.column), f.kind.pg_type(), constraint)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table, columns)
}
