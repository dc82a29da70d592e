//! Mapping validation: key layout and identifier safety.

use crate::config::{EntityMapping, FieldKind};
use crate::error::ConfigError;
use std::collections::HashSet;

/// True for names usable unquoted as PostgreSQL identifiers: `[a-z_][a-z0-9_]*`, at most 63 bytes.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

pub fn validate(mapping: &EntityMapping) -> Result<(), ConfigError> {
    let fail = |reason: String| ConfigError::Mapping {
        entity: mapping.entity,
        reason,
    };

    if !is_identifier(mapping.table) {
        return Err(fail(format!("invalid table name '{}'", mapping.table)));
    }

    let keys: Vec<_> = mapping.fields.iter().filter(|f| f.primary_key).collect();
    match keys.as_slice() {
        [key] if key.kind == FieldKind::Uuid => {}
        [key] => return Err(fail(format!("primary key '{}' must be a uuid", key.field))),
        [] => return Err(fail("no primary key field".into())),
        _ => return Err(fail("composite primary keys are not supported".into())),
    }

    let mut fields = HashSet::new();
    let mut columns = HashSet::new();
    for f in mapping.fields {
        if !is_identifier(f.column) {
            return Err(fail(format!("invalid column name '{}'", f.column)));
        }
        if !fields.insert(f.field) {
            return Err(fail(format!("duplicate field '{}'", f.field)));
        }
        if !columns.insert(f.column) {
            return Err(fail(format!("duplicate column '{}'", f.column)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldMapping, PERSON};

    const fn field(field: &'static str, column: &'static str, kind: FieldKind, primary_key: bool) -> FieldMapping {
        FieldMapping {
            field,
            column,
            kind,
            primary_key,
            description: "",
        }
    }

    #[test]
    fn person_mapping_is_valid() {
        validate(&PERSON).unwrap();
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("people"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("People"));
        assert!(!is_identifier("people; drop table x"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn rejects_missing_key() {
        static FIELDS: [FieldMapping; 1] = [field("name", "name", FieldKind::Text, false)];
        let mapping = EntityMapping {
            entity: "Thing",
            table: "things",
            fields: &FIELDS,
        };
        let err = validate(&mapping).unwrap_err();
        assert!(err.to_string().contains("no primary key"));
    }

    #[test]
    fn rejects_duplicate_columns() {
        static FIELDS: [FieldMapping; 3] = [
            field("id", "id", FieldKind::Uuid, true),
            field("a", "name", FieldKind::Text, false),
            field("b", "name", FieldKind::Text, false),
        ];
        let mapping = EntityMapping {
            entity: "Thing",
            table: "things",
            fields: &FIELDS,
        };
        let err = validate(&mapping).unwrap_err();
        assert!(err.to_string().contains("duplicate column 'name'"));
    }

    #[test]
    fn rejects_text_key() {
        static FIELDS: [FieldMapping; 1] = [field("code", "code", FieldKind::Text, true)];
        let mapping = EntityMapping {
            entity: "Thing",
            table: "things",
            fields: &FIELDS,
        };
        assert!(validate(&mapping).is_err());
    }
}
