//! Static entity-to-table mapping: which JSON field lives in which column.
//! SQL generation, DDL, row decoding and the OpenAPI schema all read from here.

/// Storage/wire kind of a mapped field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Uuid,
    Text,
}

impl FieldKind {
    /// PostgreSQL column type used in DDL.
    pub fn pg_type(self) -> &'static str {
        match self {
            FieldKind::Uuid => "UUID",
            FieldKind::Text => "TEXT",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldMapping {
    /// JSON property name (camelCase).
    pub field: &'static str,
    /// Column name in the table.
    pub column: &'static str,
    pub kind: FieldKind,
    pub primary_key: bool,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct EntityMapping {
    /// Schema/component name used in API docs.
    pub entity: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldMapping],
}

impl EntityMapping {
    pub fn primary_key(&self) -> &FieldMapping {
        // validate() guarantees exactly one primary key field
        self.fields
            .iter()
            .find(|f| f.primary_key)
            .unwrap_or(&self.fields[0])
    }

    pub fn field(&self, field: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.field(field).map(|f| f.column)
    }

    /// Non-key fields, in declaration order.
    pub fn value_fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.iter().filter(|f| !f.primary_key)
    }
}

pub const PERSON_ID: &str = "id";
pub const PERSON_FIRST_NAME: &str = "firstName";
pub const PERSON_LAST_NAME: &str = "lastName";

pub static PERSON: EntityMapping = EntityMapping {
    entity: "Person",
    table: "people",
    fields: &[
        FieldMapping {
            field: PERSON_ID,
            column: "id",
            kind: FieldKind::Uuid,
            primary_key: true,
            description: "Unique identifier of the person, assigned by the server on creation.",
        },
        FieldMapping {
            field: PERSON_FIRST_NAME,
            column: "first_name",
            kind: FieldKind::Text,
            primary_key: false,
            description: "The person's first name.",
        },
        FieldMapping {
            field: PERSON_LAST_NAME,
            column: "last_name",
            kind: FieldKind::Text,
            primary_key: false,
            description: "The person's last name.",
        },
    ],
};
