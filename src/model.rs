//! Person record and the request body accepted by create/update.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(id: Uuid, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Person {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Body of POST and PUT. A client-supplied `id` is tolerated but never used:
/// create mints its own id and update takes the id from the path.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBody {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
}

impl PersonBody {
    pub fn into_person(self, id: Uuid) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
