use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier, assigned once at insert time.
///
/// Ids are random v4 UUIDs, so an id is never handed out twice over the
/// store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Mint a fresh identifier.
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

/// A stored salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub salary: f64,
}

/// A record that has been validated but not yet stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub salary: f64,
}

impl NewRecord {
    /// A negative zero salary is stored as `0.0`.
    pub fn new(name: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            salary: salary + 0.0,
        }
    }

    /// Attach a freshly minted id.
    pub(crate) fn into_record(self) -> Record {
        Record {
            id: RecordId::generate(),
            name: self.name,
            salary: self.salary,
        }
    }
}
