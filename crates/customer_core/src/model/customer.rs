//! Customer domain model.
//!
//! # Invariants
//! - `id` is assigned by the store, unique, and never reused after deletion.
//! - `name` and `age` carry no uniqueness or range constraints.

use serde::{Deserialize, Serialize};

/// Store-assigned customer identifier.
pub type CustomerId = i64;

/// One persisted customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub age: i64,
}

/// Mutable fields accepted by create and update.
///
/// Unknown fields in request payloads, including a client-supplied `id`,
/// are ignored. Missing fields decode to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDraft {
    pub name: String,
    pub age: i64,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Attaches a store-assigned id, producing the persisted shape.
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            age: self.age,
        }
    }
}
