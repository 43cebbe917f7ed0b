//! Person value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PersonId;

/// A participant in the bill split.
///
/// People are created on demand and referenced from menu items by id only.
/// Removing a person must also strip the id from every item's assignment
/// list; that cascade lives on the session snapshot, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    /// Display hint only, never load-bearing.
    color: String,
}

impl Person {
    /// Creates a person with a fresh id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Returns the person id.
    pub fn id(&self) -> &PersonId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display color.
    pub fn color(&self) -> &str {
        &self.color
    }
}
