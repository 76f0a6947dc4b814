//! University taxonomy entities
//!
//! The catalog is a four-level hierarchy: University → Stream → Class →
//! Subject. Subjects are plain name strings, not entities: two classes'
//! "Physics" subjects carry no shared identity beyond the name.

use serde::{Deserialize, Serialize};

/// A class within a stream, holding its subject names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub subjects: Vec<String>,
}

/// A stream within a university (e.g. Engineering, Commerce)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub classes: Vec<Class>,
}

/// A university, the root of the taxonomy
///
/// Name uniqueness within the catalog is enforced by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    /// Server-assigned identifier
    #[serde(default, rename = "_id")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl University {
    /// Find a stream by name
    pub fn stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

impl Stream {
    /// Find a class by name
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }
}
