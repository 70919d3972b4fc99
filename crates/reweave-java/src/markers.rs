//! Markers specific to the J catalog

use reweave_core::{Marker, Space, TreeId, random_id};

/// A separator after the last element of a list, e.g. `foo(a, b,)`.
///
/// Attached to the last element's right padding. `suffix` is the space between
/// the comma and the closing delimiter.
#[derive(Debug, Clone)]
pub struct TrailingComma {
    pub id: TreeId,
    pub suffix: Space,
}

impl TrailingComma {
    pub fn new(suffix: Space) -> Self {
        Self {
            id: random_id(),
            suffix,
        }
    }

    pub fn with_suffix(&self, suffix: Space) -> Self {
        Self {
            id: self.id,
            suffix,
        }
    }
}

impl Marker for TrailingComma {
    fn id(&self) -> TreeId {
        self.id
    }
}

/// An explicit `;` after a statement in a dialect where it is optional
#[derive(Debug, Clone)]
pub struct Semicolon {
    pub id: TreeId,
}

impl Semicolon {
    pub fn new() -> Self {
        Self { id: random_id() }
    }
}

impl Default for Semicolon {
    fn default() -> Self {
        Self::new()
    }
}

impl Marker for Semicolon {
    fn id(&self) -> TreeId {
        self.id
    }
}
