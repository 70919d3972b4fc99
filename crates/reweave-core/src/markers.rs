//! Markers: ordered, opaque facts attached to nodes and padding wrappers
//!
//! A [`Marker`] is any value with an identifier; equality and hashing of both
//! markers and [`Markers`] sets go by identifier only. The empty set is a
//! canonical singleton so that untouched subtrees stay reference-equal.
//!
//! # Example
//!
//! ```rust,ignore
//! use reweave_core::markers::{Markers, SearchResult};
//!
//! let markers = Markers::empty().add(SearchResult::new("found it"));
//! assert!(markers.find_first::<SearchResult>().is_some());
//! ```

use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

pub use crate::identity::{TreeId, random_id};
use crate::identity::RefEq;

/// Downcasting support for trait objects
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An opaque fact attached to a node
pub trait Marker: AsAny + Debug + Send + Sync + 'static {
    fn id(&self) -> TreeId;
}

/// The concrete marker behind a shared trait object
pub fn downcast<M: Marker>(marker: &Arc<dyn Marker>) -> Option<&M> {
    let marker: &dyn Marker = &**marker;
    marker.as_any().downcast_ref::<M>()
}

#[derive(Debug)]
struct MarkersInner {
    id: TreeId,
    markers: Vec<Arc<dyn Marker>>,
}

static EMPTY: LazyLock<Markers> = LazyLock::new(|| {
    Markers(Arc::new(MarkersInner {
        id: random_id(),
        markers: Vec::new(),
    }))
});

/// An ordered set of markers
#[derive(Debug, Clone)]
pub struct Markers(Arc<MarkersInner>);

impl Markers {
    /// The canonical empty set
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Build a set from a list; an empty list yields the canonical empty set
    pub fn build(markers: Vec<Arc<dyn Marker>>) -> Self {
        if markers.is_empty() {
            Self::empty()
        } else {
            Markers(Arc::new(MarkersInner {
                id: random_id(),
                markers,
            }))
        }
    }

    pub fn id(&self) -> TreeId {
        self.0.id
    }

    pub fn markers(&self) -> &[Arc<dyn Marker>] {
        &self.0.markers
    }

    pub fn is_empty(&self) -> bool {
        self.0.markers.is_empty()
    }

    /// Replace the marker list, keeping this set's identifier.
    ///
    /// Returns `self` unchanged when every marker is the same allocation.
    pub fn with_markers(&self, markers: Vec<Arc<dyn Marker>>) -> Self {
        if markers.ref_eq(&self.0.markers) {
            return self.clone();
        }
        if markers.is_empty() {
            return Self::empty();
        }
        Markers(Arc::new(MarkersInner {
            id: self.0.id,
            markers,
        }))
    }

    /// Append a marker
    pub fn add<M: Marker>(&self, marker: M) -> Self {
        let mut markers = self.0.markers.clone();
        markers.push(Arc::new(marker));
        self.with_markers(markers)
    }

    /// Drop every marker of type `M`
    pub fn remove<M: Marker>(&self) -> Self {
        if self.find_first::<M>().is_none() {
            return self.clone();
        }
        let markers = self
            .0
            .markers
            .iter()
            .filter(|m| downcast::<M>(m).is_none())
            .cloned()
            .collect();
        self.with_markers(markers)
    }

    /// Replace the first marker of type `M` with `remap(existing, identity)`, or append `identity`
    pub fn compute_by_type<M: Marker>(&self, identity: M, remap: impl FnOnce(&M, M) -> M) -> Self {
        match self.0.markers.iter().position(|m| downcast::<M>(m).is_some()) {
            Some(index) => {
                let mut markers = self.0.markers.clone();
                let updated = match downcast::<M>(&markers[index]) {
                    Some(existing) => remap(existing, identity),
                    None => identity,
                };
                markers[index] = Arc::new(updated);
                self.with_markers(markers)
            }
            None => self.add(identity),
        }
    }

    /// Replace the first marker of type `M`, or append it
    pub fn set_by_type<M: Marker>(&self, marker: M) -> Self {
        self.compute_by_type(marker, |_, replacement| replacement)
    }

    pub fn find_first<M: Marker>(&self) -> Option<&M> {
        self.0.markers.iter().find_map(downcast::<M>)
    }

    pub fn find_all<M: Marker>(&self) -> Vec<&M> {
        self.0.markers.iter().filter_map(downcast::<M>).collect()
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::empty()
    }
}

impl RefEq for Markers {
    fn ref_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Markers {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Markers {}

impl Hash for Markers {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

/// Records that a parser failed on (part of) a source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExceptionResult {
    pub id: TreeId,
    pub parser_type: String,
    pub exception_type: String,
    pub message: String,
}

impl ParseExceptionResult {
    pub fn new(
        parser_type: impl Into<String>,
        exception_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: random_id(),
            parser_type: parser_type.into(),
            exception_type: exception_type.into(),
            message: message.into(),
        }
    }
}

impl Marker for ParseExceptionResult {
    fn id(&self) -> TreeId {
        self.id
    }
}

/// Flags a node as matched by a search; printers render it as `~~>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: TreeId,
    pub description: Option<String>,
}

impl SearchResult {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: random_id(),
            description: Some(description.into()),
        }
    }

    pub fn found() -> Self {
        Self {
            id: random_id(),
            description: None,
        }
    }
}

impl Marker for SearchResult {
    fn id(&self) -> TreeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_canonical() {
        assert!(Markers::empty().ref_eq(&Markers::empty()));
        assert!(Markers::build(Vec::new()).ref_eq(&Markers::empty()));
    }

    #[test]
    fn test_find_and_remove_by_type() {
        let markers = Markers::empty()
            .add(SearchResult::new("first"))
            .add(ParseExceptionResult::new("brace", "Unexpected", "boom"))
            .add(SearchResult::found());

        assert_eq!(markers.find_all::<SearchResult>().len(), 2);
        assert_eq!(
            markers.find_first::<SearchResult>().and_then(|m| m.description.as_deref()),
            Some("first")
        );

        let removed = markers.remove::<SearchResult>();
        assert!(removed.find_first::<SearchResult>().is_none());
        assert_eq!(removed.markers().len(), 1);
        assert_eq!(removed, markers, "identity survives edits");
    }

    #[test]
    fn test_compute_by_type_replaces_in_place() {
        let markers = Markers::empty().add(SearchResult::new("a"));
        let computed = markers.compute_by_type(SearchResult::new("b"), |old, new| SearchResult {
            id: old.id,
            description: Some(format!(
                "{}{}",
                old.description.clone().unwrap_or_default(),
                new.description.unwrap_or_default()
            )),
        });
        assert_eq!(computed.markers().len(), 1);
        assert_eq!(
            computed.find_first::<SearchResult>().and_then(|m| m.description.as_deref()),
            Some("ab")
        );
    }

    #[test]
    fn test_with_same_markers_short_circuits() {
        let markers = Markers::empty().add(SearchResult::found());
        let same = markers.with_markers(markers.markers().to_vec());
        assert!(same.ref_eq(&markers));
        assert!(markers.with_markers(Vec::new()).ref_eq(&Markers::empty()));
    }
}
