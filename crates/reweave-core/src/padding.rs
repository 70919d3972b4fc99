//! Padding wrappers and list reconciliation
//!
//! Formatting between structural elements is bound to the boundary, not to the
//! elements: [`RightPadded`] carries the space after an element (before its
//! separator), [`LeftPadded`] the space before it, and [`Container`] a
//! delimited list of right-padded elements plus the space before the opening
//! delimiter. All `with_*` methods hand back `self` when nothing changed.
//!
//! [`RightPadded::with_elements`] maps an edited plain list back onto the
//! previous padded list by element id, so removed, reordered or replaced
//! elements keep the formatting of whatever survived and new elements start
//! with empty formatting.

use std::collections::HashMap;

use crate::error::ReweaveError;
use crate::identity::{RefEq, TreeId};
use crate::markers::Markers;
use crate::result::Result;
use crate::space::Space;
use crate::tree::Tree;

/// An element followed by the space before its separator or closing delimiter
#[derive(Debug, Clone)]
pub struct RightPadded<T> {
    element: T,
    after: Space,
    markers: Markers,
}

impl<T: Clone + RefEq> RightPadded<T> {
    pub fn new(element: T, after: Space, markers: Markers) -> Self {
        Self {
            element,
            after,
            markers,
        }
    }

    /// Wrap with empty formatting
    pub fn build(element: T) -> Self {
        Self::new(element, Space::empty(), Markers::empty())
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn after(&self) -> &Space {
        &self.after
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn with_element(&self, element: T) -> Self {
        if element.ref_eq(&self.element) {
            return self.clone();
        }
        Self::new(element, self.after.clone(), self.markers.clone())
    }

    pub fn with_after(&self, after: Space) -> Self {
        if after.ref_eq(&self.after) {
            return self.clone();
        }
        Self::new(self.element.clone(), after, self.markers.clone())
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        if markers.ref_eq(&self.markers) {
            return self.clone();
        }
        Self::new(self.element.clone(), self.after.clone(), markers)
    }

    /// Unwrap a padded list
    pub fn get_elements(padded: &[RightPadded<T>]) -> Vec<T> {
        padded.iter().map(|p| p.element.clone()).collect()
    }

    /// Apply `f` to every element, keeping the padding
    pub fn map_elements<E>(
        padded: &[RightPadded<T>],
        mut f: impl FnMut(&T) -> std::result::Result<T, E>,
    ) -> std::result::Result<Vec<RightPadded<T>>, E> {
        padded
            .iter()
            .map(|p| f(&p.element).map(|e| p.with_element(e)))
            .collect()
    }
}

impl<T: Tree> RightPadded<T> {
    /// Reconcile an edited element list with the previous padded list.
    ///
    /// Elements whose id appears in `before` keep that wrapper's `after` space and
    /// markers; elements with a new id are wrapped with empty formatting. The
    /// result follows the order of `elements`.
    pub fn with_elements(before: &[RightPadded<T>], elements: Vec<T>) -> Result<Vec<RightPadded<T>>> {
        if before.len() == elements.len()
            && before.iter().zip(&elements).all(|(p, e)| p.element.ref_eq(e))
        {
            return Ok(before.to_vec());
        }
        if elements.is_empty() {
            return Ok(Vec::new());
        }

        tracing::trace!(
            before = before.len(),
            after = elements.len(),
            "rebuilding padded element list"
        );

        let mut by_id: HashMap<TreeId, &RightPadded<T>> = HashMap::with_capacity(before.len());
        for padded in before {
            if by_id.insert(padded.element.id(), padded).is_some() {
                return Err(ReweaveError::duplicate_id(padded.element.id()));
            }
        }

        Ok(elements
            .into_iter()
            .map(|element| match by_id.get(&element.id()) {
                Some(found) => found.with_element(element),
                None => RightPadded::build(element),
            })
            .collect())
    }
}

impl<T: RefEq> RefEq for RightPadded<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        self.element.ref_eq(&other.element)
            && self.after.ref_eq(&other.after)
            && self.markers.ref_eq(&other.markers)
    }
}

/// An element preceded by a space, e.g. the `= value` of an assignment
#[derive(Debug, Clone)]
pub struct LeftPadded<T> {
    before: Space,
    element: T,
    markers: Markers,
}

impl<T: Clone + RefEq> LeftPadded<T> {
    pub fn new(before: Space, element: T, markers: Markers) -> Self {
        Self {
            before,
            element,
            markers,
        }
    }

    pub fn build(element: T) -> Self {
        Self::new(Space::empty(), element, Markers::empty())
    }

    pub fn before(&self) -> &Space {
        &self.before
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn with_before(&self, before: Space) -> Self {
        if before.ref_eq(&self.before) {
            return self.clone();
        }
        Self::new(before, self.element.clone(), self.markers.clone())
    }

    pub fn with_element(&self, element: T) -> Self {
        if element.ref_eq(&self.element) {
            return self.clone();
        }
        Self::new(self.before.clone(), element, self.markers.clone())
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        if markers.ref_eq(&self.markers) {
            return self.clone();
        }
        Self::new(self.before.clone(), self.element.clone(), markers)
    }
}

impl<T: RefEq> RefEq for LeftPadded<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        self.before.ref_eq(&other.before)
            && self.element.ref_eq(&other.element)
            && self.markers.ref_eq(&other.markers)
    }
}

/// A delimited list: `before` is the space ahead of the opening delimiter
#[derive(Debug, Clone)]
pub struct Container<T> {
    before: Space,
    elements: Vec<RightPadded<T>>,
    markers: Markers,
}

impl<T: Clone + RefEq> Container<T> {
    pub fn build(before: Space, elements: Vec<RightPadded<T>>, markers: Markers) -> Self {
        Self {
            before,
            elements,
            markers,
        }
    }

    /// No elements and empty formatting
    pub fn empty() -> Self {
        Self::build(Space::empty(), Vec::new(), Markers::empty())
    }

    pub fn before(&self) -> &Space {
        &self.before
    }

    /// The padded elements
    pub fn padded(&self) -> &[RightPadded<T>] {
        &self.elements
    }

    /// The bare elements
    pub fn elements(&self) -> Vec<T> {
        RightPadded::get_elements(&self.elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn with_before(&self, before: Space) -> Self {
        if before.ref_eq(&self.before) {
            return self.clone();
        }
        Self::build(before, self.elements.clone(), self.markers.clone())
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        if markers.ref_eq(&self.markers) {
            return self.clone();
        }
        Self::build(self.before.clone(), self.elements.clone(), markers)
    }

    pub fn with_padded(&self, elements: Vec<RightPadded<T>>) -> Self {
        if elements.ref_eq(&self.elements) {
            return self.clone();
        }
        Self::build(self.before.clone(), elements, self.markers.clone())
    }
}

impl<T: Tree> Container<T> {
    /// Reconcile an edited element list, see [`RightPadded::with_elements`]
    pub fn with_elements(&self, elements: Vec<T>) -> Result<Self> {
        Ok(self.with_padded(RightPadded::with_elements(&self.elements, elements)?))
    }

    /// Like [`Container::with_elements`], but an absent or empty list yields no container
    pub fn with_elements_nullable(before: Option<&Container<T>>, elements: Option<Vec<T>>) -> Result<Option<Self>> {
        let elements = match elements {
            Some(elements) if !elements.is_empty() => elements,
            _ => return Ok(None),
        };
        match before {
            Some(container) => container.with_elements(elements).map(Some),
            None => Ok(Some(Container::build(
                Space::empty(),
                elements.into_iter().map(RightPadded::build).collect(),
                Markers::empty(),
            ))),
        }
    }
}

impl<T: RefEq> RefEq for Container<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        self.before.ref_eq(&other.before)
            && self.elements.ref_eq(&other.elements)
            && self.markers.ref_eq(&other.markers)
    }
}
