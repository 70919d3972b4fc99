//! Cursor: the parent-linked traversal context
//!
//! Each frame holds the node (or padding wrapper) being visited and a small
//! message store. Cloning a [`Cursor`] shares the frame, so visitors walking the
//! same frames see each other's messages; lookups through
//! [`Cursor::get_nearest_message`] walk ancestors only, never siblings.
//!
//! The message store is the one piece of mutable state in an otherwise
//! immutable tree model.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::tree::Tree;

/// Frame message: when set to `true` during `pre_visit`, the node's children and `post_visit` are skipped
pub const STOP_AFTER_PRE_VISIT: &str = "STOP_AFTER_PRE_VISIT";

/// Name of the sentinel value at the bottom of every cursor stack
pub const ROOT_VALUE: &str = "root";

/// What a cursor frame can hold for a given tree type
pub trait CursorValue: Clone + Debug + Send + Sync + 'static {
    type Tree: Tree;

    /// The sentinel at the bottom of the stack
    fn root() -> Self;

    fn from_tree(tree: Self::Tree) -> Self;

    fn as_tree(&self) -> Option<&Self::Tree>;

    fn is_root(&self) -> bool;

    /// Name used for this frame in a [`CursorPath`]
    fn kind(&self) -> &'static str;
}

type Message = Arc<dyn Any + Send + Sync>;

struct Frame<V> {
    parent: Option<Cursor<V>>,
    value: V,
    messages: Mutex<HashMap<String, Message>>,
}

/// A frame in the traversal stack
pub struct Cursor<V>(Arc<Frame<V>>);

impl<V> Clone for Cursor<V> {
    fn clone(&self) -> Self {
        Cursor(Arc::clone(&self.0))
    }
}

impl<V: CursorValue> Cursor<V> {
    /// A fresh stack holding only the root sentinel
    pub fn root() -> Self {
        Self::new(None, V::root())
    }

    pub fn new(parent: Option<Cursor<V>>, value: V) -> Self {
        Cursor(Arc::new(Frame {
            parent,
            value,
            messages: Mutex::new(HashMap::new()),
        }))
    }

    /// A child frame of this cursor
    pub fn push(&self, value: V) -> Self {
        Self::new(Some(self.clone()), value)
    }

    pub fn parent(&self) -> Option<&Cursor<V>> {
        self.0.parent.as_ref()
    }

    pub fn value(&self) -> &V {
        &self.0.value
    }

    /// The tree held by this frame, if it holds one
    pub fn tree(&self) -> Option<&V::Tree> {
        self.0.value.as_tree()
    }

    pub fn is_same(&self, other: &Cursor<V>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of frames below this one
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This frame followed by each ancestor up to the root
    pub fn ancestors(&self) -> Ancestors<'_, V> {
        Ancestors { next: Some(self) }
    }

    /// Frame values from this frame to the root, innermost first
    pub fn get_path(&self) -> impl Iterator<Item = &V> {
        self.ancestors().map(Cursor::value)
    }

    /// The frame kinds from this frame to the root
    pub fn cursor_path(&self) -> CursorPath {
        CursorPath::from_segments(self.get_path().map(CursorValue::kind).collect())
    }

    /// A message stored on this frame
    pub fn get_message<M: Any + Clone>(&self, key: &str) -> Option<M> {
        self.0
            .messages
            .lock()
            .get(key)
            .and_then(|m| m.downcast_ref::<M>().cloned())
    }

    /// A message stored on this frame, or `default`
    pub fn get_message_or<M: Any + Clone>(&self, key: &str, default: M) -> M {
        self.get_message(key).unwrap_or(default)
    }

    /// A message stored on this frame or the closest ancestor that has one
    pub fn get_nearest_message<M: Any + Clone>(&self, key: &str) -> Option<M> {
        self.ancestors().find_map(|c| c.get_message(key))
    }

    pub fn get_nearest_message_or<M: Any + Clone>(&self, key: &str, default: M) -> M {
        self.get_nearest_message(key).unwrap_or(default)
    }

    /// Store a message on this frame, replacing any previous value for `key`
    pub fn put_message<M: Any + Send + Sync>(&self, key: &str, value: M) {
        self.0.messages.lock().insert(key.to_string(), Arc::new(value));
    }

    pub fn remove_message(&self, key: &str) {
        self.0.messages.lock().remove(key);
    }

    /// Copy the whole stack with private message stores seeded from the originals
    pub fn fork(&self) -> Self {
        let parent = self.0.parent.as_ref().map(Cursor::fork);
        let messages = self.0.messages.lock().clone();
        Cursor(Arc::new(Frame {
            parent,
            value: self.0.value.clone(),
            messages: Mutex::new(messages),
        }))
    }

    /// The closest frame (including this one) holding a tree that satisfies `predicate`
    pub fn first_enclosing(&self, predicate: impl Fn(&V::Tree) -> bool) -> Option<&V::Tree> {
        self.ancestors()
            .filter_map(Cursor::tree)
            .find(|t| predicate(t))
    }

    /// The cursor of the closest ancestor (excluding this frame) holding a tree or the root
    pub fn parent_tree_cursor(&self) -> Option<&Cursor<V>> {
        self.ancestors()
            .skip(1)
            .find(|c| c.value().is_root() || c.tree().is_some())
    }
}

impl<V: Debug> Debug for Cursor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("value", &self.0.value)
            .field("parent", &self.0.parent)
            .finish()
    }
}

/// Iterator over a cursor and its ancestors
pub struct Ancestors<'a, V> {
    next: Option<&'a Cursor<V>>,
}

impl<'a, V> Iterator for Ancestors<'a, V> {
    type Item = &'a Cursor<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.0.parent.as_ref();
        Some(current)
    }
}

/// The frame kinds of a cursor, innermost first, captured for error reporting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorPath {
    segments: Vec<&'static str>,
}

impl CursorPath {
    pub fn from_segments(segments: Vec<&'static str>) -> Self {
        Self { segments }
    }

    /// Innermost first; the last segment is the root sentinel
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for CursorPath {
    /// Renders root first, e.g. `root > Block > RightPadded > Return`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}
