//! Cursor frame values for J trees

use reweave_core::{Cursor, CursorValue, ROOT_VALUE, RightPadded};

use crate::location::{ContainerLocation, LeftPaddedLocation, RightPaddedLocation};
use crate::tree::{Dialect, J};

/// What a cursor frame holds while walking J trees
#[derive(Debug, Clone)]
pub enum JValue {
    Root,
    Tree(J),
    /// A right-padded element; the padded value is kept so formatters can read its `after`
    RightPadded(RightPadded<J>, RightPaddedLocation),
    LeftPadded(LeftPaddedLocation),
    Container(ContainerLocation),
}

impl JValue {
    pub fn right_padded_location(&self) -> Option<RightPaddedLocation> {
        match self {
            JValue::RightPadded(_, location) => Some(*location),
            _ => None,
        }
    }

    pub fn container_location(&self) -> Option<ContainerLocation> {
        match self {
            JValue::Container(location) => Some(*location),
            _ => None,
        }
    }
}

impl CursorValue for JValue {
    type Tree = J;

    fn root() -> Self {
        JValue::Root
    }

    fn from_tree(tree: J) -> Self {
        JValue::Tree(tree)
    }

    fn as_tree(&self) -> Option<&J> {
        match self {
            JValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    fn is_root(&self) -> bool {
        matches!(self, JValue::Root)
    }

    fn kind(&self) -> &'static str {
        match self {
            JValue::Root => ROOT_VALUE,
            JValue::Tree(tree) => tree.kind(),
            JValue::RightPadded(..) => "RightPadded",
            JValue::LeftPadded(_) => "LeftPadded",
            JValue::Container(_) => "Container",
        }
    }
}

/// Dialect of the source unit enclosing `cursor`, defaulting to Java
pub fn enclosing_dialect(cursor: &Cursor<JValue>) -> Dialect {
    match cursor.first_enclosing(|t| matches!(t, J::CompilationUnit(_))) {
        Some(J::CompilationUnit(cu)) => cu.dialect,
        _ => Dialect::default(),
    }
}
