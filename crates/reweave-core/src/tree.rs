//! The polymorphic node abstraction and source units
//!
//! Language crates model their node catalog as an enum of reference-counted
//! variants and implement [`Tree`] for it. Nodes are immutable: every `with_*`
//! produces a new value carrying the same [`TreeId`].

use std::fmt::{self, Debug};
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use crate::cursor::CursorValue;
use crate::error::ReweaveError;
use crate::identity::{RefEq, TreeId};
use crate::markers::Markers;
use crate::result::Result;
use crate::space::Space;

/// A node of a lossless tree
pub trait Tree: RefEq + Clone + Debug + Send + Sync + 'static {
    /// What a cursor frame holds while traversing this kind of tree
    type Value: CursorValue<Tree = Self>;

    fn id(&self) -> TreeId;

    fn prefix(&self) -> &Space;

    fn with_prefix(&self, prefix: Space) -> Self;

    fn markers(&self) -> &Markers;

    fn with_markers(&self, markers: Markers) -> Self;

    /// Name of the node kind, used for cursor paths and diagnostics
    fn kind(&self) -> &'static str;

    /// The source-unit view of this node, if it is the root of a file
    fn as_source_file(&self) -> Option<&dyn SourceFile> {
        None
    }
}

/// A root node produced by a parser for one file
pub trait SourceFile: Send + Sync {
    fn source_path(&self) -> &Path;

    fn file_attributes(&self) -> Option<&FileAttributes>;

    fn charset(&self) -> Option<&str> {
        None
    }

    /// Trailing whitespace and comments after the last token
    fn eof(&self) -> &Space;

    /// Language (or dialect) name, used for acceptability checks
    fn language(&self) -> &'static str;
}

/// File metadata captured at parse time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileAttributes {
    pub creation_time: Option<SystemTime>,
    pub last_modified_time: Option<SystemTime>,
    pub last_access_time: Option<SystemTime>,
    pub is_readable: bool,
    pub is_writable: bool,
    pub is_executable: bool,
    pub size: u64,
}

impl FileAttributes {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata =
            std::fs::metadata(path).map_err(|e| ReweaveError::io_error(path, e))?;

        #[cfg(unix)]
        let is_executable = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o111 != 0
        };
        #[cfg(not(unix))]
        let is_executable = false;

        Ok(Self {
            creation_time: metadata.created().ok(),
            last_modified_time: metadata.modified().ok(),
            last_access_time: metadata.accessed().ok(),
            is_readable: true,
            is_writable: !metadata.permissions().readonly(),
            is_executable,
            size: metadata.len(),
        })
    }
}

/// An opaque, caller-supplied type annotation
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(Arc<str>);

impl TypeTag {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}

impl RefEq for TypeTag {
    fn ref_eq(&self, other: &Self) -> bool {
        self == other
    }
}
