//! Error types for tree construction, traversal and formatting

use std::path::PathBuf;
use thiserror::Error;

use crate::cursor::CursorPath;
use crate::markers::TreeId;

/// Main error type for reweave operations
#[derive(Debug, Error)]
pub enum ReweaveError {
    /// A failure raised while visiting a tree, tagged with the cursor path at the
    /// point of failure. Never nested: wrapping an already wrapped error is a no-op.
    #[error("Recipe run failed at {path}: {source}")]
    RecipeRun {
        path: CursorPath,
        #[source]
        source: Box<ReweaveError>,
    },

    /// Two elements of one padded list share an identifier
    #[error("Duplicate key {id} in padded element list")]
    DuplicateId { id: TreeId },

    /// A visit target that has no implementation yet
    #[error("Not implemented: {what}")]
    NotImplemented { what: String },

    /// Raised by visitor code
    #[error("Visitor error: {message}")]
    Visitor { message: String },

    /// Source text could not be turned into a tree
    #[error("Parse error: {message} at line {line}, column {column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RecipeRun,
    DuplicateId,
    NotImplemented,
    Visitor,
    Parse,
    Config,
    Io,
    Internal,
}

impl ReweaveError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReweaveError::RecipeRun { .. } => ErrorKind::RecipeRun,
            ReweaveError::DuplicateId { .. } => ErrorKind::DuplicateId,
            ReweaveError::NotImplemented { .. } => ErrorKind::NotImplemented,
            ReweaveError::Visitor { .. } => ErrorKind::Visitor,
            ReweaveError::Parse { .. } => ErrorKind::Parse,
            ReweaveError::Config { .. } => ErrorKind::Config,
            ReweaveError::Io { .. } => ErrorKind::Io,
            ReweaveError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (processing may continue with other source units).
    /// A recipe run error is judged by the failure it wraps.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.root_cause().kind(),
            ErrorKind::Parse | ErrorKind::Visitor | ErrorKind::NotImplemented | ErrorKind::Io
        )
    }

    /// Wrap this error with the cursor path where it surfaced, unless it already carries one
    pub fn wrap_recipe_run(self, path: CursorPath) -> Self {
        match self {
            wrapped @ ReweaveError::RecipeRun { .. } => wrapped,
            other => ReweaveError::RecipeRun {
                path,
                source: Box::new(other),
            },
        }
    }

    /// The cursor path attached to a recipe run error
    pub fn cursor_path(&self) -> Option<&CursorPath> {
        match self {
            ReweaveError::RecipeRun { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The innermost error, looking through a recipe run wrapper
    pub fn root_cause(&self) -> &ReweaveError {
        match self {
            ReweaveError::RecipeRun { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Create a duplicate identifier error
    pub fn duplicate_id(id: TreeId) -> Self {
        Self::DuplicateId { id }
    }

    /// Create a not implemented error
    pub fn not_implemented(what: impl Into<String>) -> Self {
        Self::NotImplemented { what: what.into() }
    }

    /// Create a visitor error
    pub fn visitor_error(message: impl Into<String>) -> Self {
        Self::Visitor {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ReweaveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_is_not_nested() {
        let path = CursorPath::from_segments(vec!["Return".into(), "root".into()]);
        let wrapped = ReweaveError::visitor_error("boom").wrap_recipe_run(path.clone());
        let again = wrapped.wrap_recipe_run(CursorPath::from_segments(vec!["root".into()]));

        assert_eq!(again.kind(), ErrorKind::RecipeRun);
        assert_eq!(again.cursor_path(), Some(&path));
        assert_eq!(again.root_cause().kind(), ErrorKind::Visitor);
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(ReweaveError::parse_error("unexpected token", 1, 4).is_recoverable());
        assert!(!ReweaveError::duplicate_id(crate::markers::random_id()).is_recoverable());
        assert!(!ReweaveError::config_error("bad indent").is_recoverable());
        assert!(ReweaveError::not_implemented("python parsing").is_recoverable());
    }

    #[test]
    fn test_recipe_run_recoverability_follows_root_cause() {
        let path = CursorPath::from_segments(vec!["Block".into(), "root".into()]);
        let visitor = ReweaveError::visitor_error("boom").wrap_recipe_run(path.clone());
        assert!(visitor.is_recoverable());
        let duplicate = ReweaveError::duplicate_id(crate::markers::random_id()).wrap_recipe_run(path);
        assert!(!duplicate.is_recoverable());
    }
}
