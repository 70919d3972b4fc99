//! Reweave Core
//!
//! The language-independent substrate for format-preserving rewrites:
//! - identity and markers
//! - [`Space`] (whitespace plus comments) and the padding wrappers that bind it
//!   to the boundaries between elements
//! - list reconciliation that keeps formatting across edits
//! - the cursor and the [`TreeVisitor`] traversal engine
//! - the printing contract, execution context and style records

pub mod cursor;
pub mod error;
pub mod execution;
pub mod identity;
pub mod markers;
pub mod padding;
pub mod print;
pub mod result;
pub mod space;
pub mod style;
pub mod tree;
pub mod visitor;

pub use cursor::{Cursor, CursorPath, CursorValue, ROOT_VALUE, STOP_AFTER_PRE_VISIT};
pub use error::{ErrorKind, ReweaveError};
pub use execution::{ExecutionContext, InMemoryExecutionContext};
pub use identity::{RefEq, TreeId, random_id};
pub use markers::{Marker, Markers, ParseExceptionResult, SearchResult};
pub use padding::{Container, LeftPadded, RightPadded};
pub use print::{Print, PrintOutputCapture};
pub use result::{Result, ResultExt};
pub use space::{Comment, CommentSyntax, Space};
pub use style::{NamedStyles, Style};
pub use tree::{FileAttributes, SourceFile, Tree, TypeTag};
pub use visitor::{StopAfter, TreeVisitor, VisitorState};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    init_tracing_with("reweave=info", false);
}

/// Initialize tracing with a fallback filter for when `RUST_LOG` is unset.
///
/// With `json` every event is written as one JSON object per line.
pub fn init_tracing_with(default_filter: &str, json: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
