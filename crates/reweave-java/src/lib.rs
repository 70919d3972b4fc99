//! Reweave Java
//!
//! The J node catalog shared by the brace dialect (Java) and the indentation
//! dialect (Python), its cursor values and space locations, the
//! [`JavaVisitor`] double-dispatch visitor, the printer and a lossless parser
//! for the brace dialect.
//!
//! # Example
//!
//! ```rust,ignore
//! use reweave_java::{JavaParser, reweave_core::Print};
//!
//! let cu = JavaParser::parse("foo(a,\n  b);\n", "Foo.java")?;
//! assert_eq!(cu.print_trimmed_markers(), "foo(a,\n  b);\n");
//! ```

pub mod location;
pub mod markers;
pub mod parser;
pub mod printer;
pub mod tree;
pub mod value;
pub mod visitor;

pub use reweave_core;

pub use location::{ContainerLocation, LeftPaddedLocation, RightPaddedLocation, SpaceLocation};
pub use markers::{Semicolon, TrailingComma};
pub use parser::JavaParser;
pub use tree::*;
pub use value::{JValue, enclosing_dialect};
pub use visitor::JavaVisitor;
