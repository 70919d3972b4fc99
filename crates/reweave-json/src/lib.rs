//! Reweave JSON
//!
//! A lossless JSON-with-comments tree on top of `reweave-core`: the node types,
//! a [`JsonVisitor`], a parser and a printer.

pub mod parser;
pub mod printer;
pub mod tree;
pub mod visitor;

pub use reweave_core;

pub use parser::JsonParser;
pub use tree::*;
pub use visitor::JsonVisitor;
