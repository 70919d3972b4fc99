//! Reweave Format
//!
//! Whitespace formatting for J trees. Each concern is its own visitor so a
//! rewrite can reformat just what it touched:
//! - [`TabsAndIndentsVisitor`] reindents every line start
//! - [`SpacesVisitor`] adds or removes single blanks around punctuation
//! - [`BlankLinesVisitor`] caps runs of blank lines
//! - [`NormalizeLineBreaksVisitor`], [`NormalizeTabsOrSpacesVisitor`] and
//!   [`RemoveTrailingWhitespaceVisitor`] clean up raw whitespace
//! - [`MinimumViableSpacingVisitor`] splits statements that share a line
//!
//! [`AutoFormatVisitor`] runs them in order. Every visitor takes an optional
//! `stop_after` tree id; formatting ends once that tree has been visited.
//!
//! # Example
//!
//! ```rust,ignore
//! use reweave_format::{FormatterConfiguration, format_source_unit};
//! use reweave_java::JavaParser;
//!
//! let cu = JavaParser::parse("void f() {\nreturn;\n}\n", "F.java")?;
//! let formatted = format_source_unit(&cu, None)?;
//! ```

pub mod auto_format;
pub mod blank_lines;
pub mod config;
pub mod indent;
pub mod line_breaks;
pub mod minimum_viable_spacing;
pub mod normalize_format;
pub mod spaces;
pub mod style;
pub mod tabs_and_indents;
pub mod tabs_or_spaces;
pub mod trailing_whitespace;
pub mod whitespace;

pub use auto_format::AutoFormatVisitor;
pub use blank_lines::BlankLinesVisitor;
pub use config::{ConfigLoader, FilesConfiguration, FormatterConfiguration, ReweaveConfiguration, SpacesConfiguration};
pub use line_breaks::NormalizeLineBreaksVisitor;
pub use minimum_viable_spacing::MinimumViableSpacingVisitor;
pub use normalize_format::NormalizeFormatVisitor;
pub use spaces::SpacesVisitor;
pub use style::{
    BlankLinesStyle, GeneralFormatStyle, IntelliJ, SpacesStyle, Styles, TabsAndIndentsStyle,
};
pub use tabs_and_indents::{IndentType, TabsAndIndentsVisitor};
pub use tabs_or_spaces::NormalizeTabsOrSpacesVisitor;
pub use trailing_whitespace::RemoveTrailingWhitespaceVisitor;

use reweave_core::{InMemoryExecutionContext, Result, TreeVisitor};
use reweave_java::J;

/// Auto-format a whole source unit.
///
/// Line breaks are only rewritten when the configuration asks for a specific
/// line ending.
pub fn format_source_unit(cu: &J, configuration: Option<&FormatterConfiguration>) -> Result<J> {
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = AutoFormatVisitor::new(None);
    if let Some(configuration) = configuration {
        visitor = visitor.with_configuration(configuration.clone());
    }
    let formatted = visitor.visit(Some(cu), &mut ctx)?.unwrap_or_else(|| cu.clone());

    let Some(use_crlf) = configuration.and_then(|c| c.use_crlf_new_lines) else {
        return Ok(formatted);
    };
    let mut line_breaks = NormalizeLineBreaksVisitor::new(GeneralFormatStyle { use_crlf_new_lines: use_crlf }, None);
    Ok(line_breaks.visit(Some(&formatted), &mut ctx)?.unwrap_or(formatted))
}
