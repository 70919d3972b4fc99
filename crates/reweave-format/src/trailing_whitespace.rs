//! Strip whitespace at the end of lines

use std::sync::Arc;

use reweave_core::{ExecutionContext, Marker, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JavaVisitor, SpaceLocation, java_tree_visitor};

use crate::whitespace::{map_trailing_comma, map_whitespace};

pub struct RemoveTrailingWhitespaceVisitor {
    state: VisitorState<J>,
}

impl RemoveTrailingWhitespaceVisitor {
    pub fn new(stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
        }
    }
}

/// Drop everything but line breaks before the last line break of `whitespace`
pub fn strip_trailing(whitespace: &str) -> String {
    match whitespace.rfind('\n') {
        Some(last) if last > 0 => {
            let mut stripped: String = whitespace[..last].chars().filter(|c| matches!(c, '\r' | '\n')).collect();
            stripped.push_str(&whitespace[last..]);
            stripped
        }
        _ => whitespace.to_string(),
    }
}

fn only_line_breaks(whitespace: &str) -> String {
    whitespace.chars().filter(|c| matches!(c, '\r' | '\n')).collect()
}

impl TreeVisitor<J> for RemoveTrailingWhitespaceVisitor {
    java_tree_visitor!(state);

    fn visit_marker(&mut self, marker: &Arc<dyn Marker>, _ctx: &mut dyn ExecutionContext) -> Result<Arc<dyn Marker>> {
        if self.state().is_stopped() {
            return Ok(Arc::clone(marker));
        }
        Ok(map_trailing_comma(marker, |suffix| map_whitespace(suffix, strip_trailing)))
    }
}

impl JavaVisitor for RemoveTrailingWhitespaceVisitor {
    fn visit_space(&mut self, space: &Space, loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        if self.state().is_stopped() {
            return Ok(space.clone());
        }
        Ok(match loc {
            SpaceLocation::CompilationUnitPrefix if space.comments().is_empty() => Space::empty(),
            SpaceLocation::CompilationUnitEof => map_whitespace(space, only_line_breaks),
            _ => map_whitespace(space, strip_trailing),
        })
    }
}
