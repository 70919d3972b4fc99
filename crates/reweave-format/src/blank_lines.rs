//! Cap runs of blank lines

use std::sync::Arc;

use reweave_core::{ExecutionContext, Marker, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JavaVisitor, SpaceLocation, java_tree_visitor};

use crate::style::BlankLinesStyle;
use crate::whitespace::{map_trailing_comma, map_whitespace};

pub struct BlankLinesVisitor {
    state: VisitorState<J>,
    style: BlankLinesStyle,
}

impl BlankLinesVisitor {
    pub fn new(style: BlankLinesStyle, stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
            style,
        }
    }
}

/// Keep at most `keep_maximum` blank lines in `whitespace`, preserving the final indentation
pub fn keep_maximum_blank_lines(whitespace: &str, keep_maximum: usize) -> String {
    let breaks = whitespace.matches('\n').count();
    if breaks <= keep_maximum + 1 {
        return whitespace.to_string();
    }
    let newline = if whitespace.contains("\r\n") { "\r\n" } else { "\n" };
    let first_break = whitespace.find(['\r', '\n']).unwrap_or(0);
    let indent_start = whitespace.rfind('\n').map_or(0, |i| i + 1);
    format!(
        "{}{}{}",
        &whitespace[..first_break],
        newline.repeat(keep_maximum + 1),
        &whitespace[indent_start..]
    )
}

impl TreeVisitor<J> for BlankLinesVisitor {
    java_tree_visitor!(state);

    fn visit_marker(&mut self, marker: &Arc<dyn Marker>, _ctx: &mut dyn ExecutionContext) -> Result<Arc<dyn Marker>> {
        if self.state().is_stopped() {
            return Ok(Arc::clone(marker));
        }
        let keep = self.style.keep_maximum_in_code;
        Ok(map_trailing_comma(marker, |suffix| {
            map_whitespace(suffix, |ws| keep_maximum_blank_lines(ws, keep))
        }))
    }
}

impl JavaVisitor for BlankLinesVisitor {
    fn visit_space(&mut self, space: &Space, loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        if self.state().is_stopped() {
            return Ok(space.clone());
        }
        let keep = match loc {
            SpaceLocation::BlockEnd => self.style.keep_maximum_before_end_of_block,
            _ => self.style.keep_maximum_in_code,
        };
        Ok(map_whitespace(space, |ws| keep_maximum_blank_lines(ws, keep)))
    }
}
