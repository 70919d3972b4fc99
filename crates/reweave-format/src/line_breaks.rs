//! Make every line break `\n` or every line break `\r\n`

use std::sync::Arc;

use reweave_core::{ExecutionContext, Marker, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JavaVisitor, SpaceLocation, java_tree_visitor};

use crate::style::GeneralFormatStyle;
use crate::whitespace::{map_trailing_comma, map_whitespace};

pub struct NormalizeLineBreaksVisitor {
    state: VisitorState<J>,
    style: GeneralFormatStyle,
}

impl NormalizeLineBreaksVisitor {
    pub fn new(style: GeneralFormatStyle, stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
            style,
        }
    }

    fn normalize_space(&self, space: &Space) -> Space {
        let crlf = self.style.use_crlf_new_lines;
        let space = map_whitespace(space, |ws| normalize_new_lines(ws, crlf));
        let comments: Vec<_> = space
            .comments()
            .iter()
            .map(|c| {
                if !c.multiline() {
                    return c.clone();
                }
                let text = normalize_new_lines(c.text(), crlf);
                if text == c.text() { c.clone() } else { c.with_text(text) }
            })
            .collect();
        space.with_comments(comments)
    }
}

pub fn normalize_new_lines(text: &str, use_crlf: bool) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let lf = text.replace("\r\n", "\n");
    if use_crlf { lf.replace('\n', "\r\n") } else { lf }
}

impl TreeVisitor<J> for NormalizeLineBreaksVisitor {
    java_tree_visitor!(state);

    fn visit_marker(&mut self, marker: &Arc<dyn Marker>, _ctx: &mut dyn ExecutionContext) -> Result<Arc<dyn Marker>> {
        if self.state().is_stopped() {
            return Ok(Arc::clone(marker));
        }
        Ok(map_trailing_comma(marker, |suffix| self.normalize_space(suffix)))
    }
}

impl JavaVisitor for NormalizeLineBreaksVisitor {
    fn visit_space(&mut self, space: &Space, _loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        if self.state().is_stopped() {
            return Ok(space.clone());
        }
        Ok(self.normalize_space(space))
    }
}
