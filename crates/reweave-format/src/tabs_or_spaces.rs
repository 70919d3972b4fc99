//! Rewrite indentation with the configured indent character

use std::sync::Arc;

use reweave_core::{ExecutionContext, Marker, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JavaVisitor, SpaceLocation, java_tree_visitor};

use crate::indent::retab;
use crate::style::TabsAndIndentsStyle;
use crate::whitespace::{map_trailing_comma, map_whitespace};

pub struct NormalizeTabsOrSpacesVisitor {
    state: VisitorState<J>,
    style: TabsAndIndentsStyle,
}

impl NormalizeTabsOrSpacesVisitor {
    pub fn new(style: TabsAndIndentsStyle, stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
            style,
        }
    }
}

impl TreeVisitor<J> for NormalizeTabsOrSpacesVisitor {
    java_tree_visitor!(state);

    fn visit_marker(&mut self, marker: &Arc<dyn Marker>, _ctx: &mut dyn ExecutionContext) -> Result<Arc<dyn Marker>> {
        if self.state().is_stopped() {
            return Ok(Arc::clone(marker));
        }
        let style = &self.style;
        Ok(map_trailing_comma(marker, |suffix| map_whitespace(suffix, |ws| retab(ws, style))))
    }
}

impl JavaVisitor for NormalizeTabsOrSpacesVisitor {
    fn visit_space(&mut self, space: &Space, _loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        if self.state().is_stopped() {
            return Ok(space.clone());
        }
        Ok(map_whitespace(space, |ws| retab(ws, &self.style)))
    }
}
