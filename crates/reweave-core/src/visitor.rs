//! The cursor-driven traversal engine
//!
//! [`TreeVisitor::visit`] pushes a cursor frame for the node, checks whether the
//! visitor applies to it, runs `pre_visit`, dispatches into the node-kind
//! specific method through [`TreeVisitor::accept`], runs `post_visit`, pops the
//! frame and, once the outermost visit finishes, runs any queued after-visit
//! visitors. A failure anywhere below is wrapped exactly once in
//! [`ReweaveError::RecipeRun`] with the cursor path of the failing frame.
//!
//! Each visitor instance owns its cursor, nesting depth, after-visit queue and
//! stop flag, so one instance must not serve two traversals at the same time.
//!
//! # Example
//!
//! ```rust,ignore
//! struct Rename { state: VisitorState<J> }
//!
//! impl TreeVisitor<J> for Rename {
//!     fn state(&self) -> &VisitorState<J> { &self.state }
//!     fn state_mut(&mut self) -> &mut VisitorState<J> { &mut self.state }
//!     fn accept(&mut self, tree: &J, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
//!         tree.accept(self, ctx)
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::cursor::{Cursor, CursorValue, STOP_AFTER_PRE_VISIT};
use crate::execution::ExecutionContext;
use crate::identity::TreeId;
use crate::markers::{Marker, Markers};
use crate::result::Result;
use crate::tree::{SourceFile, Tree};

/// Early-stop flag for partial traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopAfter {
    /// Visit everything
    #[default]
    Never,
    /// Keep visiting until the node with this id has been post-visited
    At(TreeId),
    /// The target was reached; every further visit is an identity pass-through
    Stopped,
}

impl StopAfter {
    pub fn from_target(target: Option<TreeId>) -> Self {
        target.map_or(StopAfter::Never, StopAfter::At)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, StopAfter::Stopped)
    }

    fn observe(&mut self, id: TreeId) {
        if *self == StopAfter::At(id) {
            *self = StopAfter::Stopped;
        }
    }
}

/// Per-instance traversal state
pub struct VisitorState<T: Tree> {
    cursor: Cursor<T::Value>,
    depth: usize,
    after_visit: Vec<Box<dyn TreeVisitor<T>>>,
    stop: StopAfter,
}

impl<T: Tree> VisitorState<T> {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::root(),
            depth: 0,
            after_visit: Vec::new(),
            stop: StopAfter::Never,
        }
    }

    /// State whose visitor turns into a pass-through once `target` has been visited
    pub fn stopping_after(target: Option<TreeId>) -> Self {
        Self {
            stop: StopAfter::from_target(target),
            ..Self::new()
        }
    }

    pub fn cursor(&self) -> &Cursor<T::Value> {
        &self.cursor
    }

    pub fn stop(&self) -> StopAfter {
        self.stop
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

impl<T: Tree> Default for VisitorState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A visitor over trees of type `T`
pub trait TreeVisitor<T: Tree> {
    fn state(&self) -> &VisitorState<T>;

    fn state_mut(&mut self) -> &mut VisitorState<T>;

    /// Dispatch to the visit method for this node's kind
    fn accept(&mut self, tree: &T, ctx: &mut dyn ExecutionContext) -> Result<Option<T>>;

    fn cursor(&self) -> &Cursor<T::Value> {
        &self.state().cursor
    }

    fn set_cursor(&mut self, cursor: Cursor<T::Value>) {
        self.state_mut().cursor = cursor;
    }

    /// Whether this visitor applies to `tree` at all
    fn is_acceptable(&self, _tree: &T, _ctx: &dyn ExecutionContext) -> bool {
        true
    }

    /// Whether this visitor applies to a whole source unit
    fn is_acceptable_source(&self, _source: &dyn SourceFile, _ctx: &dyn ExecutionContext) -> bool {
        true
    }

    fn pre_visit(&mut self, tree: T, _ctx: &mut dyn ExecutionContext) -> Result<Option<T>> {
        Ok(Some(tree))
    }

    fn post_visit(&mut self, tree: T, _ctx: &mut dyn ExecutionContext) -> Result<Option<T>> {
        Ok(Some(tree))
    }

    /// Result of visiting an absent tree
    fn default_value(&mut self, tree: Option<T>, _ctx: &mut dyn ExecutionContext) -> Result<Option<T>> {
        Ok(tree)
    }

    fn visit(&mut self, tree: Option<&T>, ctx: &mut dyn ExecutionContext) -> Result<Option<T>> {
        visit_tree(self, tree, ctx)
    }

    /// Visit `tree` as a child of `parent`
    fn visit_with_parent(
        &mut self,
        tree: Option<&T>,
        ctx: &mut dyn ExecutionContext,
        parent: Cursor<T::Value>,
    ) -> Result<Option<T>> {
        self.set_cursor(parent);
        self.visit(tree, ctx)
    }

    fn visit_markers(&mut self, markers: &Markers, ctx: &mut dyn ExecutionContext) -> Result<Markers> {
        if markers.is_empty() {
            return Ok(markers.clone());
        }
        let visited = markers
            .markers()
            .iter()
            .map(|m| self.visit_marker(m, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(markers.with_markers(visited))
    }

    fn visit_marker(
        &mut self,
        marker: &Arc<dyn Marker>,
        _ctx: &mut dyn ExecutionContext,
    ) -> Result<Arc<dyn Marker>> {
        Ok(Arc::clone(marker))
    }

    /// Queue a visitor to run over the result once the outermost visit completes
    fn do_after_visit(&mut self, visitor: Box<dyn TreeVisitor<T>>) {
        self.state_mut().after_visit.push(visitor);
    }
}

fn visit_tree<T, V>(visitor: &mut V, tree: Option<&T>, ctx: &mut dyn ExecutionContext) -> Result<Option<T>>
where
    T: Tree,
    V: TreeVisitor<T> + ?Sized,
{
    let Some(tree) = tree else {
        return visitor.default_value(None, ctx);
    };
    if visitor.state().is_stopped() {
        return Ok(Some(tree.clone()));
    }

    let top_level = visitor.state().depth == 0;
    visitor.state_mut().depth += 1;

    let parent = visitor.cursor().clone();
    visitor.set_cursor(parent.push(T::Value::from_tree(tree.clone())));

    let acceptable = visitor.is_acceptable(tree, ctx)
        && tree
            .as_source_file()
            .is_none_or(|source| visitor.is_acceptable_source(source, ctx));

    let outcome = if acceptable {
        visit_acceptable(visitor, tree, ctx)
    } else {
        Ok(Some(tree.clone()))
    };
    let outcome = match outcome {
        Err(error) => {
            let path = visitor.cursor().cursor_path();
            tracing::debug!(%path, "visit failed: {}", error);
            Err(error.wrap_recipe_run(path))
        }
        visited => visited,
    };

    visitor.set_cursor(parent.clone());

    if !top_level {
        visitor.state_mut().depth -= 1;
        return outcome;
    }

    visitor.state_mut().depth = 0;
    let queued = std::mem::take(&mut visitor.state_mut().after_visit);
    match outcome {
        Ok(Some(result)) if !queued.is_empty() => run_after_visits(queued, result, ctx, &parent),
        other => other,
    }
}

fn visit_acceptable<T, V>(visitor: &mut V, tree: &T, ctx: &mut dyn ExecutionContext) -> Result<Option<T>>
where
    T: Tree,
    V: TreeVisitor<T> + ?Sized,
{
    let mut t = visitor.pre_visit(tree.clone(), ctx)?;
    if !visitor.cursor().get_message_or(STOP_AFTER_PRE_VISIT, false) {
        if let Some(current) = t {
            t = visitor.accept(&current, ctx)?;
        }
        if let Some(current) = t {
            t = visitor.post_visit(current, ctx)?;
        }
    }
    visitor.state_mut().stop.observe(tree.id());
    Ok(t)
}

fn run_after_visits<T: Tree>(
    queued: Vec<Box<dyn TreeVisitor<T>>>,
    tree: T,
    ctx: &mut dyn ExecutionContext,
    parent: &Cursor<T::Value>,
) -> Result<Option<T>> {
    let mut current = Some(tree);
    for mut after in queued {
        let Some(t) = current else { break };
        current = after
            .visit_with_parent(Some(&t), ctx, parent.clone())
            .map_err(|e| e.wrap_recipe_run(parent.cursor_path()))?;
    }
    Ok(current)
}
