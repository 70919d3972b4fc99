//! Move formatting that sits between a declaration and its first child onto the declaration

use reweave_core::{Comment, ExecutionContext, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JavaVisitor, java_tree_visitor};

/// Hoists the prefix of a method declaration's return type into the
/// declaration's own prefix, so that indentation only has one place to look.
pub struct NormalizeFormatVisitor {
    state: VisitorState<J>,
}

impl NormalizeFormatVisitor {
    pub fn new(stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
        }
    }
}

/// Append `moved` to `target`, re-indenting the moved comments by `margin`
fn concatenate(target: &Space, moved: &Space, margin: &str) -> Space {
    let shift = |text: &str| text.replace('\n', &format!("\n{margin}"));
    let moved_comments = moved.comments().iter().map(|c| {
        let c = if c.multiline() && c.text().contains('\n') { c.with_text(shift(c.text())) } else { c.clone() };
        if c.suffix().contains('\n') { c.with_suffix(shift(c.suffix())) } else { c }
    });

    if target.comments().is_empty() {
        let whitespace = format!("{}{}", target.whitespace(), moved.whitespace());
        return Space::build(whitespace, moved_comments.collect());
    }
    let mut comments: Vec<Comment> = target.comments().to_vec();
    if let Some(last) = comments.pop() {
        let suffix = format!("{}{}", last.suffix(), moved.whitespace());
        comments.push(last.with_suffix(suffix));
    }
    comments.extend(moved_comments);
    Space::build(target.whitespace(), comments)
}

fn common_margin(space: &Space) -> &str {
    let whitespace = space.whitespace();
    whitespace.rfind('\n').map_or("", |i| &whitespace[i + 1..])
}

impl TreeVisitor<J> for NormalizeFormatVisitor {
    java_tree_visitor!(state);

    fn post_visit(&mut self, tree: J, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        if self.state().is_stopped() {
            return Ok(Some(tree));
        }
        let J::MethodDeclaration(md) = &tree else {
            return Ok(Some(tree));
        };
        let Some(return_type) = &md.return_type else {
            return Ok(Some(tree));
        };
        if return_type.prefix().is_empty() {
            return Ok(Some(tree));
        }
        let prefix = concatenate(&md.prefix, return_type.prefix(), common_margin(&md.prefix));
        let md = md
            .with_return_type(Some(return_type.with_prefix(Space::empty())))
            .with_prefix(prefix);
        Ok(Some(J::MethodDeclaration(md)))
    }
}

impl JavaVisitor for NormalizeFormatVisitor {}
