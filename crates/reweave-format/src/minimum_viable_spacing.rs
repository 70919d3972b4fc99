//! Put statements that share a line without a separator onto their own line

use reweave_core::{ExecutionContext, Result, RightPadded, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{Dialect, J, JavaVisitor, enclosing_dialect, java_tree_visitor};

pub struct MinimumViableSpacingVisitor {
    state: VisitorState<J>,
}

impl MinimumViableSpacingVisitor {
    pub fn new(stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
        }
    }
}

fn needs_line_break(prefix: &Space) -> bool {
    prefix.comments().is_empty() && !prefix.whitespace().contains('\n')
}

/// Break the statements of one block or source unit onto separate lines.
///
/// `break_first` decides whether the first statement moves too.
fn separate(statements: &[RightPadded<J>], dialect: Dialect, break_first: bool) -> Vec<RightPadded<J>> {
    let mut separated = Vec::with_capacity(statements.len());
    for (index, rp) in statements.iter().enumerate() {
        let separated_from_previous = match index {
            0 => !break_first,
            _ => dialect.needs_semicolon(&statements[index - 1]),
        };
        let prefix = rp.element().prefix();
        if separated_from_previous || !needs_line_break(prefix) {
            separated.push(rp.clone());
            continue;
        }
        let element = rp
            .element()
            .with_prefix(prefix.with_whitespace(format!("\n{}", prefix.whitespace())));
        separated.push(rp.with_element(element));
    }
    separated
}

impl TreeVisitor<J> for MinimumViableSpacingVisitor {
    java_tree_visitor!(state);

    fn post_visit(&mut self, tree: J, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        if self.state().is_stopped() {
            return Ok(Some(tree));
        }
        let dialect = enclosing_dialect(self.cursor());
        let separated = match &tree {
            J::Block(block) => {
                let statements = separate(&block.statements, dialect, dialect == Dialect::Python);
                J::Block(block.with_padded_statements(statements))
            }
            J::CompilationUnit(cu) => J::CompilationUnit(cu.with_padded_statements(separate(&cu.statements, cu.dialect, false))),
            _ => tree,
        };
        Ok(Some(separated))
    }
}

impl JavaVisitor for MinimumViableSpacingVisitor {}
