//! Single-line spacing around parentheses, operators and commas
//!
//! Only gaps made purely of spaces are touched. A gap holding a comment, a line
//! break or a line continuation stays as written.

use std::sync::Arc;

use reweave_core::{Container, ExecutionContext, RefEq, Result, Space, TreeId, TreeVisitor, VisitorState};
use reweave_java::{
    Assignment, Binary, Block, CollectionLiteral, Dialect, J, JavaVisitor, MethodDeclaration, MethodInvocation,
    TrailingComma, enclosing_dialect, java_tree_visitor,
};

use crate::style::SpacesStyle;

pub struct SpacesVisitor {
    state: VisitorState<J>,
    style: SpacesStyle,
}

/// Spacing for one delimited list
struct ListSpacing {
    before: bool,
    within: bool,
    within_empty: bool,
}

impl SpacesVisitor {
    pub fn new(style: SpacesStyle, stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
            style,
        }
    }

    fn container(&self, container: &Container<J>, spacing: ListSpacing) -> Container<J> {
        let before = update_space(container.before(), spacing.before);
        let padded = container.padded();
        let last = padded.len().saturating_sub(1);

        let elements = if padded.len() == 1 && matches!(padded[0].element(), J::Empty(_)) {
            let empty = &padded[0];
            vec![empty.with_element(space_before(empty.element(), spacing.within_empty))]
        } else {
            padded
                .iter()
                .enumerate()
                .map(|(index, rp)| {
                    let have_space = if index == 0 {
                        spacing.within
                    } else {
                        self.style.other.after_comma
                    };
                    let element = space_before(rp.element(), have_space);
                    let trailing = rp.markers().find_first::<TrailingComma>();
                    let after = if index == last && trailing.is_none() {
                        update_space(rp.after(), spacing.within)
                    } else {
                        update_space(rp.after(), self.style.other.before_comma)
                    };
                    let markers = match trailing {
                        Some(comma) if index == last => {
                            let suffix = update_space(&comma.suffix, spacing.within);
                            if suffix.ref_eq(&comma.suffix) {
                                rp.markers().clone()
                            } else {
                                rp.markers().set_by_type(comma.with_suffix(suffix))
                            }
                        }
                        _ => rp.markers().clone(),
                    };
                    rp.with_element(element).with_after(after).with_markers(markers)
                })
                .collect()
        };
        container.with_before(before).with_padded(elements)
    }

    fn method_invocation(&self, mi: &Arc<MethodInvocation>) -> J {
        let within = &self.style.within;
        let arguments = self.container(
            &mi.arguments,
            ListSpacing {
                before: self.style.before_parentheses.method_call,
                within: within.method_call_parentheses,
                within_empty: within.empty_method_call_parentheses,
            },
        );
        J::MethodInvocation(mi.with_padded_arguments(arguments))
    }

    fn method_declaration(&self, md: &Arc<MethodDeclaration>) -> J {
        let within = &self.style.within;
        let parameters = self.container(
            &md.parameters,
            ListSpacing {
                before: self.style.before_parentheses.method_declaration,
                within: within.method_declaration_parentheses,
                within_empty: within.empty_method_declaration_parentheses,
            },
        );
        J::MethodDeclaration(md.with_padded_parameters(parameters))
    }

    fn collection_literal(&self, collection: &Arc<CollectionLiteral>) -> J {
        let brackets = self.style.within.brackets;
        let elements = self.container(
            &collection.elements,
            ListSpacing {
                before: false,
                within: brackets,
                within_empty: false,
            },
        );
        J::CollectionLiteral(collection.with_padded_elements(elements))
    }

    fn assignment(&self, assignment: &Arc<Assignment>) -> J {
        let around = self.style.around_operators.assignment;
        let value = assignment.assignment.element();
        let padded = assignment
            .assignment
            .with_before(update_space(assignment.assignment.before(), around))
            .with_element(space_before(value, around));
        J::Assignment(assignment.with_assignment(padded))
    }

    fn binary(&self, binary: &Arc<Binary>) -> J {
        let op = *binary.operator.element();
        let around = &self.style.around_operators;
        let have_space = if op.is_additive() {
            around.additive
        } else if op.is_multiplicative() {
            around.multiplicative
        } else if op.is_equality() {
            around.equality
        } else if op.is_relational() {
            around.relational
        } else {
            true
        };
        let operator = binary
            .operator
            .with_before(update_space(binary.operator.before(), have_space));
        J::Binary(
            binary
                .with_operator(operator)
                .with_right(space_before(&binary.right, have_space)),
        )
    }

    /// Space before the `{` of a body, or the `:` in the indentation dialect
    fn body_block(&self, block: &Arc<Block>, dialect: Dialect) -> J {
        let have_space = match dialect {
            Dialect::Java => self.style.other.before_left_brace,
            Dialect::Python => self.style.other.before_colon,
        };
        J::Block(block.with_prefix(update_space(&block.prefix, have_space)))
    }
}

/// Make a single-line gap either one space or nothing
pub fn update_space(space: &Space, have_space: bool) -> Space {
    if !space.comments().is_empty() {
        return space.clone();
    }
    let whitespace = space.whitespace();
    let only_spaces = whitespace.chars().all(|c| c == ' ');
    if !only_spaces {
        return space.clone();
    }
    match (have_space, whitespace) {
        (true, " ") | (false, "") => space.clone(),
        (true, _) => Space::single_space(),
        (false, _) => Space::empty(),
    }
}

fn space_before(tree: &J, have_space: bool) -> J {
    let prefix = tree.prefix();
    if !prefix.comments().is_empty() || prefix.whitespace().contains('\\') {
        return tree.clone();
    }
    let updated = update_space(prefix, have_space);
    if updated.ref_eq(prefix) {
        tree.clone()
    } else {
        tree.with_prefix(updated)
    }
}

impl TreeVisitor<J> for SpacesVisitor {
    java_tree_visitor!(state);

    fn post_visit(&mut self, tree: J, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        if self.state().is_stopped() {
            return Ok(Some(tree));
        }
        let dialect = enclosing_dialect(self.cursor());
        let spaced = match &tree {
            J::MethodInvocation(mi) => self.method_invocation(mi),
            J::MethodDeclaration(md) => self.method_declaration(md),
            J::CollectionLiteral(collection) => self.collection_literal(collection),
            J::Assignment(assignment) => self.assignment(assignment),
            J::Binary(binary) => self.binary(binary),
            J::Block(block) => {
                let owner = self.cursor().parent_tree_cursor().and_then(|c| c.tree());
                match owner {
                    Some(J::MethodDeclaration(_)) | Some(J::If(_)) | Some(J::Else(_)) => self.body_block(block, dialect),
                    _ => tree.clone(),
                }
            }
            J::If(node) if dialect == Dialect::Java && matches!(node.condition, J::Parentheses(_)) => J::If(
                node.with_condition(space_before(&node.condition, self.style.before_parentheses.if_parentheses)),
            ),
            J::Else(node) if dialect == Dialect::Java => J::Else(node.with_prefix(update_space(&node.prefix, true))),
            _ => tree.clone(),
        };
        Ok(Some(spaced))
    }
}

impl JavaVisitor for SpacesVisitor {}
