//! Visiting J trees
//!
//! [`JavaVisitor`] adds one method per node kind on top of the generic
//! [`TreeVisitor`] engine. The default methods walk the node: its prefix, its
//! markers, then each child in source order. Padding wrappers and containers
//! get a cursor frame of their own so overriding visitors can tell where a
//! [`Space`] sits.
//!
//! Returning `Ok(None)` from a child visit deletes it. Deleting a required child
//! deletes the parent.
//!
//! ```rust,ignore
//! struct Uppercase { state: VisitorState<J> }
//!
//! impl TreeVisitor<J> for Uppercase {
//!     java_tree_visitor!(state);
//! }
//!
//! impl JavaVisitor for Uppercase {
//!     fn visit_identifier(&mut self, ident: &Arc<Identifier>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
//!         Ok(Some(J::Identifier(ident.with_simple_name(ident.simple_name.to_uppercase()))))
//!     }
//! }
//! ```

use std::sync::Arc;

use reweave_core::{
    Container, ExecutionContext, LeftPadded, Result, RightPadded, Space, TreeVisitor,
};

use crate::location::{ContainerLocation, LeftPaddedLocation, RightPaddedLocation, SpaceLocation};
use crate::tree::*;
use crate::value::JValue;

/// Implements the required [`TreeVisitor`] methods for a visitor that keeps
/// its [`reweave_core::VisitorState`] in the named field and dispatches
/// through [`JavaVisitor`].
#[macro_export]
macro_rules! java_tree_visitor {
    ($state:ident) => {
        fn state(&self) -> &$crate::reweave_core::VisitorState<$crate::J> {
            &self.$state
        }

        fn state_mut(&mut self) -> &mut $crate::reweave_core::VisitorState<$crate::J> {
            &mut self.$state
        }

        fn accept(
            &mut self,
            tree: &$crate::J,
            ctx: &mut dyn $crate::reweave_core::ExecutionContext,
        ) -> $crate::reweave_core::Result<Option<$crate::J>> {
            tree.accept(self, ctx)
        }
    };
}

impl J {
    /// Double dispatch into the visit method for this node's kind
    pub fn accept<V: JavaVisitor + ?Sized>(&self, visitor: &mut V, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        match self {
            J::CompilationUnit(n) => visitor.visit_compilation_unit(n, ctx),
            J::Block(n) => visitor.visit_block(n, ctx),
            J::If(n) => visitor.visit_if(n, ctx),
            J::Else(n) => visitor.visit_else(n, ctx),
            J::Return(n) => visitor.visit_return(n, ctx),
            J::Assignment(n) => visitor.visit_assignment(n, ctx),
            J::Binary(n) => visitor.visit_binary(n, ctx),
            J::Identifier(n) => visitor.visit_identifier(n, ctx),
            J::Literal(n) => visitor.visit_literal(n, ctx),
            J::FieldAccess(n) => visitor.visit_field_access(n, ctx),
            J::MethodInvocation(n) => visitor.visit_method_invocation(n, ctx),
            J::MethodDeclaration(n) => visitor.visit_method_declaration(n, ctx),
            J::Parentheses(n) => visitor.visit_parentheses(n, ctx),
            J::CollectionLiteral(n) => visitor.visit_collection_literal(n, ctx),
            J::Empty(n) => visitor.visit_empty(n, ctx),
            J::Unknown(n) => visitor.visit_unknown(n, ctx),
        }
    }
}

/// A visitor over J trees
pub trait JavaVisitor: TreeVisitor<J> {
    fn visit_space(&mut self, space: &Space, _loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        Ok(space.clone())
    }

    /// Visit the element of a right-padded wrapper inside its own frame, then its `after` space
    fn visit_right_padded(
        &mut self,
        padded: &RightPadded<J>,
        loc: RightPaddedLocation,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<RightPadded<J>>> {
        let parent = self.cursor().clone();
        self.set_cursor(parent.push(JValue::RightPadded(padded.clone(), loc)));
        let element = self.visit(Some(padded.element()), ctx);
        self.set_cursor(parent);
        let Some(element) = element? else {
            return Ok(None);
        };
        let after = self.visit_space(padded.after(), loc.after_location(), ctx)?;
        let markers = self.visit_markers(padded.markers(), ctx)?;
        Ok(Some(
            padded
                .with_element(element)
                .with_after(after)
                .with_markers(markers),
        ))
    }

    fn visit_right_padded_list(
        &mut self,
        padded: &[RightPadded<J>],
        loc: RightPaddedLocation,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Vec<RightPadded<J>>> {
        let mut visited = Vec::with_capacity(padded.len());
        for rp in padded {
            if let Some(rp) = self.visit_right_padded(rp, loc, ctx)? {
                visited.push(rp);
            }
        }
        Ok(visited)
    }

    fn visit_left_padded(
        &mut self,
        padded: &LeftPadded<J>,
        loc: LeftPaddedLocation,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<LeftPadded<J>>> {
        let parent = self.cursor().clone();
        self.set_cursor(parent.push(JValue::LeftPadded(loc)));
        let visited = self
            .visit_space(padded.before(), loc.before_location(), ctx)
            .and_then(|before| Ok((before, self.visit(Some(padded.element()), ctx)?)));
        self.set_cursor(parent);
        let (before, element) = visited?;
        let Some(element) = element else {
            return Ok(None);
        };
        let markers = self.visit_markers(padded.markers(), ctx)?;
        Ok(Some(
            padded
                .with_before(before)
                .with_element(element)
                .with_markers(markers),
        ))
    }

    /// The operator of a binary expression has no tree to visit, only its leading space
    fn visit_left_padded_operator(
        &mut self,
        padded: &LeftPadded<BinaryOperator>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<LeftPadded<BinaryOperator>> {
        let loc = LeftPaddedLocation::BinaryOperator;
        let parent = self.cursor().clone();
        self.set_cursor(parent.push(JValue::LeftPadded(loc)));
        let before = self.visit_space(padded.before(), loc.before_location(), ctx);
        self.set_cursor(parent);
        let markers = self.visit_markers(padded.markers(), ctx)?;
        Ok(padded.with_before(before?).with_markers(markers))
    }

    fn visit_container(
        &mut self,
        container: &Container<J>,
        loc: ContainerLocation,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Container<J>> {
        let parent = self.cursor().clone();
        self.set_cursor(parent.push(JValue::Container(loc)));
        let visited = self
            .visit_space(container.before(), loc.before_location(), ctx)
            .and_then(|before| {
                let elements = self.visit_right_padded_list(container.padded(), loc.element_location(), ctx)?;
                Ok((before, elements))
            });
        self.set_cursor(parent);
        let (before, elements) = visited?;
        let markers = self.visit_markers(container.markers(), ctx)?;
        Ok(container
            .with_before(before)
            .with_padded(elements)
            .with_markers(markers))
    }

    fn visit_compilation_unit(&mut self, cu: &Arc<CompilationUnit>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&cu.prefix, SpaceLocation::CompilationUnitPrefix, ctx)?;
        let markers = self.visit_markers(&cu.markers, ctx)?;
        let statements =
            self.visit_right_padded_list(&cu.statements, RightPaddedLocation::CompilationUnitStatement, ctx)?;
        let eof = self.visit_space(&cu.eof, SpaceLocation::CompilationUnitEof, ctx)?;
        Ok(Some(J::CompilationUnit(
            cu.with_prefix(prefix)
                .with_markers(markers)
                .with_padded_statements(statements)
                .with_eof(eof),
        )))
    }

    fn visit_block(&mut self, block: &Arc<Block>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&block.prefix, SpaceLocation::BlockPrefix, ctx)?;
        let markers = self.visit_markers(&block.markers, ctx)?;
        let statements = self.visit_right_padded_list(&block.statements, RightPaddedLocation::BlockStatement, ctx)?;
        let end = self.visit_space(&block.end, SpaceLocation::BlockEnd, ctx)?;
        Ok(Some(J::Block(
            block
                .with_prefix(prefix)
                .with_markers(markers)
                .with_padded_statements(statements)
                .with_end(end),
        )))
    }

    fn visit_if(&mut self, node: &Arc<If>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::IfPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(condition) = self.visit(Some(&node.condition), ctx)? else {
            return Ok(None);
        };
        let Some(then_part) = self.visit_right_padded(&node.then_part, RightPaddedLocation::IfThen, ctx)? else {
            return Ok(None);
        };
        let else_part = self.visit(node.else_part.as_ref(), ctx)?;
        Ok(Some(J::If(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_condition(condition)
                .with_then_part(then_part)
                .with_else_part(else_part),
        )))
    }

    fn visit_else(&mut self, node: &Arc<Else>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::ElsePrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(body) = self.visit_right_padded(&node.body, RightPaddedLocation::ElseBody, ctx)? else {
            return Ok(None);
        };
        Ok(Some(J::Else(
            node.with_prefix(prefix).with_markers(markers).with_body(body),
        )))
    }

    fn visit_return(&mut self, node: &Arc<Return>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::ReturnPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let expression = self.visit(node.expression.as_ref(), ctx)?;
        Ok(Some(J::Return(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_expression(expression),
        )))
    }

    fn visit_assignment(&mut self, node: &Arc<Assignment>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::AssignmentPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(variable) = self.visit(Some(&node.variable), ctx)? else {
            return Ok(None);
        };
        let Some(assignment) = self.visit_left_padded(&node.assignment, LeftPaddedLocation::AssignmentValue, ctx)?
        else {
            return Ok(None);
        };
        Ok(Some(J::Assignment(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_variable(variable)
                .with_assignment(assignment),
        )))
    }

    fn visit_binary(&mut self, node: &Arc<Binary>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::BinaryPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(left) = self.visit(Some(&node.left), ctx)? else {
            return Ok(None);
        };
        let operator = self.visit_left_padded_operator(&node.operator, ctx)?;
        let Some(right) = self.visit(Some(&node.right), ctx)? else {
            return Ok(None);
        };
        Ok(Some(J::Binary(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_left(left)
                .with_operator(operator)
                .with_right(right),
        )))
    }

    fn visit_identifier(&mut self, node: &Arc<Identifier>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::IdentifierPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        Ok(Some(J::Identifier(node.with_prefix(prefix).with_markers(markers))))
    }

    fn visit_literal(&mut self, node: &Arc<Literal>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::LiteralPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        Ok(Some(J::Literal(node.with_prefix(prefix).with_markers(markers))))
    }

    fn visit_field_access(&mut self, node: &Arc<FieldAccess>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::FieldAccessPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(target) = self.visit(Some(&node.target), ctx)? else {
            return Ok(None);
        };
        let Some(name) = self.visit_left_padded(&node.name, LeftPaddedLocation::FieldAccessName, ctx)? else {
            return Ok(None);
        };
        Ok(Some(J::FieldAccess(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_target(target)
                .with_name(name),
        )))
    }

    fn visit_method_invocation(
        &mut self,
        node: &Arc<MethodInvocation>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::MethodInvocationPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let select = match &node.select {
            Some(select) => self.visit_right_padded(select, RightPaddedLocation::MethodSelect, ctx)?,
            None => None,
        };
        let Some(name) = self.visit(Some(&node.name), ctx)? else {
            return Ok(None);
        };
        let arguments = self.visit_container(&node.arguments, ContainerLocation::MethodInvocationArguments, ctx)?;
        Ok(Some(J::MethodInvocation(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_select(select)
                .with_name(name)
                .with_padded_arguments(arguments),
        )))
    }

    fn visit_method_declaration(
        &mut self,
        node: &Arc<MethodDeclaration>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::MethodDeclarationPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let return_type = self.visit(node.return_type.as_ref(), ctx)?;
        let Some(name) = self.visit(Some(&node.name), ctx)? else {
            return Ok(None);
        };
        let parameters =
            self.visit_container(&node.parameters, ContainerLocation::MethodDeclarationParameters, ctx)?;
        let body = self.visit(node.body.as_ref(), ctx)?;
        Ok(Some(J::MethodDeclaration(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_return_type(return_type)
                .with_name(name)
                .with_padded_parameters(parameters)
                .with_body(body),
        )))
    }

    fn visit_parentheses(&mut self, node: &Arc<Parentheses>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::ParenthesesPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let Some(tree) = self.visit_right_padded(&node.tree, RightPaddedLocation::Parentheses, ctx)? else {
            return Ok(None);
        };
        Ok(Some(J::Parentheses(
            node.with_prefix(prefix).with_markers(markers).with_tree(tree),
        )))
    }

    fn visit_collection_literal(
        &mut self,
        node: &Arc<CollectionLiteral>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::CollectionLiteralPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        let elements = self.visit_container(&node.elements, ContainerLocation::CollectionElements, ctx)?;
        Ok(Some(J::CollectionLiteral(
            node.with_prefix(prefix)
                .with_markers(markers)
                .with_padded_elements(elements),
        )))
    }

    fn visit_empty(&mut self, node: &Arc<Empty>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::EmptyPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        Ok(Some(J::Empty(node.with_prefix(prefix).with_markers(markers))))
    }

    fn visit_unknown(&mut self, node: &Arc<Unknown>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let prefix = self.visit_space(&node.prefix, SpaceLocation::UnknownPrefix, ctx)?;
        let markers = self.visit_markers(&node.markers, ctx)?;
        Ok(Some(J::Unknown(node.with_prefix(prefix).with_markers(markers))))
    }
}
