//! Visiting JSON trees

use std::sync::Arc;

use reweave_core::{ExecutionContext, Result, RightPadded, Space, TreeVisitor};

use crate::tree::*;

/// Implements the required [`TreeVisitor`] methods for a visitor that keeps
/// its state in the named field and dispatches through [`JsonVisitor`].
#[macro_export]
macro_rules! json_tree_visitor {
    ($state:ident) => {
        fn state(&self) -> &$crate::reweave_core::VisitorState<$crate::Json> {
            &self.$state
        }

        fn state_mut(&mut self) -> &mut $crate::reweave_core::VisitorState<$crate::Json> {
            &mut self.$state
        }

        fn accept(
            &mut self,
            tree: &$crate::Json,
            ctx: &mut dyn $crate::reweave_core::ExecutionContext,
        ) -> $crate::reweave_core::Result<Option<$crate::Json>> {
            tree.accept(self, ctx)
        }
    };
}

impl Json {
    pub fn accept<V: JsonVisitor + ?Sized>(&self, visitor: &mut V, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        match self {
            Json::Document(n) => visitor.visit_document(n, ctx),
            Json::Object(n) => visitor.visit_object(n, ctx),
            Json::Member(n) => visitor.visit_member(n, ctx),
            Json::Array(n) => visitor.visit_array(n, ctx),
            Json::Literal(n) => visitor.visit_literal(n, ctx),
            Json::Identifier(n) => visitor.visit_identifier(n, ctx),
            Json::Empty(n) => visitor.visit_empty(n, ctx),
        }
    }
}

/// A visitor over JSON trees
pub trait JsonVisitor: TreeVisitor<Json> {
    fn visit_space(&mut self, space: &Space, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        Ok(space.clone())
    }

    fn visit_right_padded(
        &mut self,
        padded: &RightPadded<Json>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Option<RightPadded<Json>>> {
        let parent = self.cursor().clone();
        self.set_cursor(parent.push(JsonCursorValue::RightPadded(padded.clone())));
        let element = self.visit(Some(padded.element()), ctx);
        self.set_cursor(parent);
        let Some(element) = element? else {
            return Ok(None);
        };
        let after = self.visit_space(padded.after(), ctx)?;
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
        padded: &[RightPadded<Json>],
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Vec<RightPadded<Json>>> {
        let mut visited = Vec::with_capacity(padded.len());
        for rp in padded {
            if let Some(rp) = self.visit_right_padded(rp, ctx)? {
                visited.push(rp);
            }
        }
        Ok(visited)
    }

    fn visit_document(&mut self, document: &Arc<Document>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&document.prefix, ctx)?;
        let markers = self.visit_markers(&document.markers, ctx)?;
        let Some(value) = self.visit(Some(&document.value), ctx)? else {
            return Ok(None);
        };
        let eof = self.visit_space(&document.eof, ctx)?;
        Ok(Some(Json::Document(
            document
                .with_prefix(prefix)
                .with_markers(markers)
                .with_value(value)
                .with_eof(eof),
        )))
    }

    fn visit_object(&mut self, object: &Arc<Object>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&object.prefix, ctx)?;
        let markers = self.visit_markers(&object.markers, ctx)?;
        let members = self.visit_right_padded_list(&object.members, ctx)?;
        Ok(Some(Json::Object(
            object
                .with_prefix(prefix)
                .with_markers(markers)
                .with_padded_members(members),
        )))
    }

    fn visit_member(&mut self, member: &Arc<Member>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&member.prefix, ctx)?;
        let markers = self.visit_markers(&member.markers, ctx)?;
        let Some(key) = self.visit_right_padded(&member.key, ctx)? else {
            return Ok(None);
        };
        let Some(value) = self.visit(Some(&member.value), ctx)? else {
            return Ok(None);
        };
        Ok(Some(Json::Member(
            member
                .with_prefix(prefix)
                .with_markers(markers)
                .with_key(key)
                .with_value(value),
        )))
    }

    fn visit_array(&mut self, array: &Arc<Array>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&array.prefix, ctx)?;
        let markers = self.visit_markers(&array.markers, ctx)?;
        let values = self.visit_right_padded_list(&array.values, ctx)?;
        Ok(Some(Json::Array(
            array
                .with_prefix(prefix)
                .with_markers(markers)
                .with_padded_values(values),
        )))
    }

    fn visit_literal(&mut self, literal: &Arc<Literal>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&literal.prefix, ctx)?;
        let markers = self.visit_markers(&literal.markers, ctx)?;
        Ok(Some(Json::Literal(literal.with_prefix(prefix).with_markers(markers))))
    }

    fn visit_identifier(&mut self, identifier: &Arc<Identifier>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&identifier.prefix, ctx)?;
        let markers = self.visit_markers(&identifier.markers, ctx)?;
        Ok(Some(Json::Identifier(identifier.with_prefix(prefix).with_markers(markers))))
    }

    fn visit_empty(&mut self, empty: &Arc<Empty>, ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let prefix = self.visit_space(&empty.prefix, ctx)?;
        let markers = self.visit_markers(&empty.markers, ctx)?;
        Ok(Some(Json::Empty(empty.with_prefix(prefix).with_markers(markers))))
    }
}
