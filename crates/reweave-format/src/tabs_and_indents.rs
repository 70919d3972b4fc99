//! Reindentation of every line start
//!
//! Indentation state travels in cursor messages:
//! - [`INDENT_TYPE`] on each tree frame says how that tree's children relate
//!   to it (aligned, one indent deeper, or a continuation indent deeper)
//! - [`LAST_INDENT`] is the column of the nearest enclosing tree that starts a line
//! - [`CHAINED_INDENT`] sits on the outermost call of a method chain so every
//!   wrapped `.segment()` of the chain lands on the same column
//!
//! Wrapped elements of argument, parameter and collection lists either align
//! with the first element or take a continuation indent. The space before the
//! closing delimiter goes back to the enclosing column.

use reweave_core::print::{SanitizedMarkerPrinter, column_of};
use reweave_core::{
    Container, Cursor, ExecutionContext, PrintOutputCapture, RefEq, Result, RightPadded, Space, TreeId,
    TreeVisitor, VisitorState,
};
use reweave_java::{
    ContainerLocation, J, JValue, JavaVisitor, RightPaddedLocation, SpaceLocation, TrailingComma, enclosing_dialect,
    java_tree_visitor,
};

use crate::indent::{indent_to, indent_width};
use crate::style::TabsAndIndentsStyle;

pub const INDENT_TYPE: &str = "indentType";
pub const LAST_INDENT: &str = "lastIndent";
pub const CHAINED_INDENT: &str = "chainedIndent";

/// Column where the first token of a tree that begins a line now sits
const LINE_START: &str = "lineStart";
/// Target column for the element of a list wrapper
const ELEMENT_INDENT: &str = "elementIndent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentType {
    Align,
    Indent,
    ContinuationIndent,
}

pub struct TabsAndIndentsVisitor {
    state: VisitorState<J>,
    style: TabsAndIndentsStyle,
}

impl TabsAndIndentsVisitor {
    pub fn new(style: TabsAndIndentsStyle, stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::stopping_after(stop_after),
            style,
        }
    }

    fn column_for(&self, indent: usize, indent_type: IndentType) -> usize {
        match indent_type {
            IndentType::Align => indent,
            IndentType::Indent => indent + self.style.indent_size,
            IndentType::ContinuationIndent => indent + self.style.continuation_indent,
        }
    }

    /// Column every wrapped segment of the chain containing `cursor` starts at
    fn chained_indent(&self, cursor: &Cursor<JValue>) -> usize {
        let mut top = cursor;
        while let Some(padded) = top.parent() {
            let Some(call) = padded.parent() else { break };
            let selects = padded.value().right_padded_location() == Some(RightPaddedLocation::MethodSelect);
            if !selects || !matches!(call.tree(), Some(J::MethodInvocation(_))) {
                break;
            }
            top = call;
        }
        if let Some(indent) = top.get_message::<usize>(CHAINED_INDENT) {
            return indent;
        }
        let indent = top.get_nearest_message_or(LAST_INDENT, 0usize) + self.style.continuation_indent;
        top.put_message(CHAINED_INDENT, indent);
        indent
    }

    /// Column of the first list element when it shares a line with the opening delimiter
    fn first_element_column(&self, owner: &Cursor<JValue>, first: TreeId) -> Option<usize> {
        let anchor = owner
            .ancestors()
            .find(|c| c.tree().is_some() && c.get_message::<usize>(LINE_START).is_some())?;
        let line_start = anchor.get_message::<usize>(LINE_START)?;
        let tree = anchor.tree()?;
        let dialect = enclosing_dialect(owner);

        let mut capture = PrintOutputCapture::with_marker_printer(Box::new(SanitizedMarkerPrinter)).probing(first);
        tree.print_with(dialect, &mut capture);
        let offset = capture.probe_offset()?;
        let text = capture.out();
        let prefix_len = tree.prefix().render(dialect.comment_syntax()).len().min(offset);

        let segment = &text[prefix_len..offset];
        if segment.contains('\n') {
            Some(column_of(text, offset))
        } else {
            Some(line_start + segment.chars().count())
        }
    }

    fn format_container(
        &mut self,
        container: &Container<J>,
        loc: ContainerLocation,
        owner: &Cursor<JValue>,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<(Space, Vec<RightPadded<J>>)> {
        let before = self.visit_space(container.before(), loc.before_location(), ctx)?;

        let enclosing = owner.get_nearest_message_or(LAST_INDENT, 0usize);
        let wrapped = match loc {
            ContainerLocation::CollectionElements if !self.style.use_continuation_indent_for_collections => {
                enclosing + self.style.indent_size
            }
            _ => enclosing + self.style.continuation_indent,
        };
        let align = match loc {
            ContainerLocation::MethodInvocationArguments => self.style.align_multiline_arguments,
            ContainerLocation::MethodDeclarationParameters => self.style.align_multiline_parameters,
            ContainerLocation::CollectionElements => false,
        };

        let element_loc = loc.element_location();
        let padded = container.padded();
        let last = padded.len().saturating_sub(1);
        let mut target = wrapped;
        let mut visited = Vec::with_capacity(padded.len());

        for (index, rp) in padded.iter().enumerate() {
            let parent = self.cursor().clone();
            let frame = parent.push(JValue::RightPadded(rp.clone(), element_loc));
            frame.put_message(ELEMENT_INDENT, target);
            self.set_cursor(frame);
            let element = self.visit(Some(rp.element()), ctx);
            self.set_cursor(parent);
            let Some(element) = element? else {
                continue;
            };

            if index == 0 && align {
                let prefix = element.prefix().last_whitespace();
                target = if prefix.contains('\n') {
                    indent_width(prefix, self.style.tab_size)
                } else {
                    self.first_element_column(owner, rp.element().id()).unwrap_or(wrapped)
                };
            }

            if self.state().is_stopped() {
                visited.push(rp.with_element(element));
                continue;
            }

            let trailing = rp.markers().find_first::<TrailingComma>();
            let after_column = if index == last && trailing.is_none() {
                enclosing
            } else {
                target
            };
            let after = indent_to(rp.after(), after_column, &self.style);
            let markers = match trailing {
                Some(comma) if index == last => {
                    let suffix = indent_to(&comma.suffix, enclosing, &self.style);
                    if suffix.ref_eq(&comma.suffix) {
                        rp.markers().clone()
                    } else {
                        rp.markers().set_by_type(comma.with_suffix(suffix))
                    }
                }
                _ => rp.markers().clone(),
            };
            visited.push(rp.with_element(element).with_after(after).with_markers(markers));
        }
        Ok((before, visited))
    }
}

/// Alignment the space at `loc` takes regardless of the enclosing indent type
fn forced_align(cursor: &Cursor<JValue>, loc: SpaceLocation) -> bool {
    match loc {
        SpaceLocation::BlockEnd
        | SpaceLocation::ElsePrefix
        | SpaceLocation::IfThenSuffix
        | SpaceLocation::ElseSuffix
        | SpaceLocation::ParenthesesSuffix
        | SpaceLocation::BlockStatementSuffix
        | SpaceLocation::CompilationUnitStatementSuffix
        | SpaceLocation::CompilationUnitEof => true,
        SpaceLocation::BlockPrefix => !matches!(
            cursor.parent_tree_cursor().and_then(Cursor::tree),
            Some(J::Block(_)) | Some(J::CompilationUnit(_))
        ),
        _ => false,
    }
}

/// The target column a list wrapper assigned to the tree whose prefix this is
fn element_indent(cursor: &Cursor<JValue>, loc: SpaceLocation) -> Option<usize> {
    if !loc.is_tree_prefix() {
        return None;
    }
    let parent = cursor.parent()?;
    match parent.value() {
        JValue::RightPadded(_, location) if location.is_container_element() => parent.get_message(ELEMENT_INDENT),
        _ => None,
    }
}

impl TreeVisitor<J> for TabsAndIndentsVisitor {
    java_tree_visitor!(state);

    fn pre_visit(&mut self, tree: J, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let indent_type = match &tree {
            J::CompilationUnit(_) => {
                self.cursor().put_message(LAST_INDENT, 0usize);
                self.cursor().put_message(LINE_START, 0usize);
                IndentType::Align
            }
            J::Block(_) | J::If(_) | J::Else(_) => IndentType::Indent,
            J::CollectionLiteral(_) if !self.style.use_continuation_indent_for_collections => IndentType::Indent,
            _ => IndentType::ContinuationIndent,
        };
        self.cursor().put_message(INDENT_TYPE, indent_type);
        Ok(Some(tree))
    }
}

impl JavaVisitor for TabsAndIndentsVisitor {
    fn visit_space(&mut self, space: &Space, loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        if self.state().is_stopped() {
            return Ok(space.clone());
        }
        if loc == SpaceLocation::CompilationUnitPrefix {
            return Ok(indent_to(&space.with_whitespace(""), 0, &self.style));
        }
        if !space.contains_newline() {
            return Ok(space.clone());
        }

        let cursor = self.cursor().clone();
        let column = if loc == SpaceLocation::MethodSelectSuffix {
            self.chained_indent(&cursor)
        } else if let Some(column) = element_indent(&cursor, loc) {
            column
        } else {
            let indent = cursor.get_nearest_message_or(LAST_INDENT, 0usize);
            let indent_type = if forced_align(&cursor, loc) {
                IndentType::Align
            } else if loc.is_tree_prefix() {
                cursor
                    .parent()
                    .map_or(IndentType::Align, |p| p.get_nearest_message_or(INDENT_TYPE, IndentType::Align))
            } else {
                cursor.get_nearest_message_or(INDENT_TYPE, IndentType::Align)
            };
            self.column_for(indent, indent_type)
        };

        let indented = indent_to(space, column, &self.style);
        if loc.is_tree_prefix() {
            cursor.put_message(LAST_INDENT, column);
            if space.last_whitespace().contains('\n') {
                cursor.put_message(LINE_START, column);
            }
        } else if loc == SpaceLocation::MethodSelectSuffix {
            cursor.put_message(LAST_INDENT, column);
        }
        Ok(indented)
    }

    fn visit_container(
        &mut self,
        container: &Container<J>,
        loc: ContainerLocation,
        ctx: &mut dyn ExecutionContext,
    ) -> Result<Container<J>> {
        let owner = self.cursor().clone();
        self.set_cursor(owner.push(JValue::Container(loc)));
        let formatted = self.format_container(container, loc, &owner, ctx);
        self.set_cursor(owner);
        let (before, padded) = formatted?;
        let markers = self.visit_markers(container.markers(), ctx)?;
        Ok(container
            .with_before(before)
            .with_padded(padded)
            .with_markers(markers))
    }
}
