//! Printing J trees back to source text
//!
//! Every byte of the input lives in some prefix, padding space or token, so a
//! parsed tree prints back to exactly its input. The dialect decides the
//! punctuation: braces and mandatory semicolons for Java, colons and optional
//! semicolons for Python.

use reweave_core::{Container, Print, PrintOutputCapture, RightPadded, Space};

use crate::markers::{Semicolon, TrailingComma};
use crate::tree::*;

impl Print for J {
    fn print_to(&self, capture: &mut PrintOutputCapture) {
        let dialect = match self {
            J::CompilationUnit(cu) => cu.dialect,
            _ => Dialect::default(),
        };
        self.print_with(dialect, capture);
    }
}

impl J {
    /// Print a subtree in the given dialect
    pub fn print_with(&self, dialect: Dialect, capture: &mut PrintOutputCapture) {
        Printer { dialect, capture }.tree(self);
    }

    /// Print a subtree to a string, skipping marker output
    pub fn print_in(&self, dialect: Dialect) -> String {
        let mut capture = PrintOutputCapture::with_marker_printer(Box::new(reweave_core::print::SanitizedMarkerPrinter));
        self.print_with(dialect, &mut capture);
        capture.into_string()
    }
}

impl Dialect {
    /// Whether a statement in this dialect is printed with a terminating `;`
    pub fn needs_semicolon(self, padded: &RightPadded<J>) -> bool {
        if padded.markers().find_first::<Semicolon>().is_some() {
            return true;
        }
        match self {
            Dialect::Python => false,
            Dialect::Java => match padded.element() {
                J::Block(_) | J::If(_) | J::Else(_) | J::Unknown(_) => false,
                J::MethodDeclaration(md) => md.body.is_none(),
                _ => true,
            },
        }
    }
}

struct Printer<'a> {
    dialect: Dialect,
    capture: &'a mut PrintOutputCapture,
}

impl Printer<'_> {
    fn text(&mut self, text: &str) {
        self.capture.append(text);
    }

    fn space(&mut self, space: &Space) {
        let rendered = space.render(self.dialect.comment_syntax());
        self.capture.append(&rendered);
    }

    fn tree(&mut self, tree: &J) {
        self.capture.before_prefix(tree.markers());
        self.space(tree.prefix());
        self.capture.before_syntax(tree.id(), tree.markers());
        match tree {
            J::CompilationUnit(cu) => {
                for statement in &cu.statements {
                    self.statement(statement);
                }
                self.space(&cu.eof);
            }
            J::Block(block) => {
                match self.dialect {
                    Dialect::Java => self.text("{"),
                    Dialect::Python => self.text(":"),
                }
                for statement in &block.statements {
                    self.statement(statement);
                }
                self.space(&block.end);
                if self.dialect == Dialect::Java {
                    self.text("}");
                }
            }
            J::If(node) => {
                self.text("if");
                self.tree(&node.condition);
                self.statement(&node.then_part);
                if let Some(else_part) = &node.else_part {
                    self.tree(else_part);
                }
            }
            J::Else(node) => {
                self.text("else");
                self.statement(&node.body);
            }
            J::Return(node) => {
                self.text("return");
                if let Some(expression) = &node.expression {
                    self.tree(expression);
                }
            }
            J::Assignment(node) => {
                self.tree(&node.variable);
                self.space(node.assignment.before());
                self.text("=");
                self.tree(node.assignment.element());
            }
            J::Binary(node) => {
                self.tree(&node.left);
                self.space(node.operator.before());
                self.text(node.operator.element().symbol(self.dialect));
                self.tree(&node.right);
            }
            J::Identifier(node) => self.text(&node.simple_name),
            J::Literal(node) => self.text(&node.value_source),
            J::FieldAccess(node) => {
                self.tree(&node.target);
                self.space(node.name.before());
                self.text(".");
                self.tree(node.name.element());
            }
            J::MethodInvocation(node) => {
                if let Some(select) = &node.select {
                    self.tree(select.element());
                    self.space(select.after());
                    self.text(".");
                }
                self.tree(&node.name);
                self.container(&node.arguments, "(", ")");
            }
            J::MethodDeclaration(node) => {
                if self.dialect == Dialect::Python {
                    self.text("def");
                }
                if let Some(return_type) = &node.return_type {
                    self.tree(return_type);
                }
                self.tree(&node.name);
                self.container(&node.parameters, "(", ")");
                if let Some(body) = &node.body {
                    self.tree(body);
                }
            }
            J::Parentheses(node) => {
                self.text("(");
                self.tree(node.tree.element());
                self.space(node.tree.after());
                self.text(")");
            }
            J::CollectionLiteral(node) => {
                let (open, close) = node.kind.delimiters();
                self.container(&node.elements, open, close);
            }
            J::Empty(_) => {}
            J::Unknown(node) => self.text(&node.text),
        }
        self.capture.after_syntax(tree.markers());
    }

    fn statement(&mut self, padded: &RightPadded<J>) {
        self.tree(padded.element());
        self.space(padded.after());
        if self.dialect.needs_semicolon(padded) {
            self.text(";");
        }
    }

    fn container(&mut self, container: &Container<J>, open: &str, close: &str) {
        self.space(container.before());
        self.text(open);
        let padded = container.padded();
        for (index, element) in padded.iter().enumerate() {
            self.tree(element.element());
            self.space(element.after());
            if index + 1 < padded.len() {
                self.text(",");
            } else if let Some(trailing) = element.markers().find_first::<TrailingComma>() {
                self.text(",");
                self.space(&trailing.suffix);
            }
        }
        self.text(close);
    }
}
