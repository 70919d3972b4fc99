//! Lossless recursive-descent parser for the brace dialect
//!
//! Every whitespace and comment run becomes the prefix of the next node or the
//! padding of a wrapper, so printing the result reproduces the input byte for
//! byte. Only the J catalog is understood; anything else is a parse error
//! carrying the line and column where parsing stopped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reweave_core::{
    Container, FileAttributes, LeftPadded, Markers, ParseExceptionResult, ReweaveError, Result, ResultExt,
    RightPadded, Space, random_id,
};

use crate::markers::TrailingComma;
use crate::tree::*;

/// Binary operators, longest spelling first so `<=` wins over `<`
const OPERATORS: &[(&str, BinaryOperator)] = &[
    ("==", BinaryOperator::Equal),
    ("!=", BinaryOperator::NotEqual),
    ("<=", BinaryOperator::LessThanOrEqual),
    (">=", BinaryOperator::GreaterThanOrEqual),
    ("&&", BinaryOperator::And),
    ("||", BinaryOperator::Or),
    ("+", BinaryOperator::Addition),
    ("-", BinaryOperator::Subtraction),
    ("*", BinaryOperator::Multiplication),
    ("/", BinaryOperator::Division),
    ("%", BinaryOperator::Modulo),
    ("<", BinaryOperator::LessThan),
    (">", BinaryOperator::GreaterThan),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Expression,
    Parameter,
}

/// Parser for Java-like sources
pub struct JavaParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> JavaParser<'a> {
    /// Parse a whole source unit
    pub fn parse(source: &'a str, path: impl Into<PathBuf>) -> Result<J> {
        let path = path.into();
        if Dialect::from_path(&path) == Dialect::Python {
            return Err(ReweaveError::not_implemented(format!(
                "parsing the python dialect ({})",
                path.display()
            )));
        }
        let mut parser = JavaParser { source, pos: 0 };
        let cu = parser.compilation_unit(path)?;
        tracing::debug!(path = %cu.source_path.display(), statements = cu.statements.len(), "parsed");
        Ok(J::CompilationUnit(cu))
    }

    /// Parse, keeping unparseable input as a single verbatim node marked with the failure
    pub fn parse_lenient(source: &'a str, path: impl Into<PathBuf>) -> J {
        let path = path.into();
        match Self::parse(source, path.clone()) {
            Ok(cu) => cu,
            Err(error) => {
                tracing::warn!(path = %path.display(), "{}", error);
                let unknown = J::Unknown(Unknown::build(source));
                let cu = CompilationUnit::build(Dialect::Java, path, vec![RightPadded::build(unknown)]);
                let markers = cu
                    .markers
                    .add(ParseExceptionResult::new("JavaParser", format!("{:?}", error.kind()), error.to_string()));
                J::CompilationUnit(cu.with_markers(markers))
            }
        }
    }

    /// Read and parse a file, capturing its attributes
    pub fn parse_path(path: &Path) -> Result<J> {
        let source = std::fs::read_to_string(path).map_err(|e| ReweaveError::io_error(path, e))?;
        let attributes = FileAttributes::from_path(path).log_and_continue();
        match JavaParser::parse(&source, path)? {
            J::CompilationUnit(cu) => Ok(J::CompilationUnit(cu.with_file_attributes(attributes))),
            other => Ok(other),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&self, message: impl Into<String>) -> ReweaveError {
        let consumed = &self.source[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed.rfind('\n').map_or(consumed, |i| &consumed[i + 1..]).chars().count() + 1;
        ReweaveError::parse_error(message, line, column)
    }

    fn found(&self) -> String {
        match self.rest().chars().next() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        }
    }

    /// Consume whitespace and comments
    fn whitespace(&mut self) -> Result<Space> {
        let start = self.pos;
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if let Some(body) = trimmed.strip_prefix("//") {
                self.pos += 2 + body.find('\n').unwrap_or(body.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                match body.find("*/") {
                    Some(end) => self.pos += 2 + end + 2,
                    None => return Err(self.error("unterminated block comment")),
                }
            } else {
                break;
            }
        }
        Ok(Space::format(&self.source[start..self.pos]))
    }

    /// Whether `token` follows the upcoming whitespace, without consuming anything
    fn peek_token(&mut self, token: &str) -> Result<bool> {
        let save = self.pos;
        self.whitespace()?;
        let found = self.rest().starts_with(token);
        self.pos = save;
        Ok(found)
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}', found {}", self.found())))
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.rest()
            .strip_prefix(keyword)
            .is_some_and(|after| !after.starts_with(is_identifier_char))
    }

    fn identifier_len(&self) -> usize {
        let rest = self.rest();
        match rest.chars().next() {
            Some(c) if is_identifier_start(c) => rest.find(|c: char| !is_identifier_char(c)).unwrap_or(rest.len()),
            _ => 0,
        }
    }

    fn identifier(&mut self) -> Result<&'a str> {
        let len = self.identifier_len();
        if len == 0 {
            return Err(self.error(format!("expected identifier, found {}", self.found())));
        }
        let name = &self.source[self.pos..self.pos + len];
        self.pos += len;
        Ok(name)
    }

    fn compilation_unit(&mut self, path: PathBuf) -> Result<Arc<CompilationUnit>> {
        let mut statements = Vec::new();
        let eof = loop {
            let save = self.pos;
            let space = self.whitespace()?;
            if self.at_end() {
                break space;
            }
            self.pos = save;
            statements.push(self.statement()?);
        };
        let cu = CompilationUnit::build(Dialect::Java, path, statements);
        Ok(cu.with_eof(eof))
    }

    fn statement(&mut self) -> Result<RightPadded<J>> {
        let prefix = self.whitespace()?;
        if self.rest().starts_with('{') {
            return Ok(RightPadded::build(self.block(prefix)?));
        }
        if self.at_keyword("if") {
            return Ok(RightPadded::build(self.if_statement(prefix)?));
        }
        if self.rest().starts_with(';') {
            self.pos += 1;
            return Ok(RightPadded::build(J::Empty(Empty::build().with_prefix(prefix))));
        }

        let statement = if self.at_keyword("return") {
            self.return_statement(prefix)?
        } else if let Some(declaration) = self.method_declaration(prefix.clone())? {
            if matches!(&declaration, J::MethodDeclaration(md) if md.body.is_some()) {
                return Ok(RightPadded::build(declaration));
            }
            declaration
        } else if self.at_keyword("else") {
            return Err(self.error("'else' without 'if'"));
        } else {
            self.expression(prefix)?
        };

        let after = self.whitespace()?;
        self.expect(";")?;
        Ok(RightPadded::new(statement, after, Markers::empty()))
    }

    fn block(&mut self, prefix: Space) -> Result<J> {
        self.expect("{")?;
        let mut statements = Vec::new();
        let end = loop {
            let save = self.pos;
            let space = self.whitespace()?;
            if self.rest().starts_with('}') {
                self.pos += 1;
                break space;
            }
            if self.at_end() {
                return Err(self.error("expected '}', found end of input"));
            }
            self.pos = save;
            statements.push(self.statement()?);
        };
        Ok(J::Block(Block::build(statements).with_prefix(prefix).with_end(end)))
    }

    fn if_statement(&mut self, prefix: Space) -> Result<J> {
        self.expect("if")?;
        let condition_prefix = self.whitespace()?;
        let condition = self.parentheses(condition_prefix)?;
        let then_part = self.statement()?;

        let save = self.pos;
        let else_prefix = self.whitespace()?;
        let else_part = if self.at_keyword("else") {
            self.pos += "else".len();
            let body = self.statement()?;
            Some(J::Else(Arc::new(Else {
                id: random_id(),
                prefix: else_prefix,
                markers: Markers::empty(),
                body,
            })))
        } else {
            self.pos = save;
            None
        };

        Ok(J::If(Arc::new(If {
            id: random_id(),
            prefix,
            markers: Markers::empty(),
            condition,
            then_part,
            else_part,
        })))
    }

    fn return_statement(&mut self, prefix: Space) -> Result<J> {
        self.expect("return")?;
        let expression = if self.peek_token(";")? {
            None
        } else {
            let expression_prefix = self.whitespace()?;
            Some(self.expression(expression_prefix)?)
        };
        Ok(J::Return(Return::build(expression).with_prefix(prefix)))
    }

    /// `Type name(params) { ... }` or `Type name(params);`, or nothing when the
    /// input does not start with two or more identifiers followed by `(`
    fn method_declaration(&mut self, prefix: Space) -> Result<Option<J>> {
        let start = self.pos;
        let mut names: Vec<(usize, Space, &'a str)> = Vec::new();
        loop {
            let save = self.pos;
            let space = if names.is_empty() { Space::empty() } else { self.whitespace()? };
            if self.identifier_len() == 0 {
                self.pos = save;
                break;
            }
            names.push((save, space, self.identifier()?));
        }
        if names.len() < 2 || !self.peek_token("(")? {
            self.pos = start;
            return Ok(None);
        }

        let Some((name_start, name_prefix, name)) = names.pop() else {
            return Ok(None);
        };
        let return_type = if names.len() == 1 {
            J::identifier(names[0].2)
        } else {
            J::Unknown(Unknown::build(&self.source[start..name_start]))
        };
        let name = J::Identifier(Identifier::build(name).with_prefix(name_prefix));

        let before = self.whitespace()?;
        let parameters = self.container(before, "(", ")", ElementKind::Parameter)?;

        let body = if self.peek_token("{")? {
            let body_prefix = self.whitespace()?;
            Some(self.block(body_prefix)?)
        } else {
            None
        };

        Ok(Some(J::MethodDeclaration(Arc::new(MethodDeclaration {
            id: random_id(),
            prefix,
            markers: Markers::empty(),
            return_type: Some(return_type),
            name,
            parameters,
            body,
        }))))
    }

    fn parameter(&mut self, prefix: Space) -> Result<J> {
        let start = self.pos;
        self.identifier()?;
        let mut end = self.pos;
        loop {
            let save = self.pos;
            self.whitespace()?;
            if self.identifier_len() == 0 {
                self.pos = save;
                break;
            }
            self.identifier()?;
            end = self.pos;
        }
        self.pos = end;
        let text = &self.source[start..end];
        if text.contains(|c: char| !is_identifier_char(c)) {
            Ok(J::Unknown(Unknown::build(text).with_prefix(prefix)))
        } else {
            Ok(J::Identifier(Identifier::build(text).with_prefix(prefix)))
        }
    }

    fn parentheses(&mut self, prefix: Space) -> Result<J> {
        self.expect("(")?;
        let inner_prefix = self.whitespace()?;
        let inner = self.expression(inner_prefix)?;
        let after = self.whitespace()?;
        self.expect(")")?;
        Ok(J::Parentheses(Arc::new(Parentheses {
            id: random_id(),
            prefix,
            markers: Markers::empty(),
            tree: RightPadded::new(inner, after, Markers::empty()),
        })))
    }

    /// A delimited, comma separated list; `before` precedes the opening delimiter
    fn container(&mut self, before: Space, open: &str, close: &str, kind: ElementKind) -> Result<Container<J>> {
        self.expect(open)?;

        let save = self.pos;
        let space = self.whitespace()?;
        if self.rest().starts_with(close) {
            self.pos += close.len();
            let empty = J::Empty(Empty::build().with_prefix(space));
            return Ok(Container::build(before, vec![RightPadded::build(empty)], Markers::empty()));
        }
        self.pos = save;

        let mut elements = Vec::new();
        loop {
            let prefix = self.whitespace()?;
            let element = match kind {
                ElementKind::Expression => self.expression(prefix)?,
                ElementKind::Parameter => self.parameter(prefix)?,
            };
            let after = self.whitespace()?;
            if self.rest().starts_with(',') {
                self.pos += 1;
                let save = self.pos;
                let suffix = self.whitespace()?;
                if self.rest().starts_with(close) {
                    self.pos += close.len();
                    let markers = Markers::empty().add(TrailingComma::new(suffix));
                    elements.push(RightPadded::new(element, after, markers));
                    break;
                }
                self.pos = save;
                elements.push(RightPadded::new(element, after, Markers::empty()));
            } else if self.rest().starts_with(close) {
                self.pos += close.len();
                elements.push(RightPadded::new(element, after, Markers::empty()));
                break;
            } else {
                return Err(self.error(format!("expected ',' or '{close}', found {}", self.found())));
            }
        }
        Ok(Container::build(before, elements, Markers::empty()))
    }

    fn expression(&mut self, prefix: Space) -> Result<J> {
        let target = self.binary(prefix, 0)?;

        let save = self.pos;
        let before = self.whitespace()?;
        if self.rest().starts_with('=') && !self.rest().starts_with("==") {
            self.pos += 1;
            let value_prefix = self.whitespace()?;
            let value = self.expression(value_prefix)?;
            return Ok(J::Assignment(Arc::new(Assignment {
                id: random_id(),
                prefix: target.prefix().clone(),
                markers: Markers::empty(),
                variable: target.with_prefix(Space::empty()),
                assignment: LeftPadded::new(before, value, Markers::empty()),
                type_tag: None,
            })));
        }
        self.pos = save;
        Ok(target)
    }

    fn binary(&mut self, prefix: Space, min_precedence: u8) -> Result<J> {
        let mut left = self.postfix(prefix)?;
        loop {
            let save = self.pos;
            let before = self.whitespace()?;
            let rest = self.rest();
            let operator = OPERATORS.iter().find(|(symbol, _)| rest.starts_with(symbol));
            let Some(&(symbol, operator)) = operator.filter(|(_, op)| op.precedence() >= min_precedence) else {
                self.pos = save;
                return Ok(left);
            };
            self.pos += symbol.len();
            let right_prefix = self.whitespace()?;
            let right = self.binary(right_prefix, operator.precedence() + 1)?;
            left = J::Binary(Arc::new(Binary {
                id: random_id(),
                prefix: left.prefix().clone(),
                markers: Markers::empty(),
                left: left.with_prefix(Space::empty()),
                operator: LeftPadded::new(before, operator, Markers::empty()),
                right,
                type_tag: None,
            }));
        }
    }

    /// Field accesses and method calls chained onto a primary
    fn postfix(&mut self, prefix: Space) -> Result<J> {
        let mut expression = self.primary(prefix)?;
        loop {
            let save = self.pos;
            let before_dot = self.whitespace()?;
            if !self.rest().starts_with('.') {
                self.pos = save;
                return Ok(expression);
            }
            self.pos += 1;
            let name_prefix = self.whitespace()?;
            let name = J::Identifier(Identifier::build(self.identifier()?).with_prefix(name_prefix));

            if self.peek_token("(")? {
                let arguments_before = self.whitespace()?;
                let arguments = self.container(arguments_before, "(", ")", ElementKind::Expression)?;
                expression = J::MethodInvocation(Arc::new(MethodInvocation {
                    id: random_id(),
                    prefix: expression.prefix().clone(),
                    markers: Markers::empty(),
                    select: Some(RightPadded::new(
                        expression.with_prefix(Space::empty()),
                        before_dot,
                        Markers::empty(),
                    )),
                    name,
                    arguments,
                    type_tag: None,
                }));
            } else {
                expression = J::FieldAccess(Arc::new(FieldAccess {
                    id: random_id(),
                    prefix: expression.prefix().clone(),
                    markers: Markers::empty(),
                    target: expression.with_prefix(Space::empty()),
                    name: LeftPadded::new(before_dot, name, Markers::empty()),
                    type_tag: None,
                }));
            }
        }
    }

    fn primary(&mut self, prefix: Space) -> Result<J> {
        let rest = self.rest();
        let Some(first) = rest.chars().next() else {
            return Err(self.error("expected expression, found end of input"));
        };

        if first == '(' {
            return self.parentheses(prefix);
        }
        if first == '[' {
            let elements = self.container(Space::empty(), "[", "]", ElementKind::Expression)?;
            return Ok(J::CollectionLiteral(Arc::new(CollectionLiteral {
                id: random_id(),
                prefix,
                markers: Markers::empty(),
                kind: CollectionKind::List,
                elements,
                type_tag: None,
            })));
        }
        if first == '"' || first == '\'' {
            let len = quoted_len(rest, first).ok_or_else(|| self.error("unterminated literal"))?;
            return Ok(self.literal(prefix, len));
        }
        let negative_number = first == '-' && rest[1..].starts_with(|c: char| c.is_ascii_digit());
        if first.is_ascii_digit() || negative_number {
            let body = &rest[1..];
            let len = 1 + body
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                .unwrap_or(body.len());
            return Ok(self.literal(prefix, len));
        }
        if is_identifier_start(first) {
            if self.at_keyword("true") || self.at_keyword("false") || self.at_keyword("null") {
                let len = self.identifier_len();
                return Ok(self.literal(prefix, len));
            }
            let name = J::identifier(self.identifier()?);
            if self.peek_token("(")? {
                let before = self.whitespace()?;
                let arguments = self.container(before, "(", ")", ElementKind::Expression)?;
                return Ok(J::MethodInvocation(Arc::new(MethodInvocation {
                    id: random_id(),
                    prefix,
                    markers: Markers::empty(),
                    select: None,
                    name,
                    arguments,
                    type_tag: None,
                })));
            }
            return Ok(name.with_prefix(prefix));
        }

        Err(self.error(format!("expected expression, found {}", self.found())))
    }

    fn literal(&mut self, prefix: Space, len: usize) -> J {
        let text = &self.source[self.pos..self.pos + len];
        self.pos += len;
        J::Literal(Literal::build(text).with_prefix(prefix))
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte length of a quoted literal including both quotes
fn quoted_len(text: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (index, c) in text.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            '\n' => return None,
            c if c == quote && !escaped => return Some(index + c.len_utf8()),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use reweave_core::{ErrorKind, Print};

    fn roundtrip(source: &str) -> J {
        let cu = JavaParser::parse(source, "Test.java").expect("parse");
        assert_eq!(cu.print_trimmed_markers(), source);
        cu
    }

    #[test]
    fn test_statements_roundtrip() {
        roundtrip("int main() {\n    x = 1 + 2 * 3;\n    if (x > 1) {\n        return x;\n    } else return 0;\n}\n");
        roundtrip("  a.b.c(1, \"two\" , [3, 4,]) ;;\n// trailing\n");
        roundtrip("void run(int a,\n         String b);\n/* done */");
    }

    #[test]
    fn test_precedence() {
        let cu = roundtrip("x = a + b * c == d;");
        let J::CompilationUnit(cu) = cu else { panic!("not a compilation unit") };
        let J::Assignment(assignment) = cu.statements[0].element() else { panic!("not an assignment") };
        let J::Binary(eq) = assignment.assignment.element() else { panic!("not a binary") };
        assert_eq!(*eq.operator.element(), BinaryOperator::Equal);
        let J::Binary(add) = &eq.left else { panic!("not a binary") };
        assert_eq!(*add.operator.element(), BinaryOperator::Addition);
        assert!(matches!(&add.right, J::Binary(mul) if *mul.operator.element() == BinaryOperator::Multiplication));
    }

    #[test]
    fn test_trailing_comma_marker() {
        let cu = roundtrip("foo(a, b,\n);");
        let J::CompilationUnit(cu) = cu else { panic!("not a compilation unit") };
        let J::MethodInvocation(call) = cu.statements[0].element() else { panic!("not a call") };
        let last = &call.arguments.padded()[1];
        let trailing = last.markers().find_first::<TrailingComma>().expect("trailing comma");
        assert_eq!(trailing.suffix.whitespace(), "\n");
    }

    #[test]
    fn test_empty_arguments_hold_an_empty_element() {
        let cu = roundtrip("f( );");
        let J::CompilationUnit(cu) = cu else { panic!("not a compilation unit") };
        let J::MethodInvocation(call) = cu.statements[0].element() else { panic!("not a call") };
        assert_eq!(call.arguments.len(), 1);
        assert!(matches!(call.arguments.padded()[0].element(), J::Empty(_)));
    }

    #[test]
    fn test_parse_error_position() {
        let error = JavaParser::parse("x = 1;\ny = ;", "Bad.java").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(matches!(error, ReweaveError::Parse { line: 2, column: 5, .. }), "{error:?}");
    }

    #[test]
    fn test_python_sources_are_not_parsed() {
        let error = JavaParser::parse("x = 1\n", "script.py").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotImplemented);
        assert!(error.to_string().contains("script.py"));
    }

    #[test]
    fn test_lenient_parse_keeps_source() {
        let source = "class Foo { int x; }";
        let cu = JavaParser::parse_lenient(source, "Foo.java");
        assert_eq!(cu.print_trimmed_markers(), source);
        assert!(cu.markers().find_first::<ParseExceptionResult>().is_some());
    }
}
