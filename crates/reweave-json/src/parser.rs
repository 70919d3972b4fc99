//! Lossless parser for JSON with comments
//!
//! Accepts `//` and `/* */` comments, unquoted member keys and trailing
//! commas. A trailing comma is kept as a final [`Empty`] element whose prefix
//! holds the space before the closing delimiter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reweave_core::{FileAttributes, Markers, ReweaveError, Result, ResultExt, RightPadded, Space, random_id};

use crate::tree::*;

pub struct JsonParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> JsonParser<'a> {
    pub fn parse(source: &'a str, path: impl Into<PathBuf>) -> Result<Json> {
        let mut parser = JsonParser { source, pos: 0 };
        let prefix = parser.whitespace()?;
        let value = parser.value(prefix)?;
        let eof = parser.whitespace()?;
        if parser.pos < source.len() {
            return Err(parser.error(format!("unexpected {} after document", parser.found())));
        }
        let source_path: PathBuf = path.into();
        tracing::debug!(path = %source_path.display(), "parsed");
        Ok(Json::Document(Arc::new(Document {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            source_path,
            file_attributes: None,
            charset: None,
            value,
            eof,
        })))
    }

    pub fn parse_path(path: &Path) -> Result<Json> {
        let source = std::fs::read_to_string(path).map_err(|e| ReweaveError::io_error(path, e))?;
        let attributes = FileAttributes::from_path(path).log_and_continue();
        match JsonParser::parse(&source, path)? {
            Json::Document(document) => Ok(Json::Document(Arc::new(Document {
                file_attributes: attributes,
                ..(*document).clone()
            }))),
            other => Ok(other),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
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

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn value(&mut self, prefix: Space) -> Result<Json> {
        match self.rest().chars().next() {
            Some('{') => self.object(prefix),
            Some('[') => self.array(prefix),
            Some('"') => Ok(Json::Literal(self.string()?.with_prefix(prefix))),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(prefix),
            Some(_) => {
                for (keyword, value) in [
                    ("true", LiteralValue::Bool(true)),
                    ("false", LiteralValue::Bool(false)),
                    ("null", LiteralValue::Null),
                ] {
                    if self.rest().starts_with(keyword) {
                        self.pos += keyword.len();
                        return Ok(Json::Literal(Literal::build(keyword, value).with_prefix(prefix)));
                    }
                }
                Err(self.error(format!("expected value, found {}", self.found())))
            }
            None => Err(self.error("expected value, found end of input")),
        }
    }

    /// Elements between `open` and `close`, separated by commas
    fn elements(
        &mut self,
        open: char,
        close: char,
        mut element: impl FnMut(&mut Self, Space) -> Result<Json>,
    ) -> Result<Vec<RightPadded<Json>>> {
        self.eat(open);
        let mut elements = Vec::new();
        loop {
            let prefix = self.whitespace()?;
            if self.eat(close) {
                elements.push(RightPadded::build(Json::Empty(Empty::build().with_prefix(prefix))));
                return Ok(elements);
            }
            let value = element(self, prefix)?;
            let after = self.whitespace()?;
            elements.push(RightPadded::new(value, after, Markers::empty()));
            if self.eat(close) {
                return Ok(elements);
            }
            if !self.eat(',') {
                return Err(self.error(format!("expected ',' or '{close}', found {}", self.found())));
            }
        }
    }

    fn object(&mut self, prefix: Space) -> Result<Json> {
        let members = self.elements('{', '}', Self::member)?;
        Ok(Json::Object(Object::build(members).with_prefix(prefix)))
    }

    fn member(&mut self, prefix: Space) -> Result<Json> {
        let key = match self.rest().chars().next() {
            Some('"') => Json::Literal(self.string()?),
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                let rest = self.rest();
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                    .unwrap_or(rest.len());
                self.pos += len;
                Json::Identifier(Identifier::build(&rest[..len]))
            }
            _ => return Err(self.error(format!("expected member key, found {}", self.found()))),
        };
        let before_colon = self.whitespace()?;
        if !self.eat(':') {
            return Err(self.error(format!("expected ':', found {}", self.found())));
        }
        let value_prefix = self.whitespace()?;
        let value = self.value(value_prefix)?;
        Ok(Json::Member(Arc::new(Member {
            id: random_id(),
            prefix,
            markers: Markers::empty(),
            key: RightPadded::new(key, before_colon, Markers::empty()),
            value,
        })))
    }

    fn array(&mut self, prefix: Space) -> Result<Json> {
        let values = self.elements('[', ']', Self::value)?;
        Ok(Json::Array(Array::build(values).with_prefix(prefix)))
    }

    fn string(&mut self) -> Result<Arc<Literal>> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.rest().chars().next() else {
                return Err(self.error("unterminated string"));
            };
            self.pos += c.len_utf8();
            match c {
                '"' => break,
                '\\' => {
                    let Some(escaped) = self.rest().chars().next() else {
                        return Err(self.error("unterminated string"));
                    };
                    self.pos += escaped.len_utf8();
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'u' => {
                            let hex = self.rest().get(..4).ok_or_else(|| self.error("truncated unicode escape"))?;
                            let decoded = u32::from_str_radix(hex, 16)
                                .ok()
                                .and_then(char::from_u32)
                                .unwrap_or(char::REPLACEMENT_CHARACTER);
                            value.push(decoded);
                            self.pos += 4;
                        }
                        other => value.push(other),
                    }
                }
                '\n' => return Err(self.error("newline in string")),
                c => value.push(c),
            }
        }
        Ok(Literal::build(&self.source[start..self.pos], LiteralValue::String(value)))
    }

    fn number(&mut self, prefix: Space) -> Result<Json> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
            .unwrap_or(rest.len());
        let text = &rest[..len];
        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("invalid number '{text}'")))?;
        self.pos += len;
        Ok(Json::Literal(Literal::build(text, LiteralValue::Number(value)).with_prefix(prefix)))
    }
}
