//! Space: the unit of formatting
//!
//! A [`Space`] is the whitespace before a syntax element plus any comments that
//! sit in that gap. Leading whitespace lives in [`Space::whitespace`]; the
//! whitespace following each comment lives in that comment's `suffix`. Printing
//! a space is therefore `whitespace`, then `comment, suffix` for each comment.
//!
//! # Example
//!
//! ```rust,ignore
//! use reweave_core::space::Space;
//!
//! let space = Space::format("\n    // note\n    ");
//! assert_eq!(space.whitespace(), "\n    ");
//! assert_eq!(space.indent(), "    ");
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::identity::RefEq;
use crate::markers::Markers;
use crate::tree::Tree;

/// The comment delimiters a language uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSyntax {
    /// `// line` and `/* block */`
    #[default]
    Slash,
    /// `# line`
    Hash,
}

/// A comment and the whitespace that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    multiline: bool,
    text: String,
    suffix: String,
    markers: Markers,
}

impl Comment {
    pub fn new(multiline: bool, text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            multiline,
            text: text.into(),
            suffix: suffix.into(),
            markers: Markers::empty(),
        }
    }

    /// Block comments may span lines; line comments end at the first newline
    pub fn multiline(&self) -> bool {
        self.multiline
    }

    /// The comment body without delimiters
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..self.clone()
        }
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }

    /// Render with the given delimiters, excluding the suffix
    pub fn render(&self, syntax: CommentSyntax) -> String {
        match (self.multiline, syntax) {
            (true, _) => format!("/*{}*/", self.text),
            (false, CommentSyntax::Slash) => format!("//{}", self.text),
            (false, CommentSyntax::Hash) => format!("#{}", self.text),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct SpaceInner {
    whitespace: String,
    comments: Vec<Comment>,
}

static EMPTY: LazyLock<Space> = LazyLock::new(|| {
    Space(Arc::new(SpaceInner {
        whitespace: String::new(),
        comments: Vec::new(),
    }))
});

static SINGLE_SPACE: LazyLock<Space> = LazyLock::new(|| {
    Space(Arc::new(SpaceInner {
        whitespace: " ".to_string(),
        comments: Vec::new(),
    }))
});

/// Whitespace and comments preceding (or trailing) a syntax element
#[derive(Clone, PartialEq, Eq)]
pub struct Space(Arc<SpaceInner>);

impl Space {
    /// The canonical empty space
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// The canonical single blank
    pub fn single_space() -> Self {
        SINGLE_SPACE.clone()
    }

    pub fn build(whitespace: impl Into<String>, comments: Vec<Comment>) -> Self {
        let whitespace = whitespace.into();
        if comments.is_empty() {
            if whitespace.is_empty() {
                return Self::empty();
            }
            if whitespace == " " {
                return Self::single_space();
            }
        }
        Space(Arc::new(SpaceInner {
            whitespace,
            comments,
        }))
    }

    /// Parse a run of whitespace and `//`, `/* */` comments
    pub fn format(text: &str) -> Self {
        Self::format_with(text, CommentSyntax::Slash)
    }

    /// Parse a run of whitespace and comments in the given syntax.
    ///
    /// Text that is neither whitespace nor a comment is kept verbatim in the
    /// current whitespace buffer so nothing is lost.
    pub fn format_with(text: &str, syntax: CommentSyntax) -> Self {
        if text.is_empty() {
            return Self::empty();
        }

        let mut prefix = String::new();
        let mut comments: Vec<Comment> = Vec::new();
        let mut buffer = String::new();
        let mut rest = text;

        let flush = |buffer: &mut String, prefix: &mut String, comments: &mut Vec<Comment>| {
            let ws = std::mem::take(buffer);
            match comments.last_mut() {
                Some(last) => last.suffix.push_str(&ws),
                None => prefix.push_str(&ws),
            }
        };

        while let Some(c) = rest.chars().next() {
            let line_comment = match syntax {
                CommentSyntax::Slash => rest.strip_prefix("//"),
                CommentSyntax::Hash => rest.strip_prefix('#'),
            };
            if let Some(body) = line_comment {
                flush(&mut buffer, &mut prefix, &mut comments);
                let end = body.find(['\n', '\r']).unwrap_or(body.len());
                comments.push(Comment::new(false, &body[..end], ""));
                rest = &body[end..];
                continue;
            }
            if syntax == CommentSyntax::Slash {
                if let Some(body) = rest.strip_prefix("/*") {
                    flush(&mut buffer, &mut prefix, &mut comments);
                    match body.find("*/") {
                        Some(end) => {
                            comments.push(Comment::new(true, &body[..end], ""));
                            rest = &body[end + 2..];
                        }
                        None => {
                            comments.push(Comment::new(true, body, ""));
                            rest = "";
                        }
                    }
                    continue;
                }
            }
            buffer.push(c);
            rest = &rest[c.len_utf8()..];
        }
        flush(&mut buffer, &mut prefix, &mut comments);

        Self::build(prefix, comments)
    }

    pub fn whitespace(&self) -> &str {
        &self.0.whitespace
    }

    pub fn comments(&self) -> &[Comment] {
        &self.0.comments
    }

    pub fn is_empty(&self) -> bool {
        self.0.whitespace.is_empty() && self.0.comments.is_empty()
    }

    /// The whitespace after the last comment, or the leading whitespace when there are none
    pub fn last_whitespace(&self) -> &str {
        match self.0.comments.last() {
            Some(last) => &last.suffix,
            None => &self.0.whitespace,
        }
    }

    /// Text after the final newline of [`Space::last_whitespace`]
    pub fn indent(&self) -> &str {
        let last = self.last_whitespace();
        match last.rfind('\n') {
            Some(index) => &last[index + 1..],
            None => last,
        }
    }

    pub fn contains_newline(&self) -> bool {
        self.0.whitespace.contains('\n') || self.0.comments.iter().any(|c| c.suffix.contains('\n'))
    }

    pub fn with_whitespace(&self, whitespace: impl Into<String>) -> Self {
        let whitespace = whitespace.into();
        if whitespace == self.0.whitespace {
            return self.clone();
        }
        Self::build(whitespace, self.0.comments.clone())
    }

    pub fn with_comments(&self, comments: Vec<Comment>) -> Self {
        if comments == self.0.comments {
            return self.clone();
        }
        Self::build(self.0.whitespace.clone(), comments)
    }

    /// Replace the whitespace after the last comment (or the leading whitespace)
    pub fn with_last_whitespace(&self, whitespace: impl Into<String>) -> Self {
        let whitespace = whitespace.into();
        match self.0.comments.split_last() {
            Some((last, init)) => {
                if last.suffix == whitespace {
                    return self.clone();
                }
                let mut comments = init.to_vec();
                comments.push(last.with_suffix(whitespace));
                self.with_comments(comments)
            }
            None => self.with_whitespace(whitespace),
        }
    }

    /// Append whitespace after the last comment, or to the leading whitespace
    pub fn append_whitespace(&self, whitespace: &str) -> Self {
        if whitespace.is_empty() {
            return self.clone();
        }
        let last = format!("{}{}", self.last_whitespace(), whitespace);
        self.with_last_whitespace(last)
    }

    /// Append a comment with an empty suffix
    pub fn append_comment(&self, text: impl Into<String>, multiline: bool) -> Self {
        let mut comments = self.0.comments.clone();
        comments.push(Comment::new(multiline, text, ""));
        self.with_comments(comments)
    }

    /// Insert `indent` after every newline in the whitespace and comment suffixes
    pub fn reindent(&self, indent: &str) -> Self {
        if indent.is_empty() || !self.contains_newline() {
            return self.clone();
        }
        let shift = |s: &str| s.replace('\n', &format!("\n{indent}"));
        let comments = self
            .0
            .comments
            .iter()
            .map(|c| c.with_suffix(shift(&c.suffix)))
            .collect();
        Self::build(shift(&self.0.whitespace), comments)
    }

    /// Remove `indent` from after every newline where it is present
    pub fn deindent(&self, indent: &str) -> Self {
        if indent.is_empty() || !self.contains_newline() {
            return self.clone();
        }
        let strip = |s: &str| s.replace(&format!("\n{indent}"), "\n");
        let comments = self
            .0
            .comments
            .iter()
            .map(|c| c.with_suffix(strip(&c.suffix)))
            .collect();
        self.with_whitespace(strip(&self.0.whitespace))
            .with_comments(comments)
    }

    /// Drop the indentation of the final line, keeping everything up to and including its newline
    pub fn strip_indent(&self) -> Self {
        let last = self.last_whitespace();
        match last.rfind('\n') {
            Some(index) => self.with_last_whitespace(&last[..=index]),
            None => self.with_last_whitespace(""),
        }
    }

    /// The prefix of the first tree in a list, or the empty space
    pub fn first_prefix<T: Tree>(trees: &[T]) -> Space {
        trees
            .first()
            .map(|t| t.prefix().clone())
            .unwrap_or_else(Space::empty)
    }

    /// Replace the prefix of the first tree in a list
    pub fn format_first_prefix<T: Tree>(trees: Vec<T>, prefix: Space) -> Vec<T> {
        let mut trees = trees;
        if let Some(first) = trees.first_mut() {
            if !first.prefix().ref_eq(&prefix) {
                *first = first.with_prefix(prefix);
            }
        }
        trees
    }

    /// Render in the given comment syntax
    pub fn render(&self, syntax: CommentSyntax) -> String {
        let mut out = self.0.whitespace.clone();
        for comment in &self.0.comments {
            out.push_str(&comment.render(syntax));
            out.push_str(&comment.suffix);
        }
        out
    }
}

impl Default for Space {
    fn default() -> Self {
        Self::empty()
    }
}

impl RefEq for Space {
    fn ref_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible = |s: &str| s.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t");
        write!(f, "Space(\"{}\"", visible(&self.0.whitespace))?;
        for c in &self.0.comments {
            write!(f, ", {:?} + \"{}\"", c.render(CommentSyntax::Slash), visible(&c.suffix))?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_splits_comments_and_suffixes() {
        let space = Space::format("\n  // one\n  /* two\n */ \n    ");
        assert_eq!(space.whitespace(), "\n  ");
        assert_eq!(space.comments().len(), 2);
        assert!(!space.comments()[0].multiline());
        assert_eq!(space.comments()[0].text(), " one");
        assert_eq!(space.comments()[0].suffix(), "\n  ");
        assert!(space.comments()[1].multiline());
        assert_eq!(space.comments()[1].text(), " two\n ");
        assert_eq!(space.last_whitespace(), " \n    ");
        assert_eq!(space.indent(), "    ");
    }

    #[test]
    fn test_format_round_trips_through_render() {
        for text in ["", " ", "\n\n  ", "  // a\n", "/**/", "\t/* x */ // y\n\t"] {
            assert_eq!(Space::format(text).render(CommentSyntax::Slash), text);
        }
        let hashed = "  # note\n    ";
        assert_eq!(
            Space::format_with(hashed, CommentSyntax::Hash).render(CommentSyntax::Hash),
            hashed
        );
    }

    #[test]
    fn test_canonical_singletons() {
        assert!(Space::format("").ref_eq(&Space::empty()));
        assert!(Space::build(" ", Vec::new()).ref_eq(&Space::single_space()));
        let s = Space::format("\n ");
        assert!(s.with_whitespace("\n ").ref_eq(&s));
        assert!(s.with_whitespace("").ref_eq(&Space::empty()));
    }

    #[test]
    fn test_append_and_strip() {
        let s = Space::format("\n// c\n  ");
        assert_eq!(s.append_whitespace("  ").last_whitespace(), "\n    ");
        assert_eq!(s.strip_indent().last_whitespace(), "\n");
        assert_eq!(Space::empty().append_comment(" x", false).comments().len(), 1);
    }

    #[test]
    fn test_reindent_and_deindent() {
        let s = Space::format("\n/* a */\n");
        let shifted = s.reindent("  ");
        assert_eq!(shifted.render(CommentSyntax::Slash), "\n  /* a */\n  ");
        assert_eq!(shifted.deindent("  "), s);
    }
}
