//! Column arithmetic on whitespace
//!
//! Widths count a tab as `tab_size` columns; counting restarts after every
//! line break.

use reweave_core::{Comment, Space};

use crate::style::TabsAndIndentsStyle;

/// Width of the indentation after the last line break of `whitespace`
pub fn indent_width(whitespace: &str, tab_size: usize) -> usize {
    let mut width = 0;
    for c in whitespace.chars() {
        match c {
            '\n' | '\r' => width = 0,
            '\t' => width += tab_size,
            _ => width += 1,
        }
    }
    width
}

/// Indentation characters spanning `column` columns
pub fn indent_string(column: usize, style: &TabsAndIndentsStyle) -> String {
    if style.use_tab_character && style.tab_size > 0 {
        let mut indent = "\t".repeat(column / style.tab_size);
        indent.push_str(&" ".repeat(column % style.tab_size));
        indent
    } else {
        " ".repeat(column)
    }
}

/// Replace the indentation of the last line of `whitespace` with `column` columns.
///
/// Whitespace without a line break is returned as is.
pub fn shift_whitespace(whitespace: &str, column: usize, style: &TabsAndIndentsStyle) -> String {
    let Some(last_break) = whitespace.rfind('\n') else {
        return whitespace.to_string();
    };
    let indent = indent_string(column, style);
    let head = &whitespace[..=last_break];
    let head = if style.keep_indents_on_empty_lines {
        indent_empty_lines(head, &indent)
    } else {
        head.to_string()
    };
    format!("{head}{indent}")
}

fn indent_empty_lines(head: &str, indent: &str) -> String {
    let lines: Vec<&str> = head.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::with_capacity(head.len());
    for (i, line) in lines.iter().enumerate() {
        match i {
            0 => out.push_str(line),
            i if i == last => out.push('\n'),
            _ => {
                out.push('\n');
                out.push_str(indent);
            }
        }
    }
    out
}

/// Reindent `space` so whatever follows it starts at `column`.
///
/// A space without a line break is left alone. Comments that start a line are
/// moved to `column` too, and the continuation lines of a block comment shift
/// by the same amount, except single-line comments sitting at column zero.
pub fn indent_to(space: &Space, column: usize, style: &TabsAndIndentsStyle) -> Space {
    if !space.contains_newline() {
        return space.clone();
    }
    if space.comments().is_empty() {
        return space.with_whitespace(shift_whitespace(space.whitespace(), column, style));
    }

    let mut leading = space.whitespace().to_string();
    let mut whitespace = None;
    let mut comments: Vec<Comment> = Vec::with_capacity(space.comments().len());

    for comment in space.comments() {
        let starts_line = leading.contains('\n');
        let at_column_zero = starts_line && indent_width(&leading, style.tab_size) == 0;
        let shifted_leading = if !starts_line || (at_column_zero && !comment.multiline()) {
            leading.clone()
        } else {
            shift_whitespace(&leading, column, style)
        };

        let comment = if comment.multiline() && starts_line {
            let from = indent_width(&leading, style.tab_size);
            comment.with_text(shift_comment_body(comment.text(), from, column))
        } else {
            comment.clone()
        };

        match comments.last_mut() {
            Some(previous) => *previous = previous.with_suffix(shifted_leading),
            None => whitespace = Some(shifted_leading),
        }
        leading = comment.suffix().to_string();
        comments.push(comment);
    }

    let last = shift_whitespace(&leading, column, style);
    if let Some(previous) = comments.last_mut() {
        *previous = previous.with_suffix(last);
    }

    Space::build(whitespace.unwrap_or_default(), comments)
}

/// Move every continuation line of a block comment from column `from` to `to`
fn shift_comment_body(text: &str, from: usize, to: usize) -> String {
    if from == to || !text.contains('\n') {
        return text.to_string();
    }
    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if to > from {
            if !line.trim().is_empty() {
                out.push_str(&" ".repeat(to - from));
            }
            out.push_str(line);
        } else {
            let removable = line
                .chars()
                .take(from - to)
                .take_while(|c| *c == ' ' || *c == '\t')
                .count();
            out.push_str(&line[removable..]);
        }
    }
    out
}

/// Rewrite the indentation of every line in `whitespace` with the style's indent character
pub fn retab(whitespace: &str, style: &TabsAndIndentsStyle) -> String {
    if !whitespace.contains('\n') {
        return whitespace.to_string();
    }
    let mut out = String::with_capacity(whitespace.len());
    for (i, line) in whitespace.split('\n').enumerate() {
        if i == 0 {
            out.push_str(line);
            continue;
        }
        out.push('\n');
        let (indent, rest) = split_indent(line);
        out.push_str(&indent_string(indent_width(indent, style.tab_size), style));
        out.push_str(rest);
    }
    out
}

fn split_indent(line: &str) -> (&str, &str) {
    let end = line
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map_or(line.len(), |(i, _)| i);
    line.split_at(end)
}
