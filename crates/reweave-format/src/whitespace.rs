//! Helpers for passes that rewrite every whitespace run the same way

use std::sync::Arc;

use reweave_core::markers::downcast;
use reweave_core::{Marker, RefEq, Space};
use reweave_java::TrailingComma;

/// Apply `f` to the leading whitespace and to every comment suffix of `space`
pub fn map_whitespace(space: &Space, f: impl Fn(&str) -> String) -> Space {
    let whitespace = f(space.whitespace());
    if space.comments().is_empty() {
        return space.with_whitespace(whitespace);
    }
    let comments = space
        .comments()
        .iter()
        .map(|c| {
            let suffix = f(c.suffix());
            if suffix == c.suffix() { c.clone() } else { c.with_suffix(suffix) }
        })
        .collect();
    space.with_whitespace(whitespace).with_comments(comments)
}

/// Rewrite the suffix of a trailing comma marker; other markers pass through
pub fn map_trailing_comma(marker: &Arc<dyn Marker>, f: impl FnOnce(&Space) -> Space) -> Arc<dyn Marker> {
    match downcast::<TrailingComma>(marker) {
        Some(comma) => {
            let suffix = f(&comma.suffix);
            if suffix.ref_eq(&comma.suffix) {
                Arc::clone(marker)
            } else {
                Arc::new(comma.with_suffix(suffix))
            }
        }
        None => Arc::clone(marker),
    }
}
