//! Printing contract shared by every language
//!
//! A printer walks a tree and appends prefixes, syntax and padding spaces to a
//! [`PrintOutputCapture`] in source order. Before a node's own syntax it calls
//! [`PrintOutputCapture::before_syntax`], which lets a [`MarkerPrinter`] render
//! markers and records the output offset of a probed node.

use crate::identity::TreeId;
use crate::markers::{Marker, Markers, SearchResult};

/// Renders markers into printed output
pub trait MarkerPrinter: Send + Sync {
    fn before_prefix(&self, _marker: &dyn Marker) -> String {
        String::new()
    }

    fn before_syntax(&self, _marker: &dyn Marker) -> String {
        String::new()
    }

    fn after_syntax(&self, _marker: &dyn Marker) -> String {
        String::new()
    }
}

/// Renders search results as `/*~~>*/` or `/*~~(description)~~>*/`
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMarkerPrinter;

impl MarkerPrinter for DefaultMarkerPrinter {
    fn before_syntax(&self, marker: &dyn Marker) -> String {
        match marker.as_any().downcast_ref::<SearchResult>() {
            Some(SearchResult {
                description: Some(description),
                ..
            }) => format!("/*~~({description})~~>*/"),
            Some(_) => "/*~~>*/".to_string(),
            None => String::new(),
        }
    }
}

/// Prints nothing for markers
#[derive(Debug, Default, Clone, Copy)]
pub struct SanitizedMarkerPrinter;

impl MarkerPrinter for SanitizedMarkerPrinter {}

/// Collects printed text
pub struct PrintOutputCapture {
    out: String,
    marker_printer: Box<dyn MarkerPrinter>,
    probe: Option<TreeId>,
    probe_offset: Option<usize>,
}

impl PrintOutputCapture {
    pub fn new() -> Self {
        Self::with_marker_printer(Box::new(DefaultMarkerPrinter))
    }

    pub fn with_marker_printer(marker_printer: Box<dyn MarkerPrinter>) -> Self {
        Self {
            out: String::new(),
            marker_printer,
            probe: None,
            probe_offset: None,
        }
    }

    /// Record the offset at which the syntax of node `id` starts
    pub fn probing(mut self, id: TreeId) -> Self {
        self.probe = Some(id);
        self
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    pub fn before_prefix(&mut self, markers: &Markers) {
        for marker in markers.markers() {
            let rendered = self.marker_printer.before_prefix(&**marker);
            self.out.push_str(&rendered);
        }
    }

    /// Called after a node's prefix and before its first token
    pub fn before_syntax(&mut self, id: TreeId, markers: &Markers) {
        if self.probe == Some(id) && self.probe_offset.is_none() {
            self.probe_offset = Some(self.out.len());
        }
        for marker in markers.markers() {
            let rendered = self.marker_printer.before_syntax(&**marker);
            self.out.push_str(&rendered);
        }
    }

    pub fn after_syntax(&mut self, markers: &Markers) {
        for marker in markers.markers() {
            let rendered = self.marker_printer.after_syntax(&**marker);
            self.out.push_str(&rendered);
        }
    }

    pub fn out(&self) -> &str {
        &self.out
    }

    /// Byte offset where the probed node's syntax started
    pub fn probe_offset(&self) -> Option<usize> {
        self.probe_offset
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for PrintOutputCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that prints back to source text
pub trait Print {
    fn print_to(&self, capture: &mut PrintOutputCapture);

    /// Print with markers rendered by the default marker printer
    fn print_all(&self) -> String {
        let mut capture = PrintOutputCapture::new();
        self.print_to(&mut capture);
        capture.into_string()
    }

    /// Print without any marker output
    fn print_trimmed_markers(&self) -> String {
        let mut capture = PrintOutputCapture::with_marker_printer(Box::new(SanitizedMarkerPrinter));
        self.print_to(&mut capture);
        capture.into_string()
    }

    /// True when printing (without markers) reproduces `original` exactly
    fn print_equals_input(&self, original: &str) -> bool {
        self.print_trimmed_markers() == original
    }
}

/// Column of the byte at `offset` within its line
pub fn column_of(text: &str, offset: usize) -> usize {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..offset].chars().count()
}
