//! Style records read by the formatting visitors
//!
//! Each record is a plain value. A source unit can carry styles in a
//! [`NamedStyles`] marker; [`Styles::for_markers`] merges those over the
//! [`IntelliJ`] defaults.

use std::sync::Arc;

use reweave_core::{Markers, NamedStyles, Style};
use reweave_java::J;

/// Indentation policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsAndIndentsStyle {
    pub use_tab_character: bool,
    pub tab_size: usize,
    pub indent_size: usize,
    pub continuation_indent: usize,
    pub keep_indents_on_empty_lines: bool,
    /// Align wrapped declaration parameters with the first parameter
    pub align_multiline_parameters: bool,
    /// Align wrapped call arguments with the first argument
    pub align_multiline_arguments: bool,
    /// Wrapped collection elements get the continuation indent instead of a normal indent
    pub use_continuation_indent_for_collections: bool,
}

impl Style for TabsAndIndentsStyle {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeforeParentheses {
    pub method_call: bool,
    pub method_declaration: bool,
    pub if_parentheses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AroundOperators {
    pub assignment: bool,
    pub equality: bool,
    pub relational: bool,
    pub additive: bool,
    pub multiplicative: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Within {
    pub brackets: bool,
    pub method_declaration_parentheses: bool,
    pub empty_method_declaration_parentheses: bool,
    pub method_call_parentheses: bool,
    pub empty_method_call_parentheses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherSpaces {
    pub before_comma: bool,
    pub after_comma: bool,
    pub before_colon: bool,
    pub before_left_brace: bool,
}

/// Single-line spacing policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacesStyle {
    pub before_parentheses: BeforeParentheses,
    pub around_operators: AroundOperators,
    pub within: Within,
    pub other: OtherSpaces,
}

impl Style for SpacesStyle {}

/// Blank line policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankLinesStyle {
    pub keep_maximum_in_code: usize,
    pub keep_maximum_before_end_of_block: usize,
}

impl Style for BlankLinesStyle {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralFormatStyle {
    pub use_crlf_new_lines: bool,
}

impl GeneralFormatStyle {
    pub fn new_line(&self) -> &'static str {
        if self.use_crlf_new_lines { "\r\n" } else { "\n" }
    }
}

impl Style for GeneralFormatStyle {}

/// The IntelliJ IDEA default code style
pub struct IntelliJ;

impl IntelliJ {
    pub const NAME: &'static str = "reweave.IntelliJ";

    pub fn tabs_and_indents() -> TabsAndIndentsStyle {
        TabsAndIndentsStyle {
            use_tab_character: false,
            tab_size: 4,
            indent_size: 4,
            continuation_indent: 8,
            keep_indents_on_empty_lines: false,
            align_multiline_parameters: true,
            align_multiline_arguments: true,
            use_continuation_indent_for_collections: false,
        }
    }

    pub fn spaces() -> SpacesStyle {
        SpacesStyle {
            before_parentheses: BeforeParentheses {
                method_call: false,
                method_declaration: false,
                if_parentheses: true,
            },
            around_operators: AroundOperators {
                assignment: true,
                equality: true,
                relational: true,
                additive: true,
                multiplicative: true,
            },
            within: Within {
                brackets: false,
                method_declaration_parentheses: false,
                empty_method_declaration_parentheses: false,
                method_call_parentheses: false,
                empty_method_call_parentheses: false,
            },
            other: OtherSpaces {
                before_comma: false,
                after_comma: true,
                before_colon: false,
                before_left_brace: true,
            },
        }
    }

    pub fn blank_lines() -> BlankLinesStyle {
        BlankLinesStyle {
            keep_maximum_in_code: 2,
            keep_maximum_before_end_of_block: 2,
        }
    }

    pub fn general() -> GeneralFormatStyle {
        GeneralFormatStyle {
            use_crlf_new_lines: false,
        }
    }

    /// All defaults as a marker-ready style set
    pub fn named_styles() -> NamedStyles {
        let mut named = NamedStyles::new(
            Self::NAME,
            "IntelliJ IDEA",
            vec![
                Arc::new(Self::tabs_and_indents()),
                Arc::new(Self::spaces()),
                Arc::new(Self::blank_lines()),
                Arc::new(Self::general()),
            ],
        );
        named.description = Some("IntelliJ IDEA default code style".to_string());
        named.tags = vec!["intellij".to_string()];
        named
    }
}

/// The full set of styles one formatting run reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styles {
    pub tabs_and_indents: TabsAndIndentsStyle,
    pub spaces: SpacesStyle,
    pub blank_lines: BlankLinesStyle,
    pub general: GeneralFormatStyle,
}

impl Styles {
    pub fn intellij() -> Self {
        Self {
            tabs_and_indents: IntelliJ::tabs_and_indents(),
            spaces: IntelliJ::spaces(),
            blank_lines: IntelliJ::blank_lines(),
            general: IntelliJ::general(),
        }
    }

    /// Styles from any `NamedStyles` markers, falling back to IntelliJ defaults per record
    pub fn for_markers(markers: &Markers) -> Self {
        let named = markers.find_all::<NamedStyles>();
        if named.is_empty() {
            return Self::intellij();
        }
        Self {
            tabs_and_indents: NamedStyles::merge(&named).unwrap_or_else(IntelliJ::tabs_and_indents),
            spaces: NamedStyles::merge(&named).unwrap_or_else(IntelliJ::spaces),
            blank_lines: NamedStyles::merge(&named).unwrap_or_else(IntelliJ::blank_lines),
            general: NamedStyles::merge(&named).unwrap_or_else(IntelliJ::general),
        }
    }

    /// Styles attached to a source unit; other trees get the defaults
    pub fn for_tree(tree: &J) -> Self {
        match tree {
            J::CompilationUnit(cu) => Self::for_markers(&cu.markers),
            _ => Self::intellij(),
        }
    }

    /// These styles as a marker
    pub fn into_named_styles(self, name: impl Into<String>) -> NamedStyles {
        NamedStyles::new(
            name,
            "Configured",
            vec![
                Arc::new(self.tabs_and_indents),
                Arc::new(self.spaces),
                Arc::new(self.blank_lines),
                Arc::new(self.general),
            ],
        )
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::intellij()
    }
}
