//! The composite formatting pass

use reweave_core::{Cursor, ExecutionContext, Result, TreeId, TreeVisitor, VisitorState};
use reweave_java::{J, JValue, JavaVisitor, java_tree_visitor};
use tracing::debug;

use crate::blank_lines::BlankLinesVisitor;
use crate::config::FormatterConfiguration;
use crate::normalize_format::NormalizeFormatVisitor;
use crate::spaces::SpacesVisitor;
use crate::style::Styles;
use crate::tabs_and_indents::TabsAndIndentsVisitor;
use crate::tabs_or_spaces::NormalizeTabsOrSpacesVisitor;
use crate::trailing_whitespace::RemoveTrailingWhitespaceVisitor;

/// Runs every whitespace pass over a tree in a fixed order.
///
/// Styles come from the enclosing source unit's `NamedStyles` markers (or the
/// IntelliJ defaults), with an optional [`FormatterConfiguration`] layered on
/// top. Each pass walks a fork of the cursor this visitor was called with, so
/// a subtree formats against the indentation of its real ancestors.
///
/// ```rust,ignore
/// let mut visitor = AutoFormatVisitor::new(None);
/// let formatted = visitor.visit(Some(&J::CompilationUnit(cu)), &mut ctx)?;
/// ```
pub struct AutoFormatVisitor {
    state: VisitorState<J>,
    stop_after: Option<TreeId>,
    configuration: Option<FormatterConfiguration>,
}

impl AutoFormatVisitor {
    pub fn new(stop_after: Option<TreeId>) -> Self {
        Self {
            state: VisitorState::new(),
            stop_after,
            configuration: None,
        }
    }

    /// Override individual style settings
    pub fn with_configuration(mut self, configuration: FormatterConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// The styles in effect for `tree` at the current cursor
    pub fn styles_for(&self, tree: &J) -> Styles {
        let styles = match tree {
            J::CompilationUnit(_) => Styles::for_tree(tree),
            _ => self
                .cursor()
                .first_enclosing(|t| matches!(t, J::CompilationUnit(_)))
                .map_or_else(Styles::intellij, Styles::for_tree),
        };
        match &self.configuration {
            Some(configuration) => configuration.apply_to(&styles),
            None => styles,
        }
    }
}

fn run_pass(
    pass: &'static str,
    visitor: &mut dyn TreeVisitor<J>,
    tree: J,
    parent: &Cursor<JValue>,
    ctx: &mut dyn ExecutionContext,
) -> Result<J> {
    debug!(pass, tree = tree.kind(), "running format pass");
    let visited = visitor.visit_with_parent(Some(&tree), ctx, parent.fork())?;
    Ok(visited.unwrap_or(tree))
}

impl TreeVisitor<J> for AutoFormatVisitor {
    java_tree_visitor!(state);

    fn visit(&mut self, tree: Option<&J>, ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let Some(tree) = tree else {
            return Ok(None);
        };
        let styles = self.styles_for(tree);
        let parent = self.cursor().clone();
        let stop_after = self.stop_after;

        let mut t = tree.clone();
        t = run_pass("normalize format", &mut NormalizeFormatVisitor::new(stop_after), t, &parent, ctx)?;
        t = run_pass(
            "blank lines",
            &mut BlankLinesVisitor::new(styles.blank_lines.clone(), stop_after),
            t,
            &parent,
            ctx,
        )?;
        t = run_pass("spaces", &mut SpacesVisitor::new(styles.spaces.clone(), stop_after), t, &parent, ctx)?;
        t = run_pass(
            "tabs and indents",
            &mut TabsAndIndentsVisitor::new(styles.tabs_and_indents.clone(), stop_after),
            t,
            &parent,
            ctx,
        )?;
        t = run_pass(
            "normalize tabs or spaces",
            &mut NormalizeTabsOrSpacesVisitor::new(styles.tabs_and_indents.clone(), stop_after),
            t,
            &parent,
            ctx,
        )?;
        if !styles.tabs_and_indents.keep_indents_on_empty_lines {
            t = run_pass(
                "remove trailing whitespace",
                &mut RemoveTrailingWhitespaceVisitor::new(stop_after),
                t,
                &parent,
                ctx,
            )?;
        }
        Ok(Some(t))
    }
}

impl JavaVisitor for AutoFormatVisitor {}
