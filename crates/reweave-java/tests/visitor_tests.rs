//! Double dispatch, identity preservation and cursor context over J trees

use std::sync::Arc;

use reweave_core::{
    CursorValue, ErrorKind, ExecutionContext, InMemoryExecutionContext, Markers, Print, RefEq, Result,
    ReweaveError, RightPadded, SourceFile, Space, TreeVisitor, VisitorState,
};
use reweave_java::{
    Block, CompilationUnit, Dialect, Identifier, J, JValue, JavaParser, JavaVisitor, Return, SpaceLocation,
    java_tree_visitor,
};

fn parse(source: &str) -> J {
    JavaParser::parse(source, "Test.java").expect("parse")
}

#[derive(Default)]
struct Noop {
    state: VisitorState<J>,
}

impl TreeVisitor<J> for Noop {
    java_tree_visitor!(state);
}

impl JavaVisitor for Noop {}

/// Renames identifiers `from` to `to`
struct Rename {
    state: VisitorState<J>,
    from: &'static str,
    to: &'static str,
    python_only: bool,
}

impl Rename {
    fn new(from: &'static str, to: &'static str) -> Self {
        Self {
            state: VisitorState::new(),
            from,
            to,
            python_only: false,
        }
    }
}

impl TreeVisitor<J> for Rename {
    java_tree_visitor!(state);

    fn is_acceptable_source(&self, source: &dyn SourceFile, _ctx: &dyn ExecutionContext) -> bool {
        !self.python_only || source.language() == "python"
    }
}

impl JavaVisitor for Rename {
    fn visit_identifier(&mut self, ident: &Arc<Identifier>, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        if ident.simple_name == self.from {
            Ok(Some(J::Identifier(ident.with_simple_name(self.to.to_string()))))
        } else {
            Ok(Some(J::Identifier(Arc::clone(ident))))
        }
    }
}

#[derive(Default)]
struct DropReturns {
    state: VisitorState<J>,
}

impl TreeVisitor<J> for DropReturns {
    java_tree_visitor!(state);
}

impl JavaVisitor for DropReturns {
    fn visit_return(&mut self, _node: &Arc<Return>, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        Ok(None)
    }
}

#[test]
fn test_noop_visitor_returns_same_tree() {
    let cu = parse("int f(int a) {\n    if (a > 0) {\n        return g(a, [1, 2,]).h;\n    }\n    return 0;\n}\n");
    let mut ctx = InMemoryExecutionContext::new();
    let result = Noop::default().visit(Some(&cu), &mut ctx).unwrap().unwrap();
    assert!(result.ref_eq(&cu));
}

#[test]
fn test_rename_keeps_formatting() {
    let source = "x = foo( x ,\n    y); // note\nbar.x;\n";
    let cu = parse(source);
    let mut ctx = InMemoryExecutionContext::new();

    let renamed = Rename::new("x", "renamed").visit(Some(&cu), &mut ctx).unwrap().unwrap();

    assert!(!renamed.ref_eq(&cu));
    assert_eq!(renamed.id(), cu.id());
    assert_eq!(
        renamed.print_trimmed_markers(),
        "renamed = foo( renamed ,\n    y); // note\nbar.renamed;\n"
    );
}

#[test]
fn test_deleting_statements_keeps_siblings() {
    let cu = parse("int f() {\n    a = 1;\n    return a;\n}\n");
    let mut ctx = InMemoryExecutionContext::new();

    let result = DropReturns::default().visit(Some(&cu), &mut ctx).unwrap().unwrap();

    assert_eq!(result.print_trimmed_markers(), "int f() {\n    a = 1;\n}\n");
}

/// Replaces the first statement of every block with `c` appended at the end
#[derive(Default)]
struct RotateFirstStatement {
    state: VisitorState<J>,
}

impl TreeVisitor<J> for RotateFirstStatement {
    java_tree_visitor!(state);
}

impl JavaVisitor for RotateFirstStatement {
    fn visit_block(&mut self, block: &Arc<Block>, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let mut statements = block.statements();
        statements.remove(0);
        statements.push(J::identifier("c").with_prefix(Space::format("\n    ")));
        Ok(Some(J::Block(block.with_statements(statements)?)))
    }
}

#[test]
fn test_block_statement_edits_reconcile_padding() {
    let cu = parse("int f() {\n    a = 1 ;\n    b = 2  ;\n}\n");
    let mut ctx = InMemoryExecutionContext::new();

    let result = RotateFirstStatement::default().visit(Some(&cu), &mut ctx).unwrap().unwrap();
    assert_eq!(result.print_trimmed_markers(), "int f() {\n    b = 2  ;\n    c;\n}\n");

    let J::CompilationUnit(unit) = &result else { unreachable!() };
    let J::MethodDeclaration(md) = unit.statements[0].element() else { unreachable!() };
    let Some(J::Block(block)) = &md.body else { unreachable!() };
    assert_eq!(block.statements[0].after().whitespace(), "  ");
    assert!(block.statements[1].after().ref_eq(&Space::empty()));
    assert!(block.statements[1].markers().ref_eq(&Markers::empty()));
}

#[test]
fn test_unchanged_statement_list_keeps_block() {
    let cu = parse("{\n    a();\n}\n");
    let J::CompilationUnit(unit) = &cu else { unreachable!() };
    let J::Block(block) = unit.statements[0].element() else { unreachable!() };
    assert!(Arc::ptr_eq(&block.with_statements(block.statements()).unwrap(), block));
}

struct FailOnReturn {
    state: VisitorState<J>,
}

impl TreeVisitor<J> for FailOnReturn {
    java_tree_visitor!(state);
}

impl JavaVisitor for FailOnReturn {
    fn visit_return(&mut self, _node: &Arc<Return>, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        Err(ReweaveError::visitor_error("returns are not allowed here"))
    }
}

#[test]
fn test_failure_inside_block_reports_path() {
    let block = J::Block(Block::build(vec![RightPadded::build(J::Return(Return::build(Some(J::literal("1")))))]));
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = FailOnReturn {
        state: VisitorState::new(),
    };

    let error = visitor.visit(Some(&block), &mut ctx).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RecipeRun);
    let path = error.cursor_path().unwrap();
    assert_eq!(path.segments(), ["Return", "RightPadded", "Block", "root"]);
    assert_eq!(path.to_string(), "root > Block > RightPadded > Return");
    assert!(error.to_string().contains("returns are not allowed here"));
    assert!(visitor.cursor().value().is_root());
}

fn python_unit(statements: Vec<J>) -> J {
    let statements = statements
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let s = if i == 0 { s } else { s.with_prefix(Space::format("\n")) };
            RightPadded::build(s)
        })
        .collect();
    J::CompilationUnit(CompilationUnit::build(Dialect::Python, "test.py", statements))
}

#[test]
fn test_source_acceptability_filters_dialects() {
    let java = parse("x = 1;");
    let python = python_unit(vec![J::Assignment(reweave_java::Assignment::build(
        J::identifier("x"),
        J::literal("1").with_prefix(Space::single_space()),
    ))
    .with_prefix(Space::empty())]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = Rename::new("x", "y");
    visitor.python_only = true;

    let java_result = visitor.visit(Some(&java), &mut ctx).unwrap().unwrap();
    let python_result = visitor.visit(Some(&python), &mut ctx).unwrap().unwrap();

    assert!(java_result.ref_eq(&java));
    assert!(!python_result.ref_eq(&python));
    assert_eq!(python_result.print_trimmed_markers(), "y= 1");
}

/// Records the frame kinds above each identifier and every space location seen
#[derive(Default)]
struct Recorder {
    state: VisitorState<J>,
    frames: Vec<(String, Vec<&'static str>)>,
    locations: Vec<SpaceLocation>,
}

impl TreeVisitor<J> for Recorder {
    java_tree_visitor!(state);
}

impl JavaVisitor for Recorder {
    fn visit_space(&mut self, space: &Space, loc: SpaceLocation, _ctx: &mut dyn ExecutionContext) -> Result<Space> {
        self.locations.push(loc);
        Ok(space.clone())
    }

    fn visit_identifier(&mut self, ident: &Arc<Identifier>, _ctx: &mut dyn ExecutionContext) -> Result<Option<J>> {
        let kinds = self.cursor().get_path().map(JValue::kind).collect();
        self.frames.push((ident.simple_name.clone(), kinds));
        Ok(Some(J::Identifier(Arc::clone(ident))))
    }
}

#[test]
fn test_cursor_frames_for_padding_and_containers() {
    let cu = parse("a.f(b);");
    let mut ctx = InMemoryExecutionContext::new();
    let mut recorder = Recorder::default();

    recorder.visit(Some(&cu), &mut ctx).unwrap();

    let b = recorder.frames.iter().find(|(name, _)| name == "b").unwrap();
    assert_eq!(
        b.1,
        ["Identifier", "RightPadded", "Container", "MethodInvocation", "RightPadded", "CompilationUnit", "root"]
    );
    let a = recorder.frames.iter().find(|(name, _)| name == "a").unwrap();
    assert_eq!(a.1[..3], ["Identifier", "RightPadded", "MethodInvocation"]);

    assert!(recorder.locations.contains(&SpaceLocation::MethodSelectSuffix));
    assert!(recorder.locations.contains(&SpaceLocation::MethodInvocationArguments));
    assert!(recorder.locations.contains(&SpaceLocation::MethodInvocationArgumentSuffix));
    assert_eq!(recorder.locations.last(), Some(&SpaceLocation::CompilationUnitEof));
}

/// The enclosing right-padded frame exposes its location and padding
#[test]
fn test_right_padded_frame_carries_location() {
    #[derive(Default)]
    struct Locate {
        state: VisitorState<J>,
        seen: Vec<reweave_java::RightPaddedLocation>,
    }

    impl TreeVisitor<J> for Locate {
        java_tree_visitor!(state);
    }

    impl JavaVisitor for Locate {
        fn visit_literal(
            &mut self,
            node: &Arc<reweave_java::Literal>,
            _ctx: &mut dyn ExecutionContext,
        ) -> Result<Option<J>> {
            let location = self.cursor().parent().and_then(|p| p.value().right_padded_location());
            self.seen.extend(location);
            Ok(Some(J::Literal(Arc::clone(node))))
        }
    }

    let cu = parse("f(1, [2]);");
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = Locate::default();
    visitor.visit(Some(&cu), &mut ctx).unwrap();

    use reweave_java::RightPaddedLocation::*;
    assert_eq!(visitor.seen, [MethodInvocationArgument, CollectionElement]);
}
