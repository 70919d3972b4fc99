//! Printing in both dialects, marker rendering and probing

use insta::assert_snapshot;
use reweave_core::{
    CommentSyntax, Container, Markers, Print, PrintOutputCapture, RightPadded, SearchResult, Space,
};
use reweave_java::{
    Block, CollectionKind, CollectionLiteral, CompilationUnit, Dialect, If, J, JavaParser, MethodDeclaration,
    Return, Semicolon, TrailingComma,
};

fn at(prefix: &str, tree: J) -> J {
    tree.with_prefix(Space::format_with(prefix, CommentSyntax::Hash))
}

fn python_function() -> J {
    let returned = CollectionLiteral::build(
        CollectionKind::List,
        vec![J::identifier("a"), at(" ", J::identifier("b"))],
    );
    let mut elements = returned.elements.padded().to_vec();
    if let Some(last) = elements.pop() {
        elements.push(last.with_markers(Markers::empty().add(TrailingComma::new(Space::empty()))));
    }
    let returned = returned.with_padded_elements(Container::build(Space::empty(), elements, Markers::empty()));

    let if_body = J::Block(Block::build(vec![RightPadded::build(at(
        "\n        ",
        J::Return(Return::build(Some(at(" ", J::identifier("b"))))),
    ))]));
    let condition = at(" ", J::identifier("a"));
    let guard = J::If(If::build(condition, if_body, None));

    let body = J::Block(Block::build(vec![
        RightPadded::build(at("\n    # guard\n    ", guard)),
        RightPadded::build(at("\n    ", J::Return(Return::build(Some(at(" ", J::CollectionLiteral(returned))))))),
    ]));
    let declaration = MethodDeclaration::build(
        None,
        at(" ", J::identifier("f")),
        vec![J::identifier("a"), at(" ", J::identifier("b"))],
        Some(body),
    );

    let cu = CompilationUnit::build(Dialect::Python, "f.py", vec![RightPadded::build(J::MethodDeclaration(declaration))]);
    J::CompilationUnit(cu.with_eof(Space::format("\n")))
}

#[test]
fn test_python_dialect_printing() {
    let printed = python_function().print_trimmed_markers();
    assert_snapshot!(printed.trim_end(), @r"
    def f(a, b):
        # guard
        if a:
            return b
        return [a, b,]
    ");
    assert!(printed.ends_with("]\n"));
}

#[test]
fn test_python_semicolons_come_from_markers() {
    let first = RightPadded::build(J::identifier("x")).with_markers(Markers::empty().add(Semicolon::new()));
    let second = RightPadded::build(at(" ", J::identifier("y")));
    let cu = CompilationUnit::build(Dialect::Python, "s.py", vec![first, second]);
    assert_eq!(J::CompilationUnit(cu).print_trimmed_markers(), "x; y");
}

#[test]
fn test_java_roundtrip_with_comments() {
    let source = "/* header */\nint max(int a, int b) {\n    if (a > b) return a; // early\n    else {\n        return b;\n    }\n}\n";
    let cu = JavaParser::parse(source, "Max.java").unwrap();
    assert!(cu.print_equals_input(source));
}

#[test]
fn test_search_result_markers_render_before_syntax() {
    let cu = JavaParser::parse("x = y;", "T.java").unwrap();
    let J::CompilationUnit(unit) = &cu else { unreachable!() };
    let J::Assignment(assignment) = unit.statements[0].element() else { unreachable!() };
    let value = assignment.assignment.element();
    let marked = value.with_markers(value.markers().add(SearchResult::new("found y")));
    let assignment = assignment.with_assignment(assignment.assignment.with_element(marked));
    let statement = unit.statements[0].with_element(J::Assignment(assignment));
    let cu = J::CompilationUnit(unit.with_padded_statements(vec![statement]));

    assert_eq!(cu.print_all(), "x = /*~~(found y)~~>*/y;");
    assert_eq!(cu.print_trimmed_markers(), "x = y;");
}

#[test]
fn test_probe_records_offset_of_node_syntax() {
    let cu = JavaParser::parse("call(first,\n     second);", "T.java").unwrap();
    let J::CompilationUnit(unit) = &cu else { unreachable!() };
    let J::MethodInvocation(call) = unit.statements[0].element() else { unreachable!() };
    let second = call.arguments.padded()[1].element().id();

    let mut capture = PrintOutputCapture::new().probing(second);
    cu.print_to(&mut capture);

    let offset = capture.probe_offset().unwrap();
    assert_eq!(&capture.out()[offset..], "second);");
    assert_eq!(reweave_core::print::column_of(capture.out(), offset), 5);
}
