//! Editing JSON documents through visitors without disturbing their formatting

use std::sync::Arc;

use reweave_core::{
    ExecutionContext, InMemoryExecutionContext, Print, RefEq, Result, SourceFile, Space, Tree, TreeVisitor,
    VisitorState,
};
use reweave_json::{Json, JsonParser, JsonVisitor, Literal, LiteralValue, Member, Object, json_tree_visitor};

const SETTINGS: &str = r#"{
  // formatter settings
  "indentSize": 2,
  "useTabCharacter": false, /* legacy */
  "tabSize": 4
}
"#;

/// Sets the numeric value of one member
struct SetNumber {
    state: VisitorState<Json>,
    key: &'static str,
    value: f64,
}

impl TreeVisitor<Json> for SetNumber {
    json_tree_visitor!(state);
}

impl JsonVisitor for SetNumber {
    fn visit_member(&mut self, member: &Arc<Member>, _ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        if member.key_name() != Some(self.key) {
            return Ok(Some(Json::Member(Arc::clone(member))));
        }
        let Json::Literal(literal) = &member.value else {
            return Ok(Some(Json::Member(Arc::clone(member))));
        };
        let literal = literal.with_value(LiteralValue::Number(self.value));
        Ok(Some(Json::Member(member.with_value(Json::Literal(literal)))))
    }
}

/// Removes one member from every object
struct RemoveMember {
    state: VisitorState<Json>,
    key: &'static str,
}

impl TreeVisitor<Json> for RemoveMember {
    json_tree_visitor!(state);
}

impl JsonVisitor for RemoveMember {
    fn visit_object(&mut self, object: &Arc<Object>, _ctx: &mut dyn ExecutionContext) -> Result<Option<Json>> {
        let kept: Vec<Json> = object
            .members()
            .into_iter()
            .filter(|member| !matches!(member, Json::Member(m) if m.key_name() == Some(self.key)))
            .collect();
        Ok(Some(Json::Object(object.with_members(kept)?)))
    }
}

#[test]
fn test_unchanged_document_is_identical() {
    let document = JsonParser::parse(SETTINGS, "settings.json").unwrap();
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = SetNumber {
        state: VisitorState::new(),
        key: "missing",
        value: 1.0,
    };
    let result = visitor.visit(Some(&document), &mut ctx).unwrap().unwrap();
    assert!(result.ref_eq(&document));
}

#[test]
fn test_value_edit_preserves_comments() {
    let document = JsonParser::parse(SETTINGS, "settings.json").unwrap();
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = SetNumber {
        state: VisitorState::new(),
        key: "tabSize",
        value: 8.0,
    };
    let result = visitor.visit(Some(&document), &mut ctx).unwrap().unwrap();
    assert_eq!(result.id(), document.id());
    assert_eq!(result.print_trimmed_markers(), SETTINGS.replace("\"tabSize\": 4", "\"tabSize\": 8"));
}

#[test]
fn test_removing_a_member_reuses_remaining_padding() {
    let source = "{\"a\": 1 , \"b\": 2 ,\n \"c\": 3}";
    let document = JsonParser::parse(source, "abc.json").unwrap();
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = RemoveMember {
        state: VisitorState::new(),
        key: "b",
    };
    let result = visitor.visit(Some(&document), &mut ctx).unwrap().unwrap();
    assert_eq!(result.print_trimmed_markers(), "{\"a\": 1 ,\n \"c\": 3}");
}

#[test]
fn test_documents_report_their_language() {
    let document = JsonParser::parse("[]", "list.json").unwrap();
    let source = document.as_source_file().unwrap();
    assert_eq!(source.language(), "json");
    assert_eq!(source.source_path().to_str(), Some("list.json"));
}

#[test]
fn test_array_values_reconcile_by_identity() {
    let document = JsonParser::parse("[1 , 2 ,3]", "values.json").unwrap();
    let Json::Document(doc) = &document else { unreachable!() };
    let Json::Array(array) = &doc.value else { unreachable!() };

    let mut values = array.values();
    values.remove(1);
    values.push(Json::Literal(Literal::build("4", LiteralValue::Number(4.0))));
    let edited = array.with_values(values).unwrap();

    assert_eq!(edited.values[0].after().whitespace(), " ");
    assert!(edited.values[1].after().ref_eq(array.values[2].after()));
    assert!(edited.values[2].after().ref_eq(&Space::empty()));
    assert!(Arc::ptr_eq(&array.with_values(array.values()).unwrap(), array));
}
