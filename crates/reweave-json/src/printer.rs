//! Printing JSON trees

use reweave_core::{Print, PrintOutputCapture, RightPadded, Space, Tree};

use crate::tree::Json;

impl Print for Json {
    fn print_to(&self, capture: &mut PrintOutputCapture) {
        capture.before_prefix(self.markers());
        space(self.prefix(), capture);
        capture.before_syntax(self.id(), self.markers());
        match self {
            Json::Document(document) => {
                document.value.print_to(capture);
                space(&document.eof, capture);
            }
            Json::Object(object) => {
                capture.append("{");
                padded_list(&object.members, capture);
                capture.append("}");
            }
            Json::Member(member) => {
                member.key.element().print_to(capture);
                space(member.key.after(), capture);
                capture.append(":");
                member.value.print_to(capture);
            }
            Json::Array(array) => {
                capture.append("[");
                padded_list(&array.values, capture);
                capture.append("]");
            }
            Json::Literal(literal) => {
                capture.append(&literal.source);
            }
            Json::Identifier(identifier) => {
                capture.append(&identifier.name);
            }
            Json::Empty(_) => {}
        }
        capture.after_syntax(self.markers());
    }
}

fn space(space: &Space, capture: &mut PrintOutputCapture) {
    capture.append(&space.render(reweave_core::CommentSyntax::Slash));
}

fn padded_list(elements: &[RightPadded<Json>], capture: &mut PrintOutputCapture) {
    for (index, padded) in elements.iter().enumerate() {
        if index > 0 {
            capture.append(",");
        }
        padded.element().print_to(capture);
        space(padded.after(), capture);
    }
}
