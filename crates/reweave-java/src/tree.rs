//! The J node catalog
//!
//! One closed enum, [`J`], covers the statements and expressions shared by the
//! brace dialect (Java) and the indentation dialect (Python). Each variant is a
//! reference-counted struct; `with_*` methods return the same `Arc` when the
//! new field value is the same allocation.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reweave_core::{
    CommentSyntax, Container, FileAttributes, LeftPadded, Markers, RefEq, Result, RightPadded, SourceFile,
    Space, Tree, TreeId, TypeTag, random_id,
};

use crate::value::JValue;

/// Which surface syntax a compilation unit uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Braces, semicolons, `//` comments
    #[default]
    Java,
    /// Colons and indentation, `#` comments
    Python,
}

impl Dialect {
    pub fn language(self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Python => "python",
        }
    }

    /// The dialect a file's extension suggests; anything but `.py` is Java
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Dialect::Python,
            _ => Dialect::Java,
        }
    }

    pub fn comment_syntax(self) -> CommentSyntax {
        match self {
            Dialect::Java => CommentSyntax::Slash,
            Dialect::Python => CommentSyntax::Hash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(self, dialect: Dialect) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And if dialect == Dialect::Python => "and",
            BinaryOperator::And => "&&",
            BinaryOperator::Or if dialect == Dialect::Python => "or",
            BinaryOperator::Or => "||",
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Equal | BinaryOperator::NotEqual => 3,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 4,
            BinaryOperator::Addition | BinaryOperator::Subtraction => 5,
            BinaryOperator::Multiplication | BinaryOperator::Division | BinaryOperator::Modulo => 6,
        }
    }

    pub fn is_equality(self) -> bool {
        matches!(self, BinaryOperator::Equal | BinaryOperator::NotEqual)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
        )
    }

    pub fn is_additive(self) -> bool {
        matches!(self, BinaryOperator::Addition | BinaryOperator::Subtraction)
    }

    pub fn is_multiplicative(self) -> bool {
        matches!(
            self,
            BinaryOperator::Multiplication | BinaryOperator::Division | BinaryOperator::Modulo
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl RefEq for BinaryOperator {
    fn ref_eq(&self, other: &Self) -> bool {
        self == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Tuple,
}

impl CollectionKind {
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            CollectionKind::List => ("[", "]"),
            CollectionKind::Set => ("{", "}"),
            CollectionKind::Tuple => ("(", ")"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub dialect: Dialect,
    pub source_path: PathBuf,
    pub file_attributes: Option<FileAttributes>,
    pub charset: Option<String>,
    pub statements: Vec<RightPadded<J>>,
    pub eof: Space,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub statements: Vec<RightPadded<J>>,
    pub end: Space,
}

#[derive(Debug, Clone)]
pub struct If {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub condition: J,
    pub then_part: RightPadded<J>,
    pub else_part: Option<J>,
}

#[derive(Debug, Clone)]
pub struct Else {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub body: RightPadded<J>,
}

#[derive(Debug, Clone)]
pub struct Return {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub expression: Option<J>,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub variable: J,
    pub assignment: LeftPadded<J>,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct Binary {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub left: J,
    pub operator: LeftPadded<BinaryOperator>,
    pub right: J,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub simple_name: String,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    /// The literal exactly as written
    pub value_source: String,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct FieldAccess {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub target: J,
    pub name: LeftPadded<J>,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct MethodInvocation {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    /// Receiver; its `after` is the space before the `.`
    pub select: Option<RightPadded<J>>,
    pub name: J,
    pub arguments: Container<J>,
    pub type_tag: Option<TypeTag>,
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub return_type: Option<J>,
    pub name: J,
    pub parameters: Container<J>,
    pub body: Option<J>,
}

#[derive(Debug, Clone)]
pub struct Parentheses {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub tree: RightPadded<J>,
}

#[derive(Debug, Clone)]
pub struct CollectionLiteral {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub kind: CollectionKind,
    pub elements: Container<J>,
    pub type_tag: Option<TypeTag>,
}

/// Nothing at all: an empty statement, or the sole element of `()`
#[derive(Debug, Clone)]
pub struct Empty {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
}

/// Source text kept verbatim because no node kind models it
#[derive(Debug, Clone)]
pub struct Unknown {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub text: String,
}

macro_rules! with_fields {
    ($ty:ident { $($with:ident => $field:ident : $fty:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $with(self: &Arc<Self>, $field: $fty) -> Arc<Self> {
                    if $field.ref_eq(&self.$field) {
                        return Arc::clone(self);
                    }
                    Arc::new(Self { $field, ..(**self).clone() })
                }
            )*
        }
    };
}

with_fields!(CompilationUnit {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_padded_statements => statements: Vec<RightPadded<J>>,
    with_eof => eof: Space,
});
with_fields!(Block {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_padded_statements => statements: Vec<RightPadded<J>>,
    with_end => end: Space,
});
with_fields!(If {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_condition => condition: J,
    with_then_part => then_part: RightPadded<J>,
    with_else_part => else_part: Option<J>,
});
with_fields!(Else {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_body => body: RightPadded<J>,
});
with_fields!(Return {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_expression => expression: Option<J>,
});
with_fields!(Assignment {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_variable => variable: J,
    with_assignment => assignment: LeftPadded<J>,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(Binary {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_left => left: J,
    with_operator => operator: LeftPadded<BinaryOperator>,
    with_right => right: J,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(Identifier {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_simple_name => simple_name: String,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(Literal {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_value_source => value_source: String,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(FieldAccess {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_target => target: J,
    with_name => name: LeftPadded<J>,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(MethodInvocation {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_select => select: Option<RightPadded<J>>,
    with_name => name: J,
    with_padded_arguments => arguments: Container<J>,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(MethodDeclaration {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_return_type => return_type: Option<J>,
    with_name => name: J,
    with_padded_parameters => parameters: Container<J>,
    with_body => body: Option<J>,
});
with_fields!(Parentheses {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_tree => tree: RightPadded<J>,
});
with_fields!(CollectionLiteral {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_padded_elements => elements: Container<J>,
    with_type_tag => type_tag: Option<TypeTag>,
});
with_fields!(Empty {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
});
with_fields!(Unknown {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_text => text: String,
});

impl CompilationUnit {
    pub fn build(dialect: Dialect, source_path: impl Into<PathBuf>, statements: Vec<RightPadded<J>>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            dialect,
            source_path: source_path.into(),
            file_attributes: None,
            charset: None,
            statements,
            eof: Space::empty(),
        })
    }

    pub fn with_source_path(self: &Arc<Self>, source_path: impl Into<PathBuf>) -> Arc<Self> {
        let source_path = source_path.into();
        if source_path == self.source_path {
            return Arc::clone(self);
        }
        Arc::new(Self {
            source_path,
            ..(**self).clone()
        })
    }

    pub fn statements(&self) -> Vec<J> {
        RightPadded::get_elements(&self.statements)
    }

    /// Replace the statements, keeping the padding of every statement that survives
    pub fn with_statements(self: &Arc<Self>, statements: Vec<J>) -> Result<Arc<Self>> {
        Ok(self.with_padded_statements(RightPadded::with_elements(&self.statements, statements)?))
    }

    pub fn with_file_attributes(self: &Arc<Self>, file_attributes: Option<FileAttributes>) -> Arc<Self> {
        if file_attributes == self.file_attributes {
            return Arc::clone(self);
        }
        Arc::new(Self {
            file_attributes,
            ..(**self).clone()
        })
    }
}

impl SourceFile for CompilationUnit {
    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn file_attributes(&self) -> Option<&FileAttributes> {
        self.file_attributes.as_ref()
    }

    fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    fn eof(&self) -> &Space {
        &self.eof
    }

    fn language(&self) -> &'static str {
        self.dialect.language()
    }
}

impl Block {
    pub fn build(statements: Vec<RightPadded<J>>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            statements,
            end: Space::empty(),
        })
    }

    pub fn statements(&self) -> Vec<J> {
        RightPadded::get_elements(&self.statements)
    }

    /// Replace the statements, keeping the padding of every statement that survives
    pub fn with_statements(self: &Arc<Self>, statements: Vec<J>) -> Result<Arc<Self>> {
        Ok(self.with_padded_statements(RightPadded::with_elements(&self.statements, statements)?))
    }
}

impl If {
    pub fn build(condition: J, then_part: J, else_part: Option<J>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            condition,
            then_part: RightPadded::build(then_part),
            else_part,
        })
    }
}

impl Else {
    pub fn build(body: J) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            body: RightPadded::build(body),
        })
    }
}

impl Return {
    pub fn build(expression: Option<J>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            expression,
        })
    }
}

impl Assignment {
    pub fn build(variable: J, value: J) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            variable,
            assignment: LeftPadded::build(value),
            type_tag: None,
        })
    }
}

impl Binary {
    pub fn build(left: J, operator: BinaryOperator, right: J) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            left,
            operator: LeftPadded::build(operator),
            right,
            type_tag: None,
        })
    }
}

impl Identifier {
    pub fn build(simple_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            simple_name: simple_name.into(),
            type_tag: None,
        })
    }
}

impl Literal {
    pub fn build(value_source: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            value_source: value_source.into(),
            type_tag: None,
        })
    }
}

impl FieldAccess {
    pub fn build(target: J, name: J) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            target,
            name: LeftPadded::build(name),
            type_tag: None,
        })
    }
}

impl MethodInvocation {
    pub fn build(select: Option<J>, name: J, arguments: Vec<J>) -> Arc<Self> {
        let arguments = if arguments.is_empty() {
            vec![RightPadded::build(J::Empty(Empty::build()))]
        } else {
            arguments.into_iter().map(RightPadded::build).collect()
        };
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            select: select.map(RightPadded::build),
            name,
            arguments: Container::build(Space::empty(), arguments, Markers::empty()),
            type_tag: None,
        })
    }

    pub fn arguments(&self) -> Vec<J> {
        self.arguments.elements()
    }

    pub fn with_arguments(self: &Arc<Self>, arguments: Vec<J>) -> Result<Arc<Self>> {
        Ok(self.with_padded_arguments(self.arguments.with_elements(arguments)?))
    }

    /// Walk receivers down to the start of a call chain
    pub fn chain_root(self: &Arc<Self>) -> J {
        let mut current = J::MethodInvocation(Arc::clone(self));
        while let J::MethodInvocation(mi) = &current {
            match &mi.select {
                Some(select) => current = select.element().clone(),
                None => break,
            }
        }
        current
    }
}

impl MethodDeclaration {
    pub fn build(return_type: Option<J>, name: J, parameters: Vec<J>, body: Option<J>) -> Arc<Self> {
        let parameters = if parameters.is_empty() {
            vec![RightPadded::build(J::Empty(Empty::build()))]
        } else {
            parameters.into_iter().map(RightPadded::build).collect()
        };
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            return_type,
            name,
            parameters: Container::build(Space::empty(), parameters, Markers::empty()),
            body,
        })
    }

    pub fn parameters(&self) -> Vec<J> {
        self.parameters.elements()
    }

    pub fn with_parameters(self: &Arc<Self>, parameters: Vec<J>) -> Result<Arc<Self>> {
        Ok(self.with_padded_parameters(self.parameters.with_elements(parameters)?))
    }
}

impl Parentheses {
    pub fn build(tree: J) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            tree: RightPadded::build(tree),
        })
    }
}

impl CollectionLiteral {
    pub fn build(kind: CollectionKind, elements: Vec<J>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            kind,
            elements: Container::build(
                Space::empty(),
                elements.into_iter().map(RightPadded::build).collect(),
                Markers::empty(),
            ),
            type_tag: None,
        })
    }

    pub fn elements(&self) -> Vec<J> {
        self.elements.elements()
    }

    pub fn with_elements(self: &Arc<Self>, elements: Vec<J>) -> Result<Arc<Self>> {
        Ok(self.with_padded_elements(self.elements.with_elements(elements)?))
    }
}

impl Empty {
    pub fn build() -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
        })
    }
}

impl Unknown {
    pub fn build(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            text: text.into(),
        })
    }
}

/// Can appear where a value is expected
pub trait Expression: Debug + Send + Sync {}

/// Can appear in a statement list
pub trait Statement: Debug + Send + Sync {}

/// Carries an opaque type annotation
pub trait TypedTree: Debug + Send + Sync {
    fn type_tag(&self) -> Option<&TypeTag>;
}

macro_rules! capability {
    ($cap:ident for $($ty:ident),*) => {
        $(impl $cap for $ty {})*
    };
}

capability!(Expression for Assignment, Binary, Identifier, Literal, FieldAccess, MethodInvocation, Parentheses, CollectionLiteral, Empty, Unknown);
capability!(Statement for Block, If, Return, Assignment, MethodInvocation, MethodDeclaration, Empty, Unknown);

macro_rules! typed {
    ($($ty:ident),*) => {
        $(
            impl TypedTree for $ty {
                fn type_tag(&self) -> Option<&TypeTag> {
                    self.type_tag.as_ref()
                }
            }
        )*
    };
}

typed!(Assignment, Binary, Identifier, Literal, FieldAccess, MethodInvocation, CollectionLiteral);

macro_rules! define_j {
    ($($variant:ident),* $(,)?) => {
        /// A node of the J catalog
        #[derive(Debug, Clone)]
        pub enum J {
            $($variant(Arc<$variant>),)*
        }

        $(
            impl From<Arc<$variant>> for J {
                fn from(node: Arc<$variant>) -> Self {
                    J::$variant(node)
                }
            }
        )*

        impl J {
            pub fn id(&self) -> TreeId {
                match self {
                    $(J::$variant(n) => n.id,)*
                }
            }

            pub fn prefix(&self) -> &Space {
                match self {
                    $(J::$variant(n) => &n.prefix,)*
                }
            }

            pub fn with_prefix(&self, prefix: Space) -> J {
                match self {
                    $(J::$variant(n) => J::$variant(n.with_prefix(prefix)),)*
                }
            }

            pub fn markers(&self) -> &Markers {
                match self {
                    $(J::$variant(n) => &n.markers,)*
                }
            }

            pub fn with_markers(&self, markers: Markers) -> J {
                match self {
                    $(J::$variant(n) => J::$variant(n.with_markers(markers)),)*
                }
            }

            pub fn kind(&self) -> &'static str {
                match self {
                    $(J::$variant(_) => stringify!($variant),)*
                }
            }
        }

        impl RefEq for J {
            fn ref_eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((J::$variant(a), J::$variant(b)) => Arc::ptr_eq(a, b),)*
                    _ => false,
                }
            }
        }
    };
}

define_j!(
    CompilationUnit,
    Block,
    If,
    Else,
    Return,
    Assignment,
    Binary,
    Identifier,
    Literal,
    FieldAccess,
    MethodInvocation,
    MethodDeclaration,
    Parentheses,
    CollectionLiteral,
    Empty,
    Unknown,
);

impl J {
    pub fn as_expression(&self) -> Option<&dyn Expression> {
        match self {
            J::Assignment(n) => Some(&**n),
            J::Binary(n) => Some(&**n),
            J::Identifier(n) => Some(&**n),
            J::Literal(n) => Some(&**n),
            J::FieldAccess(n) => Some(&**n),
            J::MethodInvocation(n) => Some(&**n),
            J::Parentheses(n) => Some(&**n),
            J::CollectionLiteral(n) => Some(&**n),
            J::Empty(n) => Some(&**n),
            J::Unknown(n) => Some(&**n),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&dyn Statement> {
        match self {
            J::Block(n) => Some(&**n),
            J::If(n) => Some(&**n),
            J::Return(n) => Some(&**n),
            J::Assignment(n) => Some(&**n),
            J::MethodInvocation(n) => Some(&**n),
            J::MethodDeclaration(n) => Some(&**n),
            J::Empty(n) => Some(&**n),
            J::Unknown(n) => Some(&**n),
            _ => None,
        }
    }

    pub fn as_typed(&self) -> Option<&dyn TypedTree> {
        match self {
            J::Assignment(n) => Some(&**n),
            J::Binary(n) => Some(&**n),
            J::Identifier(n) => Some(&**n),
            J::Literal(n) => Some(&**n),
            J::FieldAccess(n) => Some(&**n),
            J::MethodInvocation(n) => Some(&**n),
            J::CollectionLiteral(n) => Some(&**n),
            _ => None,
        }
    }

    pub fn is_expression(&self) -> bool {
        self.as_expression().is_some()
    }

    pub fn is_statement(&self) -> bool {
        self.as_statement().is_some()
    }

    pub fn type_tag(&self) -> Option<&TypeTag> {
        self.as_typed().and_then(TypedTree::type_tag)
    }

    /// Convenience constructors for synthesized nodes
    pub fn identifier(name: impl Into<String>) -> J {
        J::Identifier(Identifier::build(name))
    }

    pub fn literal(value_source: impl Into<String>) -> J {
        J::Literal(Literal::build(value_source))
    }

    pub fn empty() -> J {
        J::Empty(Empty::build())
    }
}

impl Tree for J {
    type Value = JValue;

    fn id(&self) -> TreeId {
        J::id(self)
    }

    fn prefix(&self) -> &Space {
        J::prefix(self)
    }

    fn with_prefix(&self, prefix: Space) -> Self {
        J::with_prefix(self, prefix)
    }

    fn markers(&self) -> &Markers {
        J::markers(self)
    }

    fn with_markers(&self, markers: Markers) -> Self {
        J::with_markers(self, markers)
    }

    fn kind(&self) -> &'static str {
        J::kind(self)
    }

    fn as_source_file(&self) -> Option<&dyn SourceFile> {
        match self {
            J::CompilationUnit(cu) => Some(&**cu),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_same_value_returns_same_node() {
        let id = Identifier::build("x").with_prefix(Space::format(" "));
        assert!(Arc::ptr_eq(&id, &id.with_prefix(id.prefix.clone())));

        let renamed = id.with_simple_name("y".to_string());
        assert!(!Arc::ptr_eq(&id, &renamed));
        assert_eq!(renamed.id, id.id);
        assert_eq!(renamed.prefix.whitespace(), " ");
    }

    #[test]
    fn test_capabilities() {
        let call = J::MethodInvocation(MethodInvocation::build(None, J::identifier("f"), vec![]));
        assert!(call.is_expression());
        assert!(call.is_statement());

        let block = J::Block(Block::build(Vec::new()));
        assert!(!block.is_expression());
        assert!(block.is_statement());

        let typed = J::Identifier(Identifier::build("x").with_type_tag(Some(TypeTag::new("int"))));
        assert_eq!(typed.type_tag().map(TypeTag::name), Some("int"));
        assert_eq!(typed.kind(), "Identifier");
    }

    #[test]
    fn test_chain_root() {
        let a = J::identifier("a");
        let b = MethodInvocation::build(Some(a.clone()), J::identifier("b"), vec![]);
        let c = MethodInvocation::build(Some(J::MethodInvocation(b)), J::identifier("c"), vec![]);
        assert!(c.chain_root().ref_eq(&a));
    }
}
