//! JSON nodes
//!
//! Object members and array values are right-padded: the padding holds the
//! space before the following `,` (or the closing delimiter). An empty object
//! or array holds a single [`Empty`] element carrying the inner whitespace.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reweave_core::{
    CursorValue, FileAttributes, Markers, ROOT_VALUE, RefEq, Result, RightPadded, SourceFile, Space, Tree,
    TreeId, random_id,
};

#[derive(Debug, Clone)]
pub struct Document {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub source_path: PathBuf,
    pub file_attributes: Option<FileAttributes>,
    pub charset: Option<String>,
    pub value: Json,
    pub eof: Space,
}

#[derive(Debug, Clone)]
pub struct Object {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub members: Vec<RightPadded<Json>>,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    /// The key; its padding is the space before `:`
    pub key: RightPadded<Json>,
    pub value: Json,
}

#[derive(Debug, Clone)]
pub struct Array {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub values: Vec<RightPadded<Json>>,
}

/// The parsed value of a literal
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    /// The literal as written, quotes and escapes included
    pub source: String,
    pub value: LiteralValue,
}

/// An unquoted object key
#[derive(Debug, Clone)]
pub struct Identifier {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Empty {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
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

with_fields!(Document {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_value => value: Json,
    with_eof => eof: Space,
});
with_fields!(Object {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_padded_members => members: Vec<RightPadded<Json>>,
});
with_fields!(Member {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_key => key: RightPadded<Json>,
    with_value => value: Json,
});
with_fields!(Array {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_padded_values => values: Vec<RightPadded<Json>>,
});
with_fields!(Literal {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
});
with_fields!(Identifier {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
    with_name => name: String,
});
with_fields!(Empty {
    with_prefix => prefix: Space,
    with_markers => markers: Markers,
});

impl Document {
    pub fn build(source_path: impl Into<PathBuf>, value: Json) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            source_path: source_path.into(),
            file_attributes: None,
            charset: None,
            value,
            eof: Space::empty(),
        })
    }
}

impl SourceFile for Document {
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
        "json"
    }
}

impl Object {
    pub fn build(members: Vec<RightPadded<Json>>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            members,
        })
    }

    pub fn members(&self) -> Vec<Json> {
        RightPadded::get_elements(&self.members)
    }

    /// Replace the members, keeping the padding of every member that survives
    pub fn with_members(self: &Arc<Self>, members: Vec<Json>) -> Result<Arc<Self>> {
        Ok(self.with_padded_members(RightPadded::with_elements(&self.members, members)?))
    }

    /// The member whose key reads `name`
    pub fn member(&self, name: &str) -> Option<&Arc<Member>> {
        self.members.iter().find_map(|padded| match padded.element() {
            Json::Member(member) if member.key_name() == Some(name) => Some(member),
            _ => None,
        })
    }
}

impl Member {
    pub fn build(key: Json, value: Json) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            key: RightPadded::build(key),
            value,
        })
    }

    /// The key text without quotes
    pub fn key_name(&self) -> Option<&str> {
        match self.key.element() {
            Json::Identifier(ident) => Some(&ident.name),
            Json::Literal(literal) => match &literal.value {
                LiteralValue::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Array {
    pub fn build(values: Vec<RightPadded<Json>>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            values,
        })
    }

    pub fn values(&self) -> Vec<Json> {
        RightPadded::get_elements(&self.values)
    }

    pub fn with_values(self: &Arc<Self>, values: Vec<Json>) -> Result<Arc<Self>> {
        Ok(self.with_padded_values(RightPadded::with_elements(&self.values, values)?))
    }
}

impl Literal {
    pub fn build(source: impl Into<String>, value: LiteralValue) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            source: source.into(),
            value,
        })
    }

    pub fn string(value: &str) -> Arc<Self> {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        Self::build(format!("\"{escaped}\""), LiteralValue::String(value.to_string()))
    }

    /// Replace the value, re-rendering the source text
    pub fn with_value(self: &Arc<Self>, value: LiteralValue) -> Arc<Self> {
        if value == self.value {
            return Arc::clone(self);
        }
        let replacement = match &value {
            LiteralValue::String(s) => Literal::string(s),
            LiteralValue::Number(n) => Literal::build(n.to_string(), value.clone()),
            LiteralValue::Bool(b) => Literal::build(b.to_string(), value.clone()),
            LiteralValue::Null => Literal::build("null", LiteralValue::Null),
        };
        Arc::new(Self {
            source: replacement.source.clone(),
            value,
            ..(**self).clone()
        })
    }
}

impl Identifier {
    pub fn build(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: random_id(),
            prefix: Space::empty(),
            markers: Markers::empty(),
            name: name.into(),
        })
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

macro_rules! define_json {
    ($($variant:ident),* $(,)?) => {
        /// A node of a JSON document
        #[derive(Debug, Clone)]
        pub enum Json {
            $($variant(Arc<$variant>),)*
        }

        impl RefEq for Json {
            fn ref_eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Json::$variant(a), Json::$variant(b)) => Arc::ptr_eq(a, b),)*
                    _ => false,
                }
            }
        }

        impl Tree for Json {
            type Value = JsonCursorValue;

            fn id(&self) -> TreeId {
                match self {
                    $(Json::$variant(n) => n.id,)*
                }
            }

            fn prefix(&self) -> &Space {
                match self {
                    $(Json::$variant(n) => &n.prefix,)*
                }
            }

            fn with_prefix(&self, prefix: Space) -> Self {
                match self {
                    $(Json::$variant(n) => Json::$variant(n.with_prefix(prefix)),)*
                }
            }

            fn markers(&self) -> &Markers {
                match self {
                    $(Json::$variant(n) => &n.markers,)*
                }
            }

            fn with_markers(&self, markers: Markers) -> Self {
                match self {
                    $(Json::$variant(n) => Json::$variant(n.with_markers(markers)),)*
                }
            }

            fn kind(&self) -> &'static str {
                match self {
                    $(Json::$variant(_) => stringify!($variant),)*
                }
            }

            fn as_source_file(&self) -> Option<&dyn SourceFile> {
                match self {
                    Json::Document(document) => Some(&**document),
                    _ => None,
                }
            }
        }
    };
}

define_json!(Document, Object, Member, Array, Literal, Identifier, Empty);

/// Cursor frame values for JSON trees
#[derive(Debug, Clone)]
pub enum JsonCursorValue {
    Root,
    Tree(Json),
    RightPadded(RightPadded<Json>),
}

impl CursorValue for JsonCursorValue {
    type Tree = Json;

    fn root() -> Self {
        JsonCursorValue::Root
    }

    fn from_tree(tree: Json) -> Self {
        JsonCursorValue::Tree(tree)
    }

    fn as_tree(&self) -> Option<&Json> {
        match self {
            JsonCursorValue::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    fn is_root(&self) -> bool {
        matches!(self, JsonCursorValue::Root)
    }

    fn kind(&self) -> &'static str {
        match self {
            JsonCursorValue::Root => ROOT_VALUE,
            JsonCursorValue::Tree(tree) => tree.kind(),
            JsonCursorValue::RightPadded(_) => "RightPadded",
        }
    }
}
