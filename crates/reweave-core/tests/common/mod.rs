//! A minimal tree used to exercise the generic machinery without a language crate

#![allow(dead_code)]

use std::sync::Arc;

use reweave_core::{
    CursorValue, ExecutionContext, Markers, RefEq, Result, ReweaveError, RightPadded, Space, Tree, TreeId,
    TreeVisitor, VisitorState, random_id,
};

#[derive(Debug, Clone)]
pub struct LeafData {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub name: String,
}

/// A named leaf, or a group of padded children
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Arc<LeafData>),
    Group(Arc<GroupData>),
}

#[derive(Debug, Clone)]
pub struct GroupData {
    pub id: TreeId,
    pub prefix: Space,
    pub markers: Markers,
    pub children: Vec<RightPadded<Node>>,
}

pub fn leaf(name: &str) -> Node {
    Node::Leaf(Arc::new(LeafData {
        id: random_id(),
        prefix: Space::empty(),
        markers: Markers::empty(),
        name: name.to_string(),
    }))
}

pub fn group(children: Vec<RightPadded<Node>>) -> Node {
    Node::Group(Arc::new(GroupData {
        id: random_id(),
        prefix: Space::empty(),
        markers: Markers::empty(),
        children,
    }))
}

pub fn padded(node: Node, after: &str) -> RightPadded<Node> {
    RightPadded::new(node, Space::format(after), Markers::empty())
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(l) => &l.name,
            Node::Group(_) => "group",
        }
    }

    pub fn children(&self) -> &[RightPadded<Node>] {
        match self {
            Node::Leaf(_) => &[],
            Node::Group(g) => &g.children,
        }
    }

    pub fn with_children(&self, children: Vec<RightPadded<Node>>) -> Node {
        match self {
            Node::Group(g) if !children.ref_eq(&g.children) => Node::Group(Arc::new(GroupData {
                children,
                ..(**g).clone()
            })),
            _ => self.clone(),
        }
    }

    pub fn renamed(&self, name: &str) -> Node {
        match self {
            Node::Leaf(l) => Node::Leaf(Arc::new(LeafData {
                name: name.to_string(),
                ..(**l).clone()
            })),
            Node::Group(_) => self.clone(),
        }
    }
}

impl RefEq for Node {
    fn ref_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => Arc::ptr_eq(a, b),
            (Node::Group(a), Node::Group(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeValue {
    Root,
    Tree(Node),
    Padded,
}

impl CursorValue for NodeValue {
    type Tree = Node;

    fn root() -> Self {
        NodeValue::Root
    }

    fn from_tree(tree: Node) -> Self {
        NodeValue::Tree(tree)
    }

    fn as_tree(&self) -> Option<&Node> {
        match self {
            NodeValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    fn is_root(&self) -> bool {
        matches!(self, NodeValue::Root)
    }

    fn kind(&self) -> &'static str {
        match self {
            NodeValue::Root => "root",
            NodeValue::Tree(t) => t.kind(),
            NodeValue::Padded => "RightPadded",
        }
    }
}

impl Tree for Node {
    type Value = NodeValue;

    fn id(&self) -> TreeId {
        match self {
            Node::Leaf(l) => l.id,
            Node::Group(g) => g.id,
        }
    }

    fn prefix(&self) -> &Space {
        match self {
            Node::Leaf(l) => &l.prefix,
            Node::Group(g) => &g.prefix,
        }
    }

    fn with_prefix(&self, prefix: Space) -> Self {
        match self {
            Node::Leaf(l) => Node::Leaf(Arc::new(LeafData { prefix, ..(**l).clone() })),
            Node::Group(g) => Node::Group(Arc::new(GroupData { prefix, ..(**g).clone() })),
        }
    }

    fn markers(&self) -> &Markers {
        match self {
            Node::Leaf(l) => &l.markers,
            Node::Group(g) => &g.markers,
        }
    }

    fn with_markers(&self, markers: Markers) -> Self {
        match self {
            Node::Leaf(l) => Node::Leaf(Arc::new(LeafData { markers, ..(**l).clone() })),
            Node::Group(g) => Node::Group(Arc::new(GroupData { markers, ..(**g).clone() })),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Leaf(_) => "Leaf",
            Node::Group(_) => "Group",
        }
    }
}

/// Walks groups through padded frames and hands leaves to `on_leaf`
pub struct NodeVisitor<F> {
    pub state: VisitorState<Node>,
    pub on_leaf: F,
    pub visited: Vec<String>,
}

impl<F> NodeVisitor<F>
where
    F: FnMut(&Node) -> Result<Option<Node>>,
{
    pub fn new(on_leaf: F) -> Self {
        Self {
            state: VisitorState::new(),
            on_leaf,
            visited: Vec::new(),
        }
    }
}

impl<F> TreeVisitor<Node> for NodeVisitor<F>
where
    F: FnMut(&Node) -> Result<Option<Node>>,
{
    fn state(&self) -> &VisitorState<Node> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VisitorState<Node> {
        &mut self.state
    }

    fn accept(&mut self, tree: &Node, ctx: &mut dyn ExecutionContext) -> Result<Option<Node>> {
        self.visited.push(tree.name().to_string());
        match tree {
            Node::Leaf(_) => (self.on_leaf)(tree),
            Node::Group(_) => {
                let mut children = Vec::new();
                for child in tree.children() {
                    let parent = self.cursor().clone();
                    self.set_cursor(parent.push(NodeValue::Padded));
                    let visited = self.visit(Some(child.element()), ctx);
                    self.set_cursor(parent);
                    if let Some(element) = visited? {
                        children.push(child.with_element(element));
                    }
                }
                Ok(Some(tree.with_children(children)))
            }
        }
    }
}

pub fn fail(message: &str) -> ReweaveError {
    ReweaveError::visitor_error(message)
}
