//! Traversal engine behaviour over a minimal tree

mod common;

use common::{NodeValue, NodeVisitor, fail, group, leaf, padded};
use reweave_core::{
    Cursor, CursorValue, ErrorKind, ExecutionContext, InMemoryExecutionContext, RefEq, Result, STOP_AFTER_PRE_VISIT, Tree,
    TreeVisitor, VisitorState,
};

use common::Node;

fn keep(node: &Node) -> Result<Option<Node>> {
    Ok(Some(node.clone()))
}

fn upper(node: &Node) -> Result<Option<Node>> {
    Ok(Some(node.renamed(&node.name().to_uppercase())))
}

/// A visitor that changes nothing returns the very same tree
#[test]
fn test_noop_visit_preserves_identity() {
    let tree = group(vec![padded(leaf("a"), " "), padded(leaf("b"), "\n")]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = NodeVisitor::new(keep);
    let result = visitor.visit(Some(&tree), &mut ctx).unwrap().unwrap();

    assert!(result.ref_eq(&tree));
    assert!(visitor.cursor().value().is_root());
}

#[test]
fn test_absent_tree_yields_default_value() {
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = NodeVisitor::new(keep);
    assert!(visitor.visit(None, &mut ctx).unwrap().is_none());
}

/// A failure three frames deep is wrapped once, with a path of three frames plus the root
#[test]
fn test_failure_is_wrapped_with_cursor_path() {
    let tree = group(vec![padded(leaf("a"), ""), padded(leaf("boom"), "")]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = NodeVisitor::new(|node: &Node| {
        if node.name() == "boom" {
            Err(fail("cannot visit boom"))
        } else {
            Ok(Some(node.clone()))
        }
    });
    let error = visitor.visit(Some(&tree), &mut ctx).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RecipeRun);
    assert_eq!(error.root_cause().kind(), ErrorKind::Visitor);
    let path = error.cursor_path().unwrap();
    assert_eq!(path.segments(), ["Leaf", "RightPadded", "Group", "root"]);
    assert_eq!(path.to_string(), "root > Group > RightPadded > Leaf");

    // the visitor is usable again afterwards
    assert!(visitor.cursor().parent().is_none());
    let ok_tree = group(vec![padded(leaf("a"), "")]);
    assert!(visitor.visit(Some(&ok_tree), &mut ctx).is_ok());
}

/// Queued after-visit visitors run once the outermost visit completes
#[test]
fn test_after_visit_runs_at_top_level_only_once() {
    let tree = group(vec![padded(leaf("a"), " ")]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = NodeVisitor::new(keep);
    visitor.do_after_visit(Box::new(NodeVisitor::new(upper)));

    let first = visitor.visit(Some(&tree), &mut ctx).unwrap().unwrap();
    assert_eq!(first.children()[0].element().name(), "A");
    assert_eq!(first.children()[0].after().whitespace(), " ");

    let second = visitor.visit(Some(&tree), &mut ctx).unwrap().unwrap();
    assert!(second.ref_eq(&tree), "queue is drained after it runs");
}

/// Once the stop target has been visited every later visit is a pass-through
#[test]
fn test_stop_after_target() {
    let b = leaf("b");
    let tree = group(vec![padded(leaf("a"), ""), padded(b.clone(), ""), padded(leaf("c"), "")]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = NodeVisitor::new(upper);
    visitor.state = VisitorState::stopping_after(Some(b.id()));
    let result = visitor.visit(Some(&tree), &mut ctx).unwrap().unwrap();

    let names: Vec<_> = result.children().iter().map(|c| c.element().name().to_string()).collect();
    assert_eq!(names, ["A", "B", "c"]);
    assert!(visitor.state.is_stopped());
    assert!(result.children()[2].element().ref_eq(tree.children()[2].element()));
}

/// Skips groups entirely when asked to
struct SkipGroups {
    state: VisitorState<Node>,
    entered: usize,
}

impl TreeVisitor<Node> for SkipGroups {
    fn state(&self) -> &VisitorState<Node> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VisitorState<Node> {
        &mut self.state
    }

    fn pre_visit(&mut self, tree: Node, _ctx: &mut dyn ExecutionContext) -> Result<Option<Node>> {
        if matches!(tree, Node::Group(_)) {
            self.cursor().put_message(STOP_AFTER_PRE_VISIT, true);
        }
        Ok(Some(tree))
    }

    fn accept(&mut self, tree: &Node, _ctx: &mut dyn ExecutionContext) -> Result<Option<Node>> {
        self.entered += 1;
        Ok(Some(tree.clone()))
    }

    fn is_acceptable(&self, tree: &Node, _ctx: &dyn ExecutionContext) -> bool {
        tree.name() != "ignored"
    }
}

#[test]
fn test_stop_after_pre_visit_message_skips_children() {
    let tree = group(vec![padded(leaf("a"), "")]);
    let mut ctx = InMemoryExecutionContext::new();

    let mut visitor = SkipGroups {
        state: VisitorState::new(),
        entered: 0,
    };
    let result = visitor.visit(Some(&tree), &mut ctx).unwrap().unwrap();
    assert!(result.ref_eq(&tree));
    assert_eq!(visitor.entered, 0);

    let single = leaf("a");
    visitor.visit(Some(&single), &mut ctx).unwrap();
    assert_eq!(visitor.entered, 1);
}

#[test]
fn test_unacceptable_tree_is_returned_untouched() {
    let ignored = leaf("ignored");
    let mut ctx = InMemoryExecutionContext::new();
    let mut visitor = SkipGroups {
        state: VisitorState::new(),
        entered: 0,
    };

    let result = visitor.visit(Some(&ignored), &mut ctx).unwrap().unwrap();
    assert!(result.ref_eq(&ignored));
    assert_eq!(visitor.entered, 0);
}

#[test]
fn test_visit_with_parent_adopts_cursor() {
    let parent = Cursor::<NodeValue>::root().push(NodeValue::Padded);
    parent.put_message("depth", 7usize);

    struct ReadsParent {
        state: VisitorState<Node>,
        seen: Option<usize>,
    }

    impl TreeVisitor<Node> for ReadsParent {
        fn state(&self) -> &VisitorState<Node> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut VisitorState<Node> {
            &mut self.state
        }

        fn accept(&mut self, tree: &Node, _ctx: &mut dyn ExecutionContext) -> Result<Option<Node>> {
            self.seen = self.cursor().get_nearest_message("depth");
            Ok(Some(tree.clone()))
        }
    }

    let mut visitor = ReadsParent {
        state: VisitorState::new(),
        seen: None,
    };
    let mut ctx = InMemoryExecutionContext::new();
    visitor.visit_with_parent(Some(&leaf("a")), &mut ctx, parent.clone()).unwrap();

    assert_eq!(visitor.seen, Some(7));
    assert!(visitor.cursor().is_same(&parent));
}
