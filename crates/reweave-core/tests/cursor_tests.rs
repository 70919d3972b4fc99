//! Cursor message scoping and stack operations

mod common;

use common::{NodeValue, leaf};
use reweave_core::{Cursor, CursorValue, Tree};

#[test]
fn test_nearest_message_walks_ancestors_not_siblings() {
    let root = Cursor::<NodeValue>::root();
    let block = root.push(NodeValue::Tree(leaf("block")));
    block.put_message("lastIndent", 4usize);

    let first = block.push(NodeValue::Padded);
    let second = block.push(NodeValue::Padded);
    first.put_message("lastIndent", 8usize);

    assert_eq!(first.get_nearest_message::<usize>("lastIndent"), Some(8));
    assert_eq!(second.get_nearest_message::<usize>("lastIndent"), Some(4));
    assert_eq!(second.get_message::<usize>("lastIndent"), None);
    assert_eq!(root.get_nearest_message_or("lastIndent", 0usize), 0);
}

#[test]
fn test_shared_frames_observe_each_others_puts() {
    let frame = Cursor::<NodeValue>::root().push(NodeValue::Padded);
    let alias = frame.clone();
    alias.put_message("indentType", "align");
    assert_eq!(frame.get_message::<&str>("indentType"), Some("align"));
}

#[test]
fn test_fork_isolates_messages() {
    let frame = Cursor::<NodeValue>::root().push(NodeValue::Padded);
    frame.put_message("k", 1u8);

    let forked = frame.fork();
    forked.put_message("k", 2u8);
    forked.parent().unwrap().put_message("k", 3u8);

    assert_eq!(frame.get_message::<u8>("k"), Some(1));
    assert_eq!(frame.parent().unwrap().get_message::<u8>("k"), None);
    assert_eq!(forked.get_message::<u8>("k"), Some(2));
}

#[test]
fn test_path_and_enclosing_lookups() {
    let outer = leaf("outer");
    let inner = leaf("inner");
    let cursor = Cursor::<NodeValue>::root()
        .push(NodeValue::Tree(outer.clone()))
        .push(NodeValue::Padded)
        .push(NodeValue::Tree(inner.clone()));

    let kinds: Vec<_> = cursor.get_path().map(CursorValue::kind).collect();
    assert_eq!(kinds, ["Leaf", "RightPadded", "Leaf", "root"]);
    assert_eq!(cursor.depth(), 3);

    let enclosing = cursor.first_enclosing(|t| t.name() == "outer").unwrap();
    assert_eq!(enclosing.id(), outer.id());

    let parent_tree = cursor.parent_tree_cursor().unwrap();
    assert_eq!(parent_tree.tree().unwrap().id(), outer.id());
}
