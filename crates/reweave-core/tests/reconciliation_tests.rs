//! List reconciliation: edited element lists mapped back onto padded lists

mod common;

use common::{leaf, padded};
use reweave_core::{Container, ErrorKind, Markers, RefEq, RightPadded, Space, Tree};

fn names(list: &[RightPadded<common::Node>]) -> Vec<&str> {
    list.iter().map(|p| p.element().name()).collect()
}

/// Removing an element keeps the padding of every remaining element, in order
#[test]
fn test_removal_preserves_remaining_padding() {
    let before = vec![padded(leaf("a"), " "), padded(leaf("b"), "  "), padded(leaf("c"), "\n")];
    let edited = vec![before[0].element().clone(), before[2].element().clone()];

    let after = RightPadded::with_elements(&before, edited).unwrap();

    assert_eq!(names(&after), ["a", "c"]);
    assert!(after[0].ref_eq(&before[0]));
    assert!(after[1].ref_eq(&before[2]));
    assert_eq!(after[1].after().whitespace(), "\n");
}

/// A brand-new element gets empty padding; its neighbours keep theirs
#[test]
fn test_insertion_synthesizes_empty_padding() {
    let before = vec![padded(leaf("a"), " "), padded(leaf("c"), "\n")];
    let inserted = leaf("b");
    let edited = vec![
        before[0].element().clone(),
        inserted.clone(),
        before[1].element().clone(),
    ];

    let after = RightPadded::with_elements(&before, edited).unwrap();

    assert_eq!(names(&after), ["a", "b", "c"]);
    assert!(after[1].element().ref_eq(&inserted));
    assert!(after[1].after().ref_eq(&Space::empty()));
    assert!(after[1].markers().ref_eq(&Markers::empty()));
    assert!(after[0].ref_eq(&before[0]));
    assert!(after[2].ref_eq(&before[1]));
}

#[test]
fn test_reordering_follows_new_order() {
    let before = vec![padded(leaf("a"), " "), padded(leaf("b"), "  ")];
    let edited = vec![before[1].element().clone(), before[0].element().clone()];

    let after = RightPadded::with_elements(&before, edited).unwrap();

    assert_eq!(names(&after), ["b", "a"]);
    assert_eq!(after[0].after().whitespace(), "  ");
    assert_eq!(after[1].after().whitespace(), " ");
}

#[test]
fn test_unchanged_list_is_returned_as_is() {
    let before = vec![padded(leaf("a"), " "), padded(leaf("b"), "")];
    let after = RightPadded::with_elements(&before, RightPadded::get_elements(&before)).unwrap();
    assert!(after.ref_eq(&before));
}

/// Same length with one element edited in place: the edited element keeps its wrapper's padding
#[test]
fn test_in_place_edit_keeps_wrapper() {
    let before = vec![padded(leaf("a"), " "), padded(leaf("b"), "\t")];
    let renamed = before[1].element().renamed("z");
    let edited = vec![before[0].element().clone(), renamed.clone()];

    let after = RightPadded::with_elements(&before, edited).unwrap();

    assert!(after[0].ref_eq(&before[0]));
    assert!(after[1].element().ref_eq(&renamed));
    assert!(after[1].after().ref_eq(before[1].after()));
    assert_eq!(after[1].element().id(), before[1].element().id());
}

#[test]
fn test_empty_edit_yields_empty_list() {
    let before = vec![padded(leaf("a"), " ")];
    assert!(RightPadded::with_elements(&before, Vec::new()).unwrap().is_empty());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let a = leaf("a");
    let before = vec![padded(a.clone(), " "), padded(a.clone(), " ")];

    let error = RightPadded::with_elements(&before, vec![a]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DuplicateId);
}

#[test]
fn test_container_reconciliation() {
    let container = Container::build(
        Space::single_space(),
        vec![padded(leaf("a"), ""), padded(leaf("b"), "\n")],
        Markers::empty(),
    );

    let same = container.with_elements(container.elements()).unwrap();
    assert!(same.ref_eq(&container));

    let trimmed = container.with_elements(vec![container.elements()[1].clone()]).unwrap();
    assert_eq!(trimmed.len(), 1);
    assert_eq!(trimmed.before().whitespace(), " ");
    assert_eq!(trimmed.padded()[0].after().whitespace(), "\n");
}

#[test]
fn test_container_nullable() {
    assert!(Container::<common::Node>::with_elements_nullable(None, None).unwrap().is_none());
    assert!(Container::<common::Node>::with_elements_nullable(None, Some(Vec::new())).unwrap().is_none());

    let created = Container::with_elements_nullable(None, Some(vec![leaf("a")]))
        .unwrap()
        .unwrap();
    assert!(created.before().ref_eq(&Space::empty()));
    assert_eq!(created.len(), 1);
    assert!(Container::<common::Node>::empty().is_empty());
}
