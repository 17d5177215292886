//! Unit tests for the leaf value types: positions and field store views.
mod common;
use common::*;
use formtree::prelude::*;

#[test]
fn position_parent_walks_one_level_up() {
    let leaf = Position::from(&[0u32, 1, 2][..]);
    assert_eq!(leaf.parent(), Some(Position::from(&[0u32, 1][..])));
    assert_eq!(Position::from(&[3u32][..]).parent(), Some(Position::root()));
    assert_eq!(Position::root().parent(), None);
}

#[test]
fn position_ancestry_is_strict_prefix() {
    let root = Position::root();
    let outer = Position::from(&[0u32][..]);
    let inner = Position::from(&[0u32, 1][..]);
    let sibling = Position::from(&[1u32][..]);

    assert!(root.is_ancestor_of(&inner));
    assert!(outer.is_ancestor_of(&inner));
    assert!(!inner.is_ancestor_of(&outer));
    assert!(!outer.is_ancestor_of(&sibling));
    // Strict: a position is not its own ancestor, but it contains itself.
    assert!(!outer.is_ancestor_of(&outer));
    assert!(outer.contains(&outer));

    let ancestors: Vec<Position> = inner.ancestors().collect();
    assert_eq!(ancestors, vec![root, outer]);
}

#[test]
fn position_keys_are_canonical() {
    assert_eq!(Position::root().key(), "root");
    assert_eq!(Position::from(&[0u32, 1, 2][..]).key(), "0,1,2");
    assert_eq!(Position::root().child(4).key(), "4");
}

#[test]
fn store_values_view() {
    let store = store_with(&[
        ("age", FieldValue::Number(21.0)),
        ("name", FieldValue::Text("ada".to_string())),
    ]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.values().count(), 2);
    assert!(store.values().any(|v| *v == FieldValue::Number(21.0)));

    let mut keys: Vec<&str> = store.iter().map(|(key, _)| key).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["age", "name"]);
}
