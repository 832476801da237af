//! Helpers for building and inspecting trees in tests.

use core::num::ParseIntError;

use redblack_tree::{Node, RbTree, Removed, TreeConfig};

/// Key/payload types used by the scenarios
pub type TestTree = RbTree<i64, String>;

/// Build a self-checking tree, silently skipping duplicate keys
pub fn build_checked(keys: &[i64]) -> TestTree {
    let mut tree = RbTree::with_config(TreeConfig::checked());
    for &key in keys {
        let _ = tree.insert(Node::new(key, payload(key)));
    }
    tree
}

/// Payload stored alongside `key`
pub fn payload(key: i64) -> String {
    format!("value-{key}")
}

/// Keys in the order `min` + repeated `successor` visits them
pub fn in_order_keys(tree: &TestTree) -> Vec<i64> {
    let mut keys = Vec::with_capacity(tree.len());
    let mut cursor = tree.min();
    while let Some(id) = cursor {
        if let Some(node) = tree.node(id) {
            keys.push(*node.key());
        }
        cursor = tree.successor(id);
    }
    keys
}

/// Delete the node holding `key`, if present
pub fn delete_key(tree: &mut TestTree, key: i64) -> Option<Removed<i64, String>> {
    let id = tree.search(&key)?;
    tree.delete(id).ok()
}

/// Parse a comma-separated key list such as `"20, 10, 30"`
pub fn parse_keys(list: &str) -> Result<Vec<i64>, ParseIntError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}
