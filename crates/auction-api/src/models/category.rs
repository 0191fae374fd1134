//! Auction category tree.

use serde::{Deserialize, Serialize};

/// One node of the category tree.
///
/// Leaf categories (no children) are the ones that can actually be searched;
/// inner nodes exist for navigation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// Stable category identifier, e.g. "weapon/one-handed".
    pub id: String,

    /// Display name, e.g. "한손 무기".
    pub name: String,

    /// Child categories; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Returns true if this is a searchable leaf category.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a node by id anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}
