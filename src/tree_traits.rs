//! Rendering of a hierarchy as a `termtree` for the console.
//!
//! The tree is assembled without recursion. `termtree` formats and drops
//! nested trees recursively, so rendering stops at a depth limit and the
//! cut-off subtree is summarised in one leaf.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::{Hierarchy, HierarchyNode};

/// Levels rendered below the root unless configured otherwise.
pub const DEFAULT_TREE_DEPTH: usize = 32;

pub trait TreeNodeConvert {
    /// Render at most `max_depth` levels below the root.
    fn to_tree_string(&self, max_depth: usize) -> Tree<String>;
}

fn label(node: &HierarchyNode) -> String {
    format!("{} [{}]", node.employee, node.employee.salary())
}

/// Number of levels below `idx` in its subtree.
fn levels_below(hierarchy: &Hierarchy, idx: Index) -> usize {
    let Some(start) = hierarchy.get_node(idx) else {
        return 0;
    };
    let mut deepest = start.depth;
    let mut stack = vec![idx];
    while let Some(current) = stack.pop() {
        if let Some(node) = hierarchy.get_node(current) {
            deepest = deepest.max(node.depth);
            stack.extend(node.children.iter().copied());
        }
    }
    deepest - start.depth
}

impl TreeNodeConvert for Hierarchy {
    fn to_tree_string(&self, max_depth: usize) -> Tree<String> {
        // Pre-order of the visible nodes
        let mut visible = Vec::new();
        let mut stack = vec![self.root_index()];
        while let Some(idx) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            visible.push(idx);
            if node.depth < max_depth {
                stack.extend(node.children.iter().rev().copied());
            }
        }

        // Reverse pre-order finishes every subtree before its parent
        let mut built: HashMap<Index, Tree<String>> = HashMap::with_capacity(visible.len());
        for &idx in visible.iter().rev() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            let mut tree = Tree::new(label(node));
            if node.depth < max_depth {
                for child in &node.children {
                    if let Some(subtree) = built.remove(child) {
                        tree.push(subtree);
                    }
                }
            } else if node.is_manager() {
                tree.push(Tree::new(format!(
                    "… {} more levels",
                    levels_below(self, idx)
                )));
            }
            built.insert(idx, tree);
        }

        built
            .remove(&self.root_index())
            .unwrap_or_else(|| Tree::new(label(self.root())))
    }
}
