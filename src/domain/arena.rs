//! Arena-backed employee hierarchy.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{Employee, EmployeeId};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct HierarchyNode {
    /// Employee owned by this node
    pub employee: Employee,
    /// Index of the manager's node, None for the root
    pub parent: Option<Index>,
    /// Direct subordinates in attachment order
    pub children: Vec<Index>,
    /// Reporting-line depth, root is 0
    pub depth: usize,
}

impl HierarchyNode {
    pub fn is_manager(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Single-root employee tree.
///
/// Nodes live in a generational arena and every child index is listed by
/// exactly one parent. An id index sits next to the arena so a manager is
/// found in O(1) when attaching subordinates.
#[derive(Debug)]
pub struct Hierarchy {
    arena: Arena<HierarchyNode>,
    root: Index,
    by_id: HashMap<EmployeeId, Index>,
}

impl Hierarchy {
    /// Start a hierarchy with its root. The root is never replaced.
    pub fn new(root: Employee) -> Self {
        let mut arena = Arena::new();
        let root_id = root.id();
        let root = arena.insert(HierarchyNode {
            employee: root,
            parent: None,
            children: Vec::new(),
            depth: 0,
        });
        let mut by_id = HashMap::new();
        by_id.insert(root_id, root);

        Self { arena, root, by_id }
    }

    /// Attach `employee` below the node of its manager.
    ///
    /// Hands the employee back when it has no manager id or the manager is
    /// not part of the tree yet.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn attach(&mut self, employee: Employee) -> Result<Index, Employee> {
        let Some(manager_idx) = employee
            .manager_id()
            .and_then(|manager_id| self.by_id.get(&manager_id).copied())
        else {
            return Err(employee);
        };
        let depth = match self.arena.get(manager_idx) {
            Some(manager) => manager.depth + 1,
            None => return Err(employee),
        };

        let id = employee.id();
        let node_idx = self.arena.insert(HierarchyNode {
            employee,
            parent: Some(manager_idx),
            children: Vec::new(),
            depth,
        });
        if let Some(manager) = self.arena.get_mut(manager_idx) {
            manager.children.push(node_idx);
        }
        self.by_id.insert(id, node_idx);

        Ok(node_idx)
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.arena[self.root]
    }

    pub fn root_index(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&HierarchyNode> {
        self.arena.get(idx)
    }

    /// Look up the node of an employee by id.
    pub fn find(&self, id: EmployeeId) -> Option<&HierarchyNode> {
        self.by_id.get(&id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of attached employees, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of manager hops from `id` up to the root.
    pub fn depth_of(&self, id: EmployeeId) -> Option<usize> {
        self.find(id).map(|node| node.depth)
    }

    /// Depth of the deepest reporting line.
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, node)| node.depth).max().unwrap_or(0)
    }

    /// Direct subordinates of `id` in attachment order.
    pub fn subordinates(&self, id: EmployeeId) -> Option<Vec<&Employee>> {
        let node = self.find(id)?;
        Some(
            node.children
                .iter()
                .filter_map(|&child| self.arena.get(child))
                .map(|child| &child.employee)
                .collect(),
        )
    }

    /// Managers of `id`, nearest first, ending with the root.
    ///
    /// Empty for the root itself.
    pub fn reporting_chain(&self, id: EmployeeId) -> Option<Vec<&Employee>> {
        let mut current = self.find(id)?;
        let mut chain = Vec::with_capacity(current.depth);
        while let Some(manager) = current.parent.and_then(|idx| self.arena.get(idx)) {
            chain.push(&manager.employee);
            current = manager;
        }
        Some(chain)
    }

    /// Pre-order traversal starting at the root, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    hierarchy: &'a Hierarchy,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(hierarchy: &'a Hierarchy) -> Self {
        Self {
            hierarchy,
            stack: vec![hierarchy.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.hierarchy.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
