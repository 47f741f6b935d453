//! Arena-backed forest of disk-image nodes.

use generational_arena::{Arena, Index};

/// Tree node wrapping a caller-supplied record.
#[derive(Debug)]
pub struct TreeNode<'r, R> {
    /// The disk-image record this node wraps (never mutated)
    pub record: &'r R,
    /// Index of the parent node, None for roots
    pub parent: Option<Index>,
    /// Indices of child nodes, in discovery order (not sorted)
    pub children: Vec<Index>,
}

/// Forest of snapshot/clone lineages.
///
/// All nodes live in one generational arena; parent back-references are
/// plain indices, so ownership flows strictly from parent to child.
/// Built once from an immutable record mapping, then consumed read-only.
#[derive(Debug, Default)]
pub struct Forest<'r, R> {
    arena: Arena<TreeNode<'r, R>>,
    roots: Vec<Index>,
}

impl<'r, R> Forest<'r, R> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a detached node for `record` and return its index.
    pub fn insert(&mut self, record: &'r R) -> Index {
        self.arena.insert(TreeNode {
            record,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Attach `child` under `parent`: appends to the parent's child list
    /// and sets the child's back-reference. `child` and `parent` must be
    /// distinct indices previously returned by `insert`.
    pub fn attach(&mut self, child: Index, parent: Index) {
        let (child_node, parent_node) = self.arena.get2_mut(child, parent);
        if let (Some(child_node), Some(parent_node)) = (child_node, parent_node) {
            child_node.parent = Some(parent);
            parent_node.children.push(child);
        }
    }

    /// Register `idx` as a root tree.
    pub fn mark_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode<'r, R>> {
        self.arena.get(idx)
    }

    /// Root indices in input-mapping order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Total number of nodes (roots and descendants alike).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Depth-first pre-order traversal over all trees, roots first.
    /// Yields `(index, depth, node)` with depth 1 at the roots.
    pub fn iter(&self) -> PreOrderIter<'_, 'r, R> {
        PreOrderIter::new(self)
    }
}

pub struct PreOrderIter<'f, 'r, R> {
    forest: &'f Forest<'r, R>,
    stack: Vec<(Index, usize)>,
}

impl<'f, 'r, R> PreOrderIter<'f, 'r, R> {
    fn new(forest: &'f Forest<'r, R>) -> Self {
        // Roots reversed so the first root is popped first
        let stack = forest.roots.iter().rev().map(|&idx| (idx, 1)).collect();
        Self { forest, stack }
    }
}

impl<'f, 'r, R> Iterator for PreOrderIter<'f, 'r, R> {
    type Item = (Index, usize, &'f TreeNode<'r, R>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, depth)) = self.stack.pop() {
            if let Some(node) = self.forest.arena.get(idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((idx, depth, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_linked_nodes_when_iterating_then_preorder_with_depths() {
        let (a, b, c) = ("a", "b", "c");
        let mut forest: Forest<&str> = Forest::new();
        let ia = forest.insert(&a);
        let ib = forest.insert(&b);
        let ic = forest.insert(&c);
        forest.attach(ib, ia);
        forest.attach(ic, ib);
        forest.mark_root(ia);

        let visited: Vec<(usize, &str)> = forest
            .iter()
            .map(|(_, depth, node)| (depth, *node.record))
            .collect();

        assert_eq!(visited, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn given_empty_forest_when_iterating_then_yields_nothing() {
        let forest: Forest<&str> = Forest::new();
        assert!(forest.is_empty());
        assert_eq!(forest.iter().count(), 0);
    }
}
