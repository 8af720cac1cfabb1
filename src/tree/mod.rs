//! Generic tree container, builders, and sort policy.
//!
//! Nodes live in an arena owned by [`Tree`]; children are held as ordered
//! [`NodeId`] lists and each node keeps a non-owning parent handle used only
//! for path reconstruction.

pub mod document;
mod sort;
pub(crate) mod walk;

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

pub use document::{build_document_tree, parse_document_tree, DocumentKind, DocumentNode};
pub use sort::{containers_first, sort_tree};
pub use walk::{build_filesystem_tree, build_ignore_set, FileNode, WalkOptions};

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node always has ID 0.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Payloads that know whether their node may hold children.
pub trait TreePayload {
    fn is_container(&self) -> bool;
}

/// A single node: segment label, payload, ordered children, parent handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub name: String,
    pub payload: T,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(name: impl Into<String>, payload: T, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            payload,
            children: Vec::new(),
            parent,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An n-ary tree with exactly one root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Create a tree holding only its root.
    pub fn new(root_name: impl Into<String>, root_payload: T) -> Self {
        Self {
            nodes: vec![Node::new(root_name, root_payload, None)],
        }
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Like [`Tree::get`], for handles obtained from this tree.
    ///
    /// Panics on a handle from another tree.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Append a new child under `parent` and return its handle.
    ///
    /// Panics on a handle from another tree; the tree is left unchanged.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, payload: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node::new(name, payload, Some(parent)));
        id
    }

    /// First child of `parent` named `name` that also satisfies `accept`.
    pub fn find_child<F>(&self, parent: NodeId, name: &str, mut accept: F) -> Option<NodeId>
    where
        F: FnMut(&Node<T>) -> bool,
    {
        self.children(parent).iter().copied().find(|&c| {
            let child = &self.nodes[c.0];
            child.name == name && accept(child)
        })
    }

    /// Insert `payload` at `path`, creating missing intermediate nodes with
    /// `placeholder(segment)`. The final segment always creates a new node,
    /// even when a sibling with the same name already exists.
    pub fn insert_with<S, F>(
        &mut self,
        path: &[S],
        payload: T,
        mut placeholder: F,
    ) -> Result<NodeId>
    where
        S: AsRef<str>,
        F: FnMut(&str) -> T,
    {
        let (last, parents) = path.split_last().ok_or(Error::InvalidPath)?;

        let mut current = NodeId::ROOT;
        for segment in parents {
            let segment = segment.as_ref();
            current = match self.find_child(current, segment, |_| true) {
                Some(child) => child,
                None => self.add_child(current, segment, placeholder(segment)),
            };
        }

        Ok(self.add_child(current, last.as_ref(), payload))
    }

    /// Walk name-matched children from the root. An empty path yields the root.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        path.iter().try_fold(NodeId::ROOT, |current, segment| {
            self.find_child(current, segment.as_ref(), |_| true)
        })
    }

    /// Pre-order depth-first walk. Returning `false` from `visitor` skips
    /// that node's subtree; siblings are still visited.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &Node<T>) -> bool,
    {
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if visitor(id, node) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Reorder every sibling list using `less(a, b)` ("a sorts before b").
    /// The sort is stable: ties keep their insertion order.
    pub fn sort_by<F>(&mut self, mut less: F)
    where
        F: FnMut(&Node<T>, &Node<T>) -> bool,
    {
        for i in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by(|&a, &b| {
                let (a, b) = (&self.nodes[a.0], &self.nodes[b.0]);
                if less(a, b) {
                    Ordering::Less
                } else if less(b, a) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            });
            self.nodes[i].children = children;
        }
    }

    /// Total node count, root included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.traverse(|_, _| {
            count += 1;
            true
        });
        count
    }

    /// Names from the root's child down to `id`; empty for the root.
    pub fn path(&self, id: NodeId) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            if node.parent.is_some() {
                segments.push(node.name.clone());
            }
            current = node.parent;
        }
        segments.reverse();
        segments
    }

    /// Number of edges between the root and `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }
}

impl<T: Default> Tree<T> {
    /// Insert with `T::default()` placeholders for missing intermediate nodes.
    pub fn insert<S: AsRef<str>>(&mut self, path: &[S], payload: T) -> Result<NodeId> {
        self.insert_with(path, payload, |_| T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<T>(tree: &Tree<T>, id: NodeId) -> Vec<&str> {
        tree.children(id)
            .iter()
            .map(|&c| tree.node(c).name.as_str())
            .collect()
    }

    #[test]
    fn new_tree_has_only_root() {
        let tree = Tree::new("root", 0u32);
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.root().name, "root");
        assert!(tree.root().parent().is_none());
    }

    #[test]
    fn insert_creates_intermediates_with_default() {
        let mut tree = Tree::new("root", 0u32);
        let id = tree.insert(&["a", "b", "c"], 7).unwrap();
        assert_eq!(tree.node(id).payload, 7);
        let b = tree.find(&["a", "b"]).unwrap();
        assert_eq!(tree.node(b).payload, 0);
        assert_eq!(tree.path(id), vec!["a", "b", "c"]);
        assert_eq!(tree.depth(id), 3);
    }

    #[test]
    fn insert_with_uses_placeholder() {
        let mut tree = Tree::new("root", String::new());
        tree.insert_with(&["dir", "leaf"], "leaf".to_string(), |seg| format!("<{seg}>"))
            .unwrap();
        let dir = tree.find(&["dir"]).unwrap();
        assert_eq!(tree.node(dir).payload, "<dir>");
    }

    #[test]
    fn empty_path_is_rejected() {
        let mut tree = Tree::new("root", 0u32);
        let empty: [&str; 0] = [];
        assert!(matches!(tree.insert(&empty, 1), Err(Error::InvalidPath)));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn duplicate_final_segment_adds_second_node() {
        let mut tree = Tree::new("root", 0u32);
        tree.insert(&["x"], 1).unwrap();
        tree.insert(&["x"], 2).unwrap();
        assert_eq!(names(&tree, NodeId::ROOT), vec!["x", "x"]);
        // find returns the first match
        let found = tree.find(&["x"]).unwrap();
        assert_eq!(tree.node(found).payload, 1);
    }

    #[test]
    fn foreign_parent_handle_leaves_tree_untouched() {
        let mut tree = Tree::new("root", 0u32);
        tree.insert(&["a"], 1).unwrap();
        let before = tree.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            tree.add_child(NodeId(42), "orphan", 2);
        }));
        assert!(result.is_err());
        assert_eq!(tree, before);
        assert_eq!(tree.nodes.len(), 2);
    }

    #[test]
    fn traverse_prunes_subtree_but_visits_siblings() {
        let mut tree = Tree::new("root", 0u32);
        tree.insert(&["a", "a1"], 1).unwrap();
        tree.insert(&["b"], 2).unwrap();
        let mut seen = Vec::new();
        tree.traverse(|_, node| {
            seen.push(node.name.clone());
            node.name != "a"
        });
        assert_eq!(seen, vec!["root", "a", "b"]);
    }

    #[test]
    fn sort_by_is_stable() {
        let mut tree = Tree::new("root", 0u32);
        tree.insert(&["b"], 1).unwrap();
        tree.insert(&["a"], 2).unwrap();
        tree.insert(&["b"], 3).unwrap();
        tree.sort_by(|a, b| a.name < b.name);
        let payloads: Vec<u32> = tree
            .children(NodeId::ROOT)
            .iter()
            .map(|&c| tree.node(c).payload)
            .collect();
        assert_eq!(payloads, vec![2, 1, 3]);
    }
}
