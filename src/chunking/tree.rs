//! Parse tree
//!
//! The reconstructed chunk tree, stored with the arena pattern: every node lives in one
//! vector and is addressed by [`NodeId`]; each node keeps its parent's id and an ordered
//! list of child ids. Removing a node, inserting at a position and splicing a node's
//! children up into its parent are all edits to those id lists, so the tree needs no
//! shared or cyclic ownership. Detached nodes stay in the arena but are unreachable from
//! the root and are ignored by every traversal.

use crate::chunking::sexpr::Leaf;
use std::fmt;

/// Index of a node in a [`ParseTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A leaf together with the chunk label it inherited when the tree was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritedLeaf {
    pub inherited_label: Option<String>,
    pub leaf: Leaf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A group of children, labeled by chunk type (`NC`, `VC`, ...) or unlabeled
    Chunk { label: Option<String> },
    /// A single-leaf node carrying the label of its nearest enclosing chunk
    Wrapper(InheritedLeaf),
    /// A `(token, tag)` pair
    Leaf(Leaf),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A rooted tree of chunks whose terminals are `(token, tag)` pairs.
#[derive(Debug, Clone)]
pub struct ParseTree {
    nodes: Vec<Node>, // arena
    root: NodeId,
}

// ============================================================================
// Construction
// ============================================================================
impl ParseTree {
    /// Creates a tree holding only a root chunk.
    pub fn new(root_label: Option<String>) -> Self {
        ParseTree {
            nodes: vec![Node {
                kind: NodeKind::Chunk { label: root_label },
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends a chunk as the last child of `parent`.
    pub fn add_chunk(&mut self, parent: NodeId, label: Option<String>) -> NodeId {
        self.push(parent, NodeKind::Chunk { label })
    }

    /// Appends a single-leaf wrapper as the last child of `parent`.
    pub fn add_wrapper(&mut self, parent: NodeId, leaf: InheritedLeaf) -> NodeId {
        self.push(parent, NodeKind::Wrapper(leaf))
    }

    /// Appends a bare leaf as the last child of `parent`.
    #[cfg(test)]
    pub(crate) fn add_leaf(&mut self, parent: NodeId, leaf: Leaf) -> NodeId {
        self.push(parent, NodeKind::Leaf(leaf))
    }
}

// ============================================================================
// Accessors
// ============================================================================
impl ParseTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Chunk label, or the inherited label of a wrapper. Bare leaves have none.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Chunk { label } => label.as_deref(),
            NodeKind::Wrapper(inherited) => inherited.inherited_label.as_deref(),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn is_chunk(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Chunk { .. })
    }

    /// True when no child of `id` is a chunk, i.e. it holds only leaves and wrappers.
    pub fn is_leaf_bearing(&self, id: NodeId) -> bool {
        self.children(id).iter().all(|&child| !self.is_chunk(child))
    }

    /// Every `(token, tag)` pair in the tree, left to right.
    pub fn leaves(&self) -> Vec<&Leaf> {
        self.leaves_under(self.root)
    }

    /// Every `(token, tag)` pair below `id`, left to right.
    pub fn leaves_under(&self, id: NodeId) -> Vec<&Leaf> {
        self.preorder(id)
            .into_iter()
            .filter_map(|node| match self.kind(node) {
                NodeKind::Leaf(leaf) => Some(leaf),
                NodeKind::Wrapper(inherited) => Some(&inherited.leaf),
                NodeKind::Chunk { .. } => None,
            })
            .collect()
    }

    /// Number of nodes reachable from the root, root included.
    pub fn node_count(&self) -> usize {
        self.preorder(self.root).len()
    }

    /// Ids of all nodes reachable from `id`, parents before children.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        order
    }
}

// ============================================================================
// Editing (crate-internal, used by the flattener)
// ============================================================================
impl ParseTree {
    /// Replaces `id` in its parent's child list by its own children, in order.
    /// Returns the number of children moved up. The root cannot be spliced.
    pub(crate) fn splice_into_parent(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.nodes[id.0].parent else {
            return 0;
        };
        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&child| child == id)
        else {
            return 0;
        };

        let moved = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &moved {
            self.nodes[child.0].parent = Some(parent);
        }
        let count = moved.len();
        self.nodes[parent.0]
            .children
            .splice(position..=position, moved);
        self.nodes[id.0].parent = None;
        count
    }

    /// Turns a wrapper into a bare leaf in place, dropping its inherited label.
    pub(crate) fn unwrap_leaf(&mut self, id: NodeId) {
        if let NodeKind::Wrapper(inherited) = &self.nodes[id.0].kind {
            let leaf = inherited.leaf.clone();
            self.nodes[id.0].kind = NodeKind::Leaf(leaf);
        }
    }

    /// Applies `f` to every label, token and tag reachable from the root.
    pub(crate) fn map_text(&mut self, f: impl Fn(&str) -> String) {
        for id in self.preorder(self.root) {
            match &mut self.nodes[id.0].kind {
                NodeKind::Chunk { label } => {
                    if let Some(label) = label {
                        *label = f(label);
                    }
                }
                NodeKind::Wrapper(inherited) => {
                    if let Some(label) = &mut inherited.inherited_label {
                        *label = f(label);
                    }
                    inherited.leaf.token = f(&inherited.leaf.token);
                    inherited.leaf.tag = f(&inherited.leaf.tag);
                }
                NodeKind::Leaf(leaf) => {
                    leaf.token = f(&leaf.token);
                    leaf.tag = f(&leaf.tag);
                }
            }
        }
    }
}

// ============================================================================
// Comparison and display
// ============================================================================
impl ParseTree {
    fn same_subtree(&self, id: NodeId, other: &ParseTree, other_id: NodeId) -> bool {
        let (ours, theirs) = (self.children(id), other.children(other_id));
        self.kind(id) == other.kind(other_id)
            && ours.len() == theirs.len()
            && ours
                .iter()
                .zip(theirs)
                .all(|(&a, &b)| self.same_subtree(a, other, b))
    }

    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind(id) {
            NodeKind::Leaf(leaf) => write!(f, "({} {})", leaf.token, leaf.tag),
            NodeKind::Wrapper(inherited) => {
                let leaf = &inherited.leaf;
                match &inherited.inherited_label {
                    Some(label) => write!(f, "({} ({} {}))", label, leaf.token, leaf.tag),
                    None => write!(f, "(({} {}))", leaf.token, leaf.tag),
                }
            }
            NodeKind::Chunk { label } => {
                write!(f, "({}", label.as_deref().unwrap_or(""))?;
                for &child in self.children(id) {
                    write!(f, " ")?;
                    self.fmt_node(child, f)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Trees are equal when their reachable structure is equal, whatever the arena layout.
impl PartialEq for ParseTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_subtree(self.root, other, other.root)
    }
}

impl Eq for ParseTree {}

/// Single-line bracketed notation, e.g. `(ROOT (NC (What WP)) (VC (is VBZ)))`.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str, tag: &str) -> Leaf {
        Leaf {
            token: token.to_string(),
            tag: tag.to_string(),
        }
    }

    fn sample() -> (ParseTree, NodeId) {
        let mut tree = ParseTree::new(Some("ROOT".to_string()));
        let root = tree.root();
        let nc = tree.add_chunk(root, Some("NC".to_string()));
        tree.add_leaf(nc, leaf("the", "DT"));
        tree.add_leaf(nc, leaf("airspeed", "NN"));
        tree.add_leaf(root, leaf("?", "SENT"));
        (tree, nc)
    }

    #[test]
    fn test_display() {
        let (tree, _) = sample();
        assert_eq!(
            tree.to_string(),
            "(ROOT (NC (the DT) (airspeed NN)) (? SENT))"
        );
    }

    #[test]
    fn test_parent_links() {
        let (tree, nc) = sample();
        assert_eq!(tree.parent(nc), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
        for &child in tree.children(nc) {
            assert_eq!(tree.parent(child), Some(nc));
        }
    }

    #[test]
    fn test_splice_into_parent_keeps_order() {
        let (mut tree, nc) = sample();
        assert_eq!(tree.splice_into_parent(nc), 2);
        assert_eq!(tree.to_string(), "(ROOT (the DT) (airspeed NN) (? SENT))");
        assert_eq!(tree.node_count(), 4);
        for &child in tree.children(tree.root()) {
            assert_eq!(tree.parent(child), Some(tree.root()));
        }
    }

    #[test]
    fn test_root_is_never_spliced() {
        let (mut tree, _) = sample();
        let root = tree.root();
        assert_eq!(tree.splice_into_parent(root), 0);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_equality_ignores_arena_layout() {
        let (mut spliced, nc) = sample();
        spliced.splice_into_parent(nc);

        let mut built = ParseTree::new(Some("ROOT".to_string()));
        let root = built.root();
        built.add_leaf(root, leaf("the", "DT"));
        built.add_leaf(root, leaf("airspeed", "NN"));
        built.add_leaf(root, leaf("?", "SENT"));

        assert_eq!(spliced, built);
    }

    #[test]
    fn test_wrapper_label_and_unwrap() {
        let mut tree = ParseTree::new(Some("ROOT".to_string()));
        let root = tree.root();
        let wrapper = tree.add_wrapper(
            root,
            InheritedLeaf {
                inherited_label: Some("NC".to_string()),
                leaf: leaf("What", "WP"),
            },
        );
        assert_eq!(tree.label(wrapper), Some("NC"));
        assert_eq!(tree.to_string(), "(ROOT (NC (What WP)))");

        tree.unwrap_leaf(wrapper);
        assert_eq!(tree.label(wrapper), None);
        assert_eq!(tree.to_string(), "(ROOT (What WP))");
    }
}
