//! Label-inheritance tree builder
//!
//! The chunker attaches a label to a whole span of tokens; the parse tree wants each leaf
//! to know which chunk it belongs to. This walk pushes every group label down onto its
//! leaves: each leaf becomes its own wrapper node whose inherited label is the label of
//! the group that directly contains it. Leaves sitting directly under the root inherit no
//! label. The wrappers are redundant by construction and the flattener removes them.
//!
//! A group with no leaf anywhere beneath it gives no leaf anything to inherit, so it
//! becomes an unlabeled chunk (the root keeps its label even when empty).

use crate::chunking::sexpr::{GenericChild, GenericNode};
use crate::chunking::tree::{InheritedLeaf, NodeId, ParseTree};

/// Build the label-inherited tree for a parsed root group.
pub fn build_tree(root: &GenericNode) -> ParseTree {
    let mut tree = ParseTree::new(root.label.clone());
    let root_id = tree.root();
    add_children(&mut tree, root_id, root, None);
    tree
}

/// `inherited` is the label handed to leaves directly under `node`.
fn add_children(tree: &mut ParseTree, id: NodeId, node: &GenericNode, inherited: Option<&str>) {
    for child in &node.children {
        match child {
            GenericChild::Leaf(leaf) => {
                tree.add_wrapper(
                    id,
                    InheritedLeaf {
                        inherited_label: inherited.map(str::to_string),
                        leaf: leaf.clone(),
                    },
                );
            }
            GenericChild::Node(group) => {
                let label = if !group.has_leaf() {
                    None
                } else {
                    group.label.clone()
                };
                let group_id = tree.add_chunk(id, label);
                add_children(tree, group_id, group, group.label.as_deref());
            }
        }
    }
}
