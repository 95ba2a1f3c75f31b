//! Tree flattening
//!
//! Removes the redundant nesting left behind by label inheritance. Walking depth-first,
//! left to right, every child of a chunk `n` is examined:
//!
//! - A wrapper whose inherited label is `n`'s label, or no label at all, becomes a bare
//!   leaf of `n`.
//! - A chunk child is flattened first. If its label is `n`'s label, it is removed and its
//!   children take its place in `n`, in order, whatever they hold. An unlabeled chunk is
//!   removed the same way once it holds only leaves; an empty one simply disappears.
//!
//! Afterwards no node carries its parent's label. Every merge removes one node and moves
//! nothing below its old depth, so one pass reaches the fixed point and a second pass
//! changes nothing.

use crate::chunking::tree::{NodeId, NodeKind, ParseTree};

pub fn flatten(tree: &mut ParseTree) {
    let root = tree.root();
    flatten_node(tree, root);
}

fn flatten_node(tree: &mut ParseTree, id: NodeId) {
    let label = tree.label(id).map(str::to_string);
    let mut index = 0;

    while let Some(&child) = tree.children(id).get(index) {
        match tree.kind(child) {
            NodeKind::Leaf(_) => index += 1,
            NodeKind::Wrapper(inherited) => {
                let inherited = inherited.inherited_label.as_deref();
                if inherited.is_none() || inherited == label.as_deref() {
                    tree.unwrap_leaf(child);
                }
                index += 1;
            }
            NodeKind::Chunk { .. } => {
                flatten_node(tree, child);
                let child_label = tree.label(child);
                let mergeable = match child_label {
                    Some(_) => child_label == label.as_deref(),
                    None => tree.is_leaf_bearing(child),
                };
                if mergeable {
                    // spliced children were flattened under the same label already
                    index += tree.splice_into_parent(child);
                } else {
                    index += 1;
                }
            }
        }
    }
}
