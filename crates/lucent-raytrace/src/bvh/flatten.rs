//! Conversion of the build tree into a depth-first linear array.

use super::build::{BuildNode, BuildNodeId, BuildNodes};
use super::node::{LinearNode, LinearNodeKind};

/// Lay out the tree rooted at `root` in pre-order.
///
/// The output has exactly one entry per build node. Each interior node is
/// followed immediately by its left subtree; its right child offset is
/// patched in once the left subtree has been written.
pub(crate) fn flatten(nodes: &BuildNodes, root: BuildNodeId) -> Box<[LinearNode]> {
    let mut linear = vec![LinearNode::default(); nodes.len()];
    let mut offset = 0;

    let written = flatten_recursive(nodes, root, &mut linear, &mut offset);
    debug_assert_eq!(written, 0);
    debug_assert_eq!(offset, linear.len());

    linear.into_boxed_slice()
}

/// Write the subtree at `id` starting at `*offset`; returns its offset.
fn flatten_recursive(
    nodes: &BuildNodes,
    id: BuildNodeId,
    linear: &mut [LinearNode],
    offset: &mut usize,
) -> usize {
    let this = *offset;
    *offset += 1;

    match nodes[id] {
        BuildNode::Leaf {
            bounds,
            first_primitive,
            primitive_count,
        } => {
            linear[this] = LinearNode::leaf(bounds, first_primitive, primitive_count);
        }

        BuildNode::Interior {
            bounds,
            axis,
            children: [left, right],
        } => {
            linear[this] = LinearNode::interior(bounds, axis);

            flatten_recursive(nodes, left, linear, offset);
            let right_offset = flatten_recursive(nodes, right, linear, offset);

            if let LinearNodeKind::Interior { right_child, .. } = &mut linear[this].kind {
                *right_child = right_offset;
            }
        }
    }

    this
}
