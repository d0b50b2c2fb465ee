use lucent_math::{Axis, Bounds3};

/// A node of the flattened hierarchy.
///
/// Nodes are stored in depth-first pre-order, so the left child of an
/// interior node at offset `k` always sits at `k + 1`; only the right
/// child's offset is stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearNode {
    /// Bounds of everything below this node.
    pub bounds: Bounds3,
    /// Leaf payload or interior links.
    pub kind: LinearNodeKind,
}

/// Payload of a [`LinearNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearNodeKind {
    /// A contiguous run of primitives in the reordered primitive list.
    Leaf {
        /// Index of the first primitive of the run.
        first_primitive: u32,
        /// Length of the run; never zero.
        primitive_count: u32,
    },

    /// Two children; the left one is implicit at `self + 1`.
    Interior {
        /// Axis the children were split along.
        axis: Axis,
        /// Offset of the right child.
        right_child: usize,
    },
}

impl LinearNode {
    pub(crate) fn leaf(bounds: Bounds3, first_primitive: u32, primitive_count: u32) -> Self {
        debug_assert!(primitive_count > 0);

        Self {
            bounds,
            kind: LinearNodeKind::Leaf {
                first_primitive,
                primitive_count,
            },
        }
    }

    pub(crate) fn interior(bounds: Bounds3, axis: Axis) -> Self {
        Self {
            bounds,
            kind: LinearNodeKind::Interior {
                axis,
                right_child: 0,
            },
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, LinearNodeKind::Leaf { .. })
    }

    /// Range of the reordered primitive list covered by a leaf.
    pub fn primitive_range(&self) -> Option<std::ops::Range<usize>> {
        match self.kind {
            LinearNodeKind::Leaf {
                first_primitive,
                primitive_count,
            } => {
                let start = first_primitive as usize;
                Some(start..start + primitive_count as usize)
            }
            LinearNodeKind::Interior { .. } => None,
        }
    }
}

impl Default for LinearNode {
    fn default() -> Self {
        Self::interior(Bounds3::empty(), Axis::X)
    }
}
