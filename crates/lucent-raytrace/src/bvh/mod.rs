//! Bounding volume hierarchy over borrowed primitives.
//!
//! Construction partitions the primitives top-down (by SAH by default),
//! then flattens the tree into a depth-first array so traversal is a tight
//! loop over a fixed-size stack with no allocation.

mod build;
mod flatten;
mod node;
mod stats;

pub use node::{LinearNode, LinearNodeKind};
pub use stats::BvhStats;

use std::fmt;
use std::ops::Range;

use lucent_math::Bounds3;

use crate::error::{BvhError, Result};
use crate::settings::{BvhSettings, SplitMethod};
use crate::{Primitive, Ray, RayHit};

/// Capacity of the traversal stack, and so the deepest tree that can be built.
///
/// Balanced trees stay far below this, but strongly clustered inputs (for
/// example centroids spaced geometrically along one axis) can exceed it, in
/// which case the build fails with [`BvhError::TreeTooDeep`].
pub const TRAVERSAL_STACK_SIZE: usize = 64;

/// Bounding volume hierarchy for accelerated ray-primitive intersection.
///
/// Holds references to the primitives it was built over, reordered so each
/// leaf covers a contiguous run. A `Bvh` is itself a [`Primitive`], so
/// hierarchies can be nested.
pub struct Bvh<'a> {
    primitives: Vec<&'a dyn Primitive>,
    primitive_indices: Box<[u32]>,
    nodes: Box<[LinearNode]>,
    bounds: Bounds3,
    split_method: SplitMethod,
    max_depth: usize,
}

impl<'a> Bvh<'a> {
    /// Build a hierarchy with SAH splits and at most `leaf_max_size`
    /// primitives per leaf.
    ///
    /// Fails with [`BvhError::TreeTooDeep`] when the primitive distribution
    /// is lopsided enough to produce a tree deeper than
    /// [`TRAVERSAL_STACK_SIZE`]; a larger `leaf_max_size` or
    /// [`SplitMethod::EqualCounts`] bounds the depth.
    pub fn new(primitives: Vec<&'a dyn Primitive>, leaf_max_size: u16) -> Result<Self> {
        Self::with_settings(primitives, &BvhSettings::with_leaf_max_size(leaf_max_size))
    }

    /// Build a hierarchy with explicit settings.
    ///
    /// See [`Bvh::new`] for the depth limit.
    pub fn with_settings(primitives: Vec<&'a dyn Primitive>, settings: &BvhSettings) -> Result<Self> {
        settings.validate()?;

        if primitives.len() > u32::MAX as usize {
            return Err(BvhError::TooManyPrimitives {
                count: primitives.len(),
            });
        }

        if primitives.is_empty() {
            if !settings.allow_empty {
                return Err(BvhError::EmptyScene);
            }

            log::warn!("building BVH over an empty primitive list");
            return Ok(Self::empty(settings.split_method));
        }

        let bounds: Bounds3 = primitives.iter().map(|p| p.world_bounds()).collect();
        let output = build::build(&primitives, settings);

        if output.max_depth > TRAVERSAL_STACK_SIZE {
            return Err(BvhError::TreeTooDeep {
                depth: output.max_depth,
                limit: TRAVERSAL_STACK_SIZE,
            });
        }

        let nodes = flatten::flatten(&output.nodes, output.root);
        let ordered: Vec<_> = output
            .ordered
            .iter()
            .map(|&index| primitives[index as usize])
            .collect();

        log::debug!(
            "built BVH over {} primitives: {} nodes, max depth {}, {:?} splits",
            ordered.len(),
            nodes.len(),
            output.max_depth,
            settings.split_method,
        );

        Ok(Self {
            primitives: ordered,
            primitive_indices: output.ordered.into_boxed_slice(),
            nodes,
            bounds,
            split_method: settings.split_method,
            max_depth: output.max_depth,
        })
    }

    fn empty(split_method: SplitMethod) -> Self {
        Self {
            primitives: Vec::new(),
            primitive_indices: Box::default(),
            nodes: Box::default(),
            bounds: Bounds3::empty(),
            split_method,
            max_depth: 0,
        }
    }

    /// Whether the hierarchy holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Flattened nodes in depth-first order; the root is at index 0.
    pub fn nodes(&self) -> &[LinearNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Primitives in leaf order.
    pub fn primitives(&self) -> &[&'a dyn Primitive] {
        &self.primitives
    }

    /// For each slot of [`Bvh::primitives`], the index the primitive had in
    /// the list the hierarchy was built from.
    pub fn primitive_indices(&self) -> &[u32] {
        &self.primitive_indices
    }

    /// Primitive ranges covered by each leaf, in depth-first order.
    pub fn leaf_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.nodes.iter().filter_map(LinearNode::primitive_range)
    }

    /// Depth of the deepest leaf.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Split method the hierarchy was built with.
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Summary of the tree shape.
    pub fn stats(&self) -> BvhStats {
        BvhStats::compute(&self.nodes, self.max_depth)
    }
}

impl fmt::Debug for Bvh<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bvh")
            .field("primitives", &self.primitives.len())
            .field("nodes", &self.nodes.len())
            .field("bounds", &self.bounds)
            .field("split_method", &self.split_method)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Primitive for Bvh<'_> {
    fn world_bounds(&self) -> Bounds3 {
        self.bounds
    }

    fn intersect(&self, ray: &mut Ray, hit: &mut RayHit) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let (inv_dir, dir_is_neg) = ray.inverse_direction();
        let mut stack = TraversalStack::default();
        let mut current = 0;
        let mut found = false;

        loop {
            let node = &self.nodes[current];

            if ray.hits_bounds(&node.bounds, &inv_dir, dir_is_neg) {
                match node.kind {
                    LinearNodeKind::Leaf {
                        first_primitive,
                        primitive_count,
                    } => {
                        let start = first_primitive as usize;
                        let end = start + primitive_count as usize;

                        // Every primitive is tested; each hit lowers `t_max`.
                        for primitive in &self.primitives[start..end] {
                            found |= primitive.intersect(ray, hit);
                        }
                    }

                    LinearNodeKind::Interior { axis, right_child } => {
                        if dir_is_neg[axis.index()] {
                            stack.push(current + 1);
                            current = right_child;
                        } else {
                            stack.push(right_child);
                            current += 1;
                        }
                        continue;
                    }
                }
            }

            match stack.pop() {
                Some(next) => current = next,
                None => break,
            }
        }

        found
    }

    fn does_intersect(&self, ray: &Ray) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let (inv_dir, dir_is_neg) = ray.inverse_direction();
        let mut stack = TraversalStack::default();
        let mut current = 0;

        loop {
            let node = &self.nodes[current];

            if ray.hits_bounds(&node.bounds, &inv_dir, dir_is_neg) {
                match node.kind {
                    LinearNodeKind::Leaf {
                        first_primitive,
                        primitive_count,
                    } => {
                        let start = first_primitive as usize;
                        let end = start + primitive_count as usize;

                        if self.primitives[start..end].iter().any(|p| p.does_intersect(ray)) {
                            return true;
                        }
                    }

                    LinearNodeKind::Interior { axis, right_child } => {
                        if dir_is_neg[axis.index()] {
                            stack.push(current + 1);
                            current = right_child;
                        } else {
                            stack.push(right_child);
                            current += 1;
                        }
                        continue;
                    }
                }
            }

            match stack.pop() {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}

/// Nodes still to visit during one traversal.
struct TraversalStack {
    entries: [usize; TRAVERSAL_STACK_SIZE],
    len: usize,
}

impl Default for TraversalStack {
    fn default() -> Self {
        Self {
            entries: [0; TRAVERSAL_STACK_SIZE],
            len: 0,
        }
    }
}

impl TraversalStack {
    fn push(&mut self, node: usize) {
        assert!(
            self.len < TRAVERSAL_STACK_SIZE,
            "BVH traversal stack overflow"
        );

        self.entries[self.len] = node;
        self.len += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        self.len = self.len.checked_sub(1)?;
        Some(self.entries[self.len])
    }
}
