//! Top-down hierarchy construction.
//!
//! Builds a temporary binary tree in an index arena by recursively
//! partitioning a mutable array of primitive descriptors. Leaves append
//! their primitives' input indices to `ordered`, which becomes the order of
//! the final primitive list so that every leaf covers a contiguous run.
//!
//! Thanks to:
//! - https://pbr-book.org/3ed-2018/Primitives_and_Intersection_Acceleration/Bounding_Volume_Hierarchies,
//! - https://jacco.ompf2.com/2022/04/13/how-to-build-a-bvh-part-1-basics/.

use std::ops;

use lucent_math::{Axis, Bounds3, Point3};

use super::TRAVERSAL_STACK_SIZE;
use crate::settings::{BvhSettings, SplitMethod};
use crate::Primitive;

/// Number of buckets the centroid range is divided into when evaluating
/// SAH split candidates.
const BUCKETS: usize = 12;

/// Cost of visiting an interior node relative to one primitive test.
pub(crate) const TRAVERSAL_COST: f64 = 0.125;

/// Per-primitive data the builder partitions; discarded after the build.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PrimitiveDescriptor {
    pub index: u32,
    pub bounds: Bounds3,
    pub centroid: Point3,
}

impl PrimitiveDescriptor {
    fn new(index: u32, bounds: Bounds3) -> Self {
        Self {
            index,
            bounds,
            centroid: bounds.centroid(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BuildNodeId(usize);

#[derive(Clone, Copy, Debug)]
pub(crate) enum BuildNode {
    Leaf {
        bounds: Bounds3,
        first_primitive: u32,
        primitive_count: u32,
    },

    Interior {
        bounds: Bounds3,
        axis: Axis,
        children: [BuildNodeId; 2],
    },
}

impl BuildNode {
    pub fn bounds(&self) -> Bounds3 {
        match self {
            BuildNode::Leaf { bounds, .. } => *bounds,
            BuildNode::Interior { bounds, .. } => *bounds,
        }
    }
}

/// Arena holding every node created during one build.
#[derive(Debug, Default)]
pub(crate) struct BuildNodes {
    nodes: Vec<BuildNode>,
}

impl BuildNodes {
    pub fn add(&mut self, node: BuildNode) -> BuildNodeId {
        self.nodes.push(node);

        BuildNodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl ops::Index<BuildNodeId> for BuildNodes {
    type Output = BuildNode;

    fn index(&self, id: BuildNodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Result of a build: the arena, its root, and the leaf order of the
/// input primitives.
#[derive(Debug)]
pub(crate) struct BuildOutput {
    pub nodes: BuildNodes,
    pub root: BuildNodeId,
    pub ordered: Vec<u32>,
    pub max_depth: usize,
}

/// Build a hierarchy over a non-empty primitive list.
pub(crate) fn build(primitives: &[&dyn Primitive], settings: &BvhSettings) -> BuildOutput {
    assert!(!primitives.is_empty(), "cannot build over zero primitives");
    assert!(primitives.len() <= u32::MAX as usize);

    let mut descriptors: Vec<_> = primitives
        .iter()
        .enumerate()
        .map(|(index, primitive)| PrimitiveDescriptor::new(index as u32, primitive.world_bounds()))
        .collect();

    let mut builder = Builder {
        leaf_max_size: usize::from(settings.leaf_max_size.max(1)),
        split_method: settings.split_method,
        nodes: BuildNodes::default(),
        ordered: Vec::with_capacity(primitives.len()),
        max_depth: 0,
    };

    let len = descriptors.len();
    let root = builder.build_recursive(&mut descriptors, 0, len, 0);

    BuildOutput {
        nodes: builder.nodes,
        root,
        ordered: builder.ordered,
        max_depth: builder.max_depth,
    }
}

struct Builder {
    leaf_max_size: usize,
    split_method: SplitMethod,
    nodes: BuildNodes,
    ordered: Vec<u32>,
    max_depth: usize,
}

impl Builder {
    fn build_recursive(
        &mut self,
        descriptors: &mut [PrimitiveDescriptor],
        first: usize,
        last: usize,
        depth: usize,
    ) -> BuildNodeId {
        assert!(first < last, "empty build range {first}..{last}");

        let range = &mut descriptors[first..last];
        let bounds: Bounds3 = range.iter().map(|d| d.bounds).collect();
        let count = range.len();

        // Past this depth the tree is rejected anyway; stop descending.
        if count <= self.leaf_max_size || depth > TRAVERSAL_STACK_SIZE {
            return self.make_leaf(range, bounds, depth);
        }

        let centroid_bounds = Bounds3::from_points(range.iter().map(|d| d.centroid));
        let axis = centroid_bounds.maximum_extent();

        if centroid_bounds.max[axis.index()] == centroid_bounds.min[axis.index()] {
            log::trace!("forcing leaf over {count} primitives with coincident centroids");
            return self.make_leaf(range, bounds, depth);
        }

        let mid = match self.split_method {
            SplitMethod::Sah => {
                match split_sah(range, &bounds, &centroid_bounds, axis, self.leaf_max_size) {
                    Some(mid) => mid,
                    None => return self.make_leaf(range, bounds, depth),
                }
            }
            SplitMethod::Middle => split_middle(range, &centroid_bounds, axis),
            SplitMethod::EqualCounts => split_equal_counts(range, axis),
        };

        let mid = if (1..count).contains(&mid) {
            mid
        } else {
            split_equal_counts(range, axis)
        };

        let left = self.build_recursive(descriptors, first, first + mid, depth + 1);
        let right = self.build_recursive(descriptors, first + mid, last, depth + 1);

        self.nodes.add(BuildNode::Interior {
            bounds: self.nodes[left].bounds().union(&self.nodes[right].bounds()),
            axis,
            children: [left, right],
        })
    }

    fn make_leaf(
        &mut self,
        range: &[PrimitiveDescriptor],
        bounds: Bounds3,
        depth: usize,
    ) -> BuildNodeId {
        let first_primitive = self.ordered.len() as u32;

        self.ordered.extend(range.iter().map(|d| d.index));
        self.max_depth = self.max_depth.max(depth);

        self.nodes.add(BuildNode::Leaf {
            bounds,
            first_primitive,
            primitive_count: range.len() as u32,
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct SahBucket {
    count: usize,
    bounds: Bounds3,
}

impl Default for SahBucket {
    fn default() -> Self {
        Self {
            count: 0,
            bounds: Bounds3::empty(),
        }
    }
}

/// Bucket a centroid falls into along `axis`.
fn bucket_index(centroid_bounds: &Bounds3, axis: Axis, centroid: &Point3) -> usize {
    let offset = centroid_bounds.offset(centroid)[axis.index()];
    ((BUCKETS as f64 * offset) as usize).min(BUCKETS - 1)
}

/// Partition by the cheapest of the `BUCKETS - 1` bucket boundaries.
///
/// Returns `None` when a leaf over the whole range is cheaper than any split
/// and the range is small enough to be a leaf.
fn split_sah(
    range: &mut [PrimitiveDescriptor],
    bounds: &Bounds3,
    centroid_bounds: &Bounds3,
    axis: Axis,
    leaf_max_size: usize,
) -> Option<usize> {
    let mut buckets = [SahBucket::default(); BUCKETS];

    for d in range.iter() {
        let bucket = &mut buckets[bucket_index(centroid_bounds, axis, &d.centroid)];
        bucket.count += 1;
        bucket.bounds = bucket.bounds.union(&d.bounds);
    }

    // Split `i` puts buckets `0..=i` on the left and `i+1..` on the right.
    let mut costs = [0.0; BUCKETS - 1];

    let mut count_below = 0;
    let mut bounds_below = Bounds3::empty();
    for i in 0..(BUCKETS - 1) {
        count_below += buckets[i].count;
        bounds_below = bounds_below.union(&buckets[i].bounds);
        costs[i] += count_below as f64 * bounds_below.surface_area();
    }

    let mut count_above = 0;
    let mut bounds_above = Bounds3::empty();
    for i in (1..BUCKETS).rev() {
        count_above += buckets[i].count;
        bounds_above = bounds_above.union(&buckets[i].bounds);
        costs[i - 1] += count_above as f64 * bounds_above.surface_area();
    }

    let total_area = bounds.surface_area();
    let (best_split, best_cost) = costs
        .iter()
        .map(|&cost| {
            if total_area > 0.0 {
                TRAVERSAL_COST + cost / total_area
            } else {
                TRAVERSAL_COST
            }
        })
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))?;

    let leaf_cost = range.len() as f64;

    if range.len() > leaf_max_size || best_cost < leaf_cost {
        Some(partition(range, |d| {
            bucket_index(centroid_bounds, axis, &d.centroid) <= best_split
        }))
    } else {
        None
    }
}

/// Partition around the midpoint of the centroid range.
fn split_middle(range: &mut [PrimitiveDescriptor], centroid_bounds: &Bounds3, axis: Axis) -> usize {
    let a = axis.index();
    let midpoint = (centroid_bounds.min[a] + centroid_bounds.max[a]) * 0.5;

    partition(range, |d| d.centroid[a] < midpoint)
}

/// Partition into two equally sized halves by centroid order.
fn split_equal_counts(range: &mut [PrimitiveDescriptor], axis: Axis) -> usize {
    let a = axis.index();
    let mid = range.len() / 2;

    range.select_nth_unstable_by(mid, |x, y| x.centroid[a].total_cmp(&y.centroid[a]));
    mid
}

/// Reorder `items` so every element matching `pred` precedes every element
/// that doesn't; returns the number of matching elements.
fn partition<T>(items: &mut [T], mut pred: impl FnMut(&T) -> bool) -> usize {
    let mut left = 0;
    let mut right = items.len();

    while left < right {
        if pred(&items[left]) {
            left += 1;
        } else {
            right -= 1;
            items.swap(left, right);
        }
    }

    left
}
