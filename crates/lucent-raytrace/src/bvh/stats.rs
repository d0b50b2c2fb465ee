use serde::Serialize;

use super::build::TRAVERSAL_COST;
use super::node::{LinearNode, LinearNodeKind};

/// Shape and quality summary of a built [`Bvh`](crate::Bvh).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BvhStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Number of interior nodes.
    pub interior_count: usize,
    /// Depth of the deepest leaf; the root has depth 0.
    pub max_depth: usize,
    /// Largest number of primitives held by a single leaf.
    pub max_leaf_size: usize,
    /// Average number of primitives per leaf.
    pub mean_leaf_size: f64,
    /// Expected cost of a random ray under the surface area heuristic,
    /// relative to one primitive test.
    pub sah_cost: f64,
}

impl BvhStats {
    pub(crate) fn compute(nodes: &[LinearNode], max_depth: usize) -> Self {
        let Some(root) = nodes.first() else {
            return Self::default();
        };

        let root_area = root.bounds.surface_area();
        let weight = |node: &LinearNode| {
            if root_area > 0.0 {
                node.bounds.surface_area() / root_area
            } else {
                1.0
            }
        };

        let mut stats = Self {
            node_count: nodes.len(),
            max_depth,
            ..Default::default()
        };
        let mut primitive_total = 0;

        for node in nodes {
            match node.kind {
                LinearNodeKind::Leaf {
                    primitive_count, ..
                } => {
                    let count = primitive_count as usize;

                    stats.leaf_count += 1;
                    stats.max_leaf_size = stats.max_leaf_size.max(count);
                    stats.sah_cost += count as f64 * weight(node);
                    primitive_total += count;
                }
                LinearNodeKind::Interior { .. } => {
                    stats.interior_count += 1;
                    stats.sah_cost += TRAVERSAL_COST * weight(node);
                }
            }
        }

        stats.mean_leaf_size = primitive_total as f64 / stats.leaf_count as f64;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lucent_math::{Axis, Bounds3, Point3};

    fn cube(x: f64) -> Bounds3 {
        Bounds3::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, 1.0))
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(BvhStats::compute(&[], 0), BvhStats::default());
    }

    #[test]
    fn test_stats_single_leaf() {
        let nodes = [LinearNode::leaf(cube(0.0), 0, 3)];
        let stats = BvhStats::compute(&nodes, 0);

        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.interior_count, 0);
        assert_eq!(stats.max_leaf_size, 3);
        assert_relative_eq!(stats.mean_leaf_size, 3.0);
        assert_relative_eq!(stats.sah_cost, 3.0);
    }

    #[test]
    fn test_stats_weights_by_area() {
        let root_bounds = cube(0.0).union(&cube(2.0));
        let mut root = LinearNode::interior(root_bounds, Axis::X);
        if let LinearNodeKind::Interior { right_child, .. } = &mut root.kind {
            *right_child = 2;
        }
        let nodes = [
            root,
            LinearNode::leaf(cube(0.0), 0, 1),
            LinearNode::leaf(cube(2.0), 1, 2),
        ];

        let stats = BvhStats::compute(&nodes, 1);
        let ratio = cube(0.0).surface_area() / root_bounds.surface_area();

        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.interior_count, 1);
        assert_eq!(stats.max_depth, 1);
        assert_relative_eq!(stats.mean_leaf_size, 1.5);
        assert_relative_eq!(stats.sah_cost, TRAVERSAL_COST + 3.0 * ratio);
    }
}
