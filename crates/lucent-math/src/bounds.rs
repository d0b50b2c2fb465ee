//! Axis-aligned bounding boxes.

use crate::{Axis, Point3, Vec3};

/// Axis-aligned bounding box in 3D.
///
/// [`Bounds3::empty`] is the neutral element of [`Bounds3::union`]: it has
/// `min = +inf` and `max = -inf`, so folding any sequence of boxes or points
/// into it yields exactly their bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Bounds3 {
    /// Create bounds spanning two arbitrary corners.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty (inverted) box suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Degenerate box containing a single point.
    pub fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Bounds of a set of points; empty if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bounds, p| bounds.union_point(&p))
    }

    /// Whether this box contains no points at all.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this box to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing this box and `p`.
    pub fn union_point(mut self, p: &Point3) -> Self {
        self.include_point(p);
        self
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Bounds3) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Vector from the minimum to the maximum corner.
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    pub fn centroid(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// One of the eight corners; bit 0 selects max x, bit 1 max y, bit 2 max z.
    pub fn corner(&self, index: usize) -> Point3 {
        debug_assert!(index < 8, "corner index out of range: {index}");

        Point3::new(
            if index & 1 != 0 { self.max.x } else { self.min.x },
            if index & 2 != 0 { self.max.y } else { self.min.y },
            if index & 4 != 0 { self.max.z } else { self.min.z },
        )
    }

    /// Total area of the six faces. Zero for empty boxes.
    pub fn surface_area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }

        let d = self.diagonal();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// Axis along which the box is widest. Ties favor the later axis.
    pub fn maximum_extent(&self) -> Axis {
        let d = self.diagonal();

        if d.x > d.y && d.x > d.z {
            Axis::X
        } else if d.y > d.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Fractional position of `p` inside the box, clamped to `[0, 1]` per axis.
    ///
    /// Axes along which the box has no extent report `0`.
    pub fn offset(&self, p: &Point3) -> Vec3 {
        let mut o = p - self.min;

        for axis in 0..3 {
            let extent = self.max[axis] - self.min[axis];

            o[axis] = if extent > 0.0 {
                (o[axis] / extent).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }

        o
    }

    /// Test whether `p` lies inside the box (boundary included).
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Test whether `other` lies entirely inside this box.
    pub fn contains_bounds(&self, other: &Bounds3) -> bool {
        other.is_empty() || (self.contains(&other.min) && self.contains(&other.max))
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Bounds3> for Bounds3 {
    fn from_iter<T: IntoIterator<Item = Bounds3>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |total, bounds| total.union(&bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> Bounds3 {
        Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_is_neutral_for_union() {
        let b = unit_cube();
        assert_eq!(Bounds3::empty().union(&b), b);
        assert_eq!(b.union(&Bounds3::empty()), b);
        assert!(Bounds3::empty().is_empty());
        assert!(Bounds3::default().is_empty());
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Bounds3::new(Point3::new(1.0, -1.0, 5.0), Point3::new(-1.0, 1.0, 2.0));
        assert_eq!(b.min, Point3::new(-1.0, -1.0, 2.0));
        assert_eq!(b.max, Point3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_union_point_and_box() {
        let b = unit_cube().union_point(&Point3::new(2.0, -1.0, 0.5));
        assert_eq!(b.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(b.max, Point3::new(2.0, 1.0, 1.0));

        let other = Bounds3::new(Point3::new(-3.0, 0.0, 0.0), Point3::new(-2.0, 0.0, 4.0));
        let u = b.union(&other);
        assert_eq!(u.min, Point3::new(-3.0, -1.0, 0.0));
        assert_eq!(u.max, Point3::new(2.0, 1.0, 4.0));
    }

    #[test]
    fn test_from_points_and_collect() {
        let b = Bounds3::from_points([
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-1.0, 0.0, 4.0),
        ]);
        assert_eq!(b.min, Point3::new(-1.0, 0.0, 3.0));
        assert_eq!(b.max, Point3::new(1.0, 2.0, 4.0));

        assert!(Bounds3::from_points(std::iter::empty()).is_empty());

        let collected: Bounds3 = [unit_cube(), Bounds3::from_point(Point3::new(3.0, 3.0, 3.0))]
            .into_iter()
            .collect();
        assert_eq!(collected.max, Point3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_surface_area() {
        assert_relative_eq!(unit_cube().surface_area(), 6.0);

        let slab = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 0.0));
        assert_relative_eq!(slab.surface_area(), 12.0);

        let point = Bounds3::from_point(Point3::new(1.0, 1.0, 1.0));
        assert_eq!(point.surface_area(), 0.0);
        assert_eq!(Bounds3::empty().surface_area(), 0.0);
    }

    #[test]
    fn test_maximum_extent() {
        let wide = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 1.0, 1.0));
        assert_eq!(wide.maximum_extent(), Axis::X);

        let tall = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 5.0, 1.0));
        assert_eq!(tall.maximum_extent(), Axis::Y);

        let deep = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 5.0));
        assert_eq!(deep.maximum_extent(), Axis::Z);
    }

    #[test]
    fn test_offset() {
        let b = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 8.0));
        let o = b.offset(&Point3::new(1.0, 1.0, 8.0));
        assert_relative_eq!(o.x, 0.5);
        assert_relative_eq!(o.y, 0.25);
        assert_relative_eq!(o.z, 1.0);

        // Outside points clamp to the box.
        let o = b.offset(&Point3::new(-5.0, 10.0, 4.0));
        assert_eq!(o.x, 0.0);
        assert_eq!(o.y, 1.0);
        assert_relative_eq!(o.z, 0.5);
    }

    #[test]
    fn test_offset_degenerate_axis() {
        let flat = Bounds3::new(Point3::new(0.0, 1.0, 0.0), Point3::new(2.0, 1.0, 2.0));
        let o = flat.offset(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(o.x, 0.5);
        assert_eq!(o.y, 0.0);
        assert!(o.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_corners_diagonal_centroid() {
        let b = Bounds3::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(b.corner(0), b.min);
        assert_eq!(b.corner(7), b.max);
        assert_eq!(b.corner(1), Point3::new(1.0, -2.0, -3.0));
        assert_eq!(b.corner(6), Point3::new(-1.0, 2.0, 3.0));
        assert_eq!(b.diagonal(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.centroid(), Point3::origin());
    }

    #[test]
    fn test_contains() {
        let b = unit_cube();
        assert!(b.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(b.contains(&Point3::new(1.0, 0.0, 1.0)));
        assert!(!b.contains(&Point3::new(1.5, 0.5, 0.5)));
        assert!(b.contains_bounds(&Bounds3::from_point(Point3::new(0.2, 0.2, 0.2))));
        assert!(b.contains_bounds(&Bounds3::empty()));
        assert!(!Bounds3::empty().contains(&Point3::origin()));
    }
}
