//! Ray-box intersection for solid axis-aligned boxes.

use lucent_math::{Bounds3, Point3, Vec3};

use super::{in_range, Shape, ShapeHit};
use crate::Ray;

/// A solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    /// Extent of the box.
    pub bounds: Bounds3,
}

impl Cuboid {
    /// Create a box spanning two corners.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            bounds: Bounds3::new(a, b),
        }
    }

    /// Create a box from its center and full edge lengths.
    pub fn centered(center: Point3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }
}

impl Shape for Cuboid {
    fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        let mut near_axis = None;
        let mut far_axis = None;

        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let (near, far) = if inv < 0.0 {
                (self.bounds.max[axis], self.bounds.min[axis])
            } else {
                (self.bounds.min[axis], self.bounds.max[axis])
            };

            // NaN (origin on a face plane, direction parallel to it) fails
            // both comparisons and leaves the interval unchanged.
            let t0 = (near - ray.origin[axis]) * inv;
            let t1 = (far - ray.origin[axis]) * inv;

            if t0 > t_near {
                t_near = t0;
                near_axis = Some(axis);
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = Some(axis);
            }
            if t_near > t_far {
                return None;
            }
        }

        // Entering faces face against the ray, exiting faces face along it.
        let (t, axis, facing) = if in_range(ray, t_near) {
            (t_near, near_axis?, -1.0)
        } else if in_range(ray, t_far) {
            (t_far, far_axis?, 1.0)
        } else {
            return None;
        };

        let mut normal = Vec3::zeros();
        normal[axis] = facing * ray.direction[axis].signum();

        Some(ShapeHit {
            t,
            point: ray.at(t),
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Cuboid {
        Cuboid::centered(Point3::origin(), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_ray_cuboid_front_face() {
        let ray = Ray::new(Point3::new(0.0, -5.0, 0.1), Vec3::new(0.0, 1.0, 0.0));
        let hit = unit_cube().intersect(&ray).unwrap();

        assert!((hit.t - 4.5).abs() < 1e-12);
        assert!((hit.point.y + 0.5).abs() < 1e-12);
        assert_eq!(hit.normal, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_ray_cuboid_negative_direction() {
        let ray = Ray::new(Point3::new(3.0, 0.2, 0.2), Vec3::new(-1.0, 0.0, 0.0));
        let hit = unit_cube().intersect(&ray).unwrap();

        assert!((hit.t - 2.5).abs() < 1e-12);
        assert_eq!(hit.normal, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_cuboid_from_inside() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 2.0));
        let hit = unit_cube().intersect(&ray).unwrap();

        assert!((hit.t - 0.25).abs() < 1e-12);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_cuboid_miss() {
        let ray = Ray::new(Point3::new(2.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(unit_cube().intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_cuboid_t_max() {
        let ray = Ray::new(Point3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).with_t_max(4.0);
        assert!(unit_cube().intersect(&ray).is_none());
        assert!(!unit_cube().does_intersect(&ray));
    }

    #[test]
    fn test_ray_cuboid_in_face_plane() {
        // Travelling along the bottom face with a negative-zero y direction.
        let ray = Ray::new(Point3::new(3.0, -0.5, 0.0), -Vec3::x());
        let hit = unit_cube().intersect(&ray).unwrap();
        assert!((hit.t - 2.5).abs() < 1e-12);

        let ray = Ray::new(Point3::new(0.5, -5.0, 0.0), Vec3::y());
        let hit = unit_cube().intersect(&ray).unwrap();
        assert!((hit.t - 4.5).abs() < 1e-12);

        let ray = Ray::new(Point3::new(0.5, -5.0, 0.6), Vec3::y());
        assert!(unit_cube().intersect(&ray).is_none());
    }

    #[test]
    fn test_centered_bounds() {
        let c = Cuboid::centered(Point3::new(10.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(c.bounds().min, Point3::new(9.0, -2.0, -3.0));
        assert_eq!(c.bounds().max, Point3::new(11.0, 2.0, 3.0));
    }
}
