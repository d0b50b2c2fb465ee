//! Reference shapes with exact ray intersection.
//!
//! The acceleration structures only ever talk to geometry through the
//! [`Primitive`](crate::Primitive) capability; these shapes are the leaf
//! geometry a scene is usually made of, adapted into primitives with
//! [`GeometricPrimitive`](crate::GeometricPrimitive).

mod cuboid;
mod sphere;
mod triangle;

pub use cuboid::Cuboid;
pub use sphere::Sphere;
pub use triangle::Triangle;

use lucent_math::{Bounds3, Point3, Vec3};

use crate::Ray;

/// Result of a ray-shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Parameter along the ray.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Unit outward normal at the intersection.
    pub normal: Vec3,
}

/// Geometry that can be bounded and intersected by a ray.
///
/// Implementations report only the closest hit with `0 < t < ray.t_max`
/// and must not mutate shared state, since a built scene is queried from
/// many threads at once.
pub trait Shape: Send + Sync {
    /// World-space bounds of the shape.
    fn bounds(&self) -> Bounds3;

    /// Closest intersection inside the ray's valid interval.
    fn intersect(&self, ray: &Ray) -> Option<ShapeHit>;

    /// Whether any intersection exists inside the ray's valid interval.
    fn does_intersect(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

/// Whether `t` lies strictly inside the ray's valid interval.
#[inline]
pub(crate) fn in_range(ray: &Ray, t: f64) -> bool {
    t > 0.0 && t < ray.t_max
}
