//! Ray-triangle intersection (Möller-Trumbore).

use lucent_math::{Bounds3, Point3};

use super::{in_range, Shape, ShapeHit};
use crate::Ray;

/// A single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions, counter-clockwise when seen from the front.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

impl Shape for Triangle {
    fn bounds(&self) -> Bounds3 {
        Bounds3::from_points(self.vertices)
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to the triangle plane, or a degenerate triangle.
        if a.abs() < 1e-12 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if !in_range(ray, t) {
            return None;
        }

        let normal = edge1.cross(&edge2).normalize();

        Some(ShapeHit {
            t,
            point: ray.at(t),
            normal,
        })
    }
}
