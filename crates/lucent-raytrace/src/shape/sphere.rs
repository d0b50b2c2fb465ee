//! Ray-sphere intersection (quadratic equation).

use lucent_math::{Bounds3, Point3, Vec3};

use super::{in_range, Shape, ShapeHit};
use crate::Ray;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Shape for Sphere {
    fn bounds(&self) -> Bounds3 {
        let r = Vec3::repeat(self.radius.abs());
        Bounds3::new(self.center - r, self.center + r)
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeHit> {
        let oc = ray.origin - self.center;
        let d = &ray.direction;

        // Quadratic: |oc + t*d|^2 = r^2
        let a = d.dot(d);
        let b = 2.0 * oc.dot(d);
        let c = oc.dot(&oc) - self.radius * self.radius;

        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();

        // Numerically stable root pair.
        let q = if b < 0.0 {
            -0.5 * (b - sqrt_disc)
        } else {
            -0.5 * (b + sqrt_disc)
        };

        let (mut t0, mut t1) = if q == 0.0 {
            // b == 0 and c == 0: ray grazes at its origin.
            (0.0, 0.0)
        } else {
            (q / a, c / q)
        };

        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        let t = [t0, t1].into_iter().find(|&t| in_range(ray, t))?;
        let point = ray.at(t);
        let normal = (point - self.center) / self.radius;

        Some(ShapeHit { t, point, normal })
    }
}
