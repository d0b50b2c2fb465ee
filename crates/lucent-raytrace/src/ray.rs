//! Ray representation and the ray-box slab test.

use lucent_math::{gamma, Bounds3, Point3, Vec3};

/// A ray in 3D space with a mutable far bound.
///
/// `t_max` shrinks as closer hits are found, so later box and primitive
/// tests reject anything behind the current closest hit.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray; not required to be normalized.
    pub direction: Vec3,
    /// Far end of the valid parametric interval `(0, t_max)`.
    pub t_max: f64,
    /// Time at which the ray is cast.
    pub time: f64,
}

impl Ray {
    /// Create an unbounded ray cast at time zero.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_max: f64::INFINITY,
            time: 0.0,
        }
    }

    /// Same ray with a different far bound.
    pub fn with_t_max(mut self, t_max: f64) -> Self {
        self.t_max = t_max;
        self
    }

    /// Same ray cast at a different time.
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Componentwise reciprocal of the direction and per-axis negativity.
    ///
    /// Computed once per traversal and handed to [`Ray::hits_bounds`].
    #[inline]
    pub fn inverse_direction(&self) -> (Vec3, [bool; 3]) {
        let inv = Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        );
        let is_neg = [inv.x < 0.0, inv.y < 0.0, inv.z < 0.0];

        (inv, is_neg)
    }

    /// Test the ray against a box using the slab method.
    ///
    /// `inv_dir` and `dir_is_neg` come from [`Ray::inverse_direction`]. The
    /// current `t_max` is the far bound, so boxes entirely behind an already
    /// found hit are rejected. Far slab distances are widened by `2 * gamma(3)`
    /// so rounding never culls a box the ray actually grazes.
    ///
    /// A ray parallel to an axis whose origin lies on one of that axis' box
    /// planes yields `0 * inf = NaN` for the slab; `f64::max`/`f64::min`
    /// ignore NaN, so such a slab does not limit the interval.
    #[inline]
    pub fn hits_bounds(&self, bounds: &Bounds3, inv_dir: &Vec3, dir_is_neg: [bool; 3]) -> bool {
        let widen = 1.0 + 2.0 * gamma(3);
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let (near, far) = if dir_is_neg[axis] {
                (bounds.max[axis], bounds.min[axis])
            } else {
                (bounds.min[axis], bounds.max[axis])
            };

            let t_near = (near - self.origin[axis]) * inv_dir[axis];
            let t_far = (far - self.origin[axis]) * inv_dir[axis] * widen;

            t_min = t_min.max(t_near);
            t_max = t_max.min(t_far);

            if t_min > t_max {
                return false;
            }
        }

        t_min < self.t_max && t_max > 0.0
    }
}

/// Closest-hit record filled in by the primitive that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray where the intersection occurs.
    pub t: f64,
    /// 3D intersection point.
    pub point: Point3,
    /// Geometric surface normal at the intersection (unit length, outward).
    pub normal: Vec3,
    /// Caller-assigned id of the primitive that was hit, if any.
    pub primitive: Option<u32>,
}

impl RayHit {
    /// Create a ray hit.
    pub fn new(t: f64, point: Point3, normal: Vec3, primitive: Option<u32>) -> Self {
        Self {
            t,
            point,
            normal,
            primitive,
        }
    }
}

impl Default for RayHit {
    fn default() -> Self {
        Self {
            t: f64::INFINITY,
            point: Point3::origin(),
            normal: Vec3::zeros(),
            primitive: None,
        }
    }
}
