#![warn(missing_docs)]

//! Math types for the lucent ray tracer.
//!
//! Thin wrappers around nalgebra providing the handful of types the
//! acceleration structures need: points, vectors, coordinate axes,
//! axis-aligned bounds, and conservative floating-point rounding bounds.

mod bounds;

pub use bounds::Bounds3;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Machine epsilon halved, the unit roundoff for `f64`.
pub const MACHINE_EPSILON: f64 = f64::EPSILON * 0.5;

/// Upper bound on the relative error accumulated by `n` consecutive
/// floating-point operations.
#[inline]
pub fn gamma(n: u32) -> f64 {
    let n = n as f64;
    (n * MACHINE_EPSILON) / (1.0 - n * MACHINE_EPSILON)
}

/// One of the three coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Component index of this axis (0, 1 or 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}
