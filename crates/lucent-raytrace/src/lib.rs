#![warn(missing_docs)]

//! Bounding volume hierarchy acceleration for the lucent ray tracer.
//!
//! Anything that can be bounded and hit by a ray implements [`Primitive`].
//! A [`Bvh`] is built once over a list of borrowed primitives and then
//! answers closest-hit and any-hit queries in roughly logarithmic time. A
//! built `Bvh` is immutable and is itself a `Primitive`, so it can be shared
//! across threads and nested inside another hierarchy.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray with a shrinking far bound and the slab test
//! - [`RayHit`] - Closest-hit record
//! - [`Primitive`] - Capability shared by geometry and aggregates
//! - [`shape`] - Reference shapes, adapted by [`GeometricPrimitive`]
//! - [`bvh`] - Construction, flattening and traversal
//! - [`settings`] - Build parameters, loadable from TOML
//!
//! # Example
//!
//! ```ignore
//! use lucent_math::{Point3, Vec3};
//! use lucent_raytrace::{Bvh, Cuboid, GeometricPrimitive, Primitive, Ray, RayHit};
//!
//! let cubes: Vec<_> = [-10.0, 0.0, 10.0]
//!     .iter()
//!     .map(|&x| GeometricPrimitive::new(Cuboid::centered(
//!         Point3::new(x, 0.0, 0.0),
//!         Vec3::new(1.0, 1.0, 1.0),
//!     )))
//!     .collect();
//!
//! let prims = cubes.iter().map(|c| c as &dyn Primitive).collect();
//! let bvh = Bvh::new(prims, 4)?;
//!
//! let mut ray = Ray::new(Point3::new(0.1, -5.0, 0.0), Vec3::y());
//! let mut hit = RayHit::default();
//! if bvh.intersect(&mut ray, &mut hit) {
//!     println!("hit at t = {}", hit.t);
//! }
//! ```

mod primitive;
mod ray;

pub mod bvh;
pub mod error;
pub mod settings;
pub mod shape;

pub use bvh::{Bvh, BvhStats, LinearNode, LinearNodeKind, TRAVERSAL_STACK_SIZE};
pub use error::{BvhError, Result};
pub use primitive::{GeometricPrimitive, Primitive};
pub use ray::{Ray, RayHit};
pub use settings::{BvhSettings, SplitMethod};
pub use shape::{Cuboid, Shape, ShapeHit, Sphere, Triangle};
