//! The primitive capability shared by leaf geometry and aggregates.

use lucent_math::Bounds3;

use crate::shape::Shape;
use crate::{Ray, RayHit};

/// Anything a ray can be traced against.
///
/// Implemented by [`GeometricPrimitive`] for single shapes and by
/// [`Bvh`](crate::Bvh) for whole collections, so an acceleration structure
/// can itself be a primitive of a parent structure.
pub trait Primitive: Send + Sync {
    /// World-space bounds of everything this primitive can hit.
    fn world_bounds(&self) -> Bounds3;

    /// Find the closest hit with `0 < t < ray.t_max`.
    ///
    /// On success `ray.t_max` is lowered to the hit distance, `hit` is
    /// overwritten and `true` is returned. On a miss neither is touched.
    fn intersect(&self, ray: &mut Ray, hit: &mut RayHit) -> bool;

    /// Whether any hit with `0 < t < ray.t_max` exists.
    fn does_intersect(&self, ray: &Ray) -> bool;
}

/// Adapts a [`Shape`] into a [`Primitive`].
#[derive(Debug, Clone)]
pub struct GeometricPrimitive<S> {
    shape: S,
    id: Option<u32>,
}

impl<S: Shape> GeometricPrimitive<S> {
    /// Wrap a shape without an id.
    pub fn new(shape: S) -> Self {
        Self { shape, id: None }
    }

    /// Wrap a shape, tagging its hits with `id`.
    pub fn with_id(shape: S, id: u32) -> Self {
        Self {
            shape,
            id: Some(id),
        }
    }

    /// The wrapped shape.
    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// Id reported in [`RayHit::primitive`].
    pub fn id(&self) -> Option<u32> {
        self.id
    }
}

impl<S: Shape> Primitive for GeometricPrimitive<S> {
    fn world_bounds(&self) -> Bounds3 {
        self.shape.bounds()
    }

    fn intersect(&self, ray: &mut Ray, hit: &mut RayHit) -> bool {
        let Some(shape_hit) = self.shape.intersect(ray) else {
            return false;
        };

        ray.t_max = shape_hit.t;
        *hit = RayHit::new(shape_hit.t, shape_hit.point, shape_hit.normal, self.id);
        true
    }

    fn does_intersect(&self, ray: &Ray) -> bool {
        self.shape.does_intersect(ray)
    }
}
