use crate::{vector, DVec3};

/// A ray in 3D space with an origin and a direction.
///
/// Camera, reflection, refraction and shadow rays all use this type. The
/// intersection routines assume a unit direction; use [`Ray::normalized`]
/// when building one from an arbitrary vector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// The same ray with its direction scaled to unit length.
    ///
    /// A zero direction yields non-finite components rather than a panic;
    /// such a ray hits nothing.
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            origin: self.origin,
            direction: vector::normalize(self.direction),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
