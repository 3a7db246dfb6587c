//! Vector operations used by the shading code.
//!
//! These are thin wrappers over `DVec3` arithmetic. They exist so that the
//! renderer can use the conventions its formulas are written in, two of
//! which differ from glam's:
//!
//! - [`reflect`] returns `2(n·l)n - l`, the mirror image of `l` about `n`
//!   with `l` pointing *away* from the surface (glam has no `reflect`, and
//!   the common `v - 2(v·n)n` form is the negation of this one).
//! - [`subtract`] returns `b - a`, the vector from `a` to `b`.

use crate::DVec3;

/// Scale `v` to unit length.
///
/// Divides by the length without checking it; the zero vector produces
/// NaN components which propagate instead of panicking.
#[inline]
pub fn normalize(v: DVec3) -> DVec3 {
    v / length(v)
}

#[inline]
pub fn dot(a: DVec3, b: DVec3) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline]
pub fn cross(a: DVec3, b: DVec3) -> DVec3 {
    DVec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[inline]
pub fn length(v: DVec3) -> f64 {
    dot(v, v).sqrt()
}

/// Reflect `l` about the normal `n`: `2(n·l)n - l`.
///
/// With `l` pointing from the surface toward a light this yields the
/// outgoing mirror direction. Passing an *incoming* ray direction yields the
/// negated mirror direction, so callers tracing rays negate first.
#[inline]
pub fn reflect(n: DVec3, l: DVec3) -> DVec3 {
    scale(n, 2.0 * dot(n, l)) - l
}

/// The vector from `a` to `b`, i.e. `b - a`.
#[inline]
pub fn subtract(a: DVec3, b: DVec3) -> DVec3 {
    b - a
}

#[inline]
pub fn add(a: DVec3, b: DVec3) -> DVec3 {
    a + b
}

#[inline]
pub fn scale(v: DVec3, s: f64) -> DVec3 {
    v * s
}
