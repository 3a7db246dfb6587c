//! Ray/primitive intersection.
//!
//! Both tests return the distance along the ray to the accepted hit, or
//! `None`. A root is accepted only if it lies strictly inside `ray_t`; callers
//! pass `(epsilon, limit)` so hits at the ray's own origin are ignored.

use prism_math::{vector, DVec3, Interval};

/// Intersect a ray with a sphere.
///
/// Solves `a t^2 + b t + c = 0` and returns the nearer root if it is in range,
/// otherwise the farther one. A ray starting inside the sphere therefore
/// reports the exit point.
pub fn sphere_intersection(
    origin: DVec3,
    direction: DVec3,
    center: DVec3,
    radius: f64,
    ray_t: Interval,
) -> Option<f64> {
    let oc = origin - center;
    let a = vector::dot(direction, direction);
    let b = 2.0 * vector::dot(direction, oc);
    let c = vector::dot(oc, oc) - radius * radius;

    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    if ray_t.surrounds(near) {
        return Some(near);
    }

    let far = (-b + sqrtd) / (2.0 * a);
    ray_t.surrounds(far).then_some(far)
}

/// Intersect a ray with the infinite plane through `point` with `normal`.
///
/// The normal need not be unit length. A ray parallel to the plane never
/// hits, including one lying in it.
pub fn plane_intersection(
    origin: DVec3,
    direction: DVec3,
    point: DVec3,
    normal: DVec3,
    ray_t: Interval,
) -> Option<f64> {
    let normal = vector::normalize(normal);
    let denominator = vector::dot(normal, direction);
    if denominator == 0.0 {
        return None;
    }

    let t = (vector::dot(normal, point) - vector::dot(normal, origin)) / denominator;
    // NaN (from a degenerate normal) is never surrounded
    ray_t.surrounds(t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-5;

    fn forward() -> Interval {
        Interval::new(EPSILON, f64::INFINITY)
    }

    #[test]
    fn test_sphere_head_on() {
        let center = DVec3::new(0.0, 0.0, 5.0);
        let t = sphere_intersection(DVec3::ZERO, DVec3::Z, center, 1.0, forward()).unwrap();

        // |Ro - C| - r
        assert!((t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let center = DVec3::new(1.5, 0.0, 5.0);
        assert_eq!(
            sphere_intersection(DVec3::ZERO, DVec3::Z, center, 1.0, forward()),
            None
        );
    }

    #[test]
    fn test_sphere_from_inside_returns_exit() {
        let center = DVec3::new(0.0, 0.0, 0.5);
        let t = sphere_intersection(DVec3::ZERO, DVec3::Z, center, 2.0, forward()).unwrap();

        assert!(t > 0.0);
        assert!((t - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_behind_origin() {
        let center = DVec3::new(0.0, 0.0, -5.0);
        assert_eq!(
            sphere_intersection(DVec3::ZERO, DVec3::Z, center, 1.0, forward()),
            None
        );
    }

    #[test]
    fn test_sphere_ignores_own_surface() {
        // Origin on the surface, heading outward
        let center = DVec3::new(0.0, 0.0, -1.0);
        assert_eq!(
            sphere_intersection(DVec3::ZERO, DVec3::Z, center, 1.0, forward()),
            None
        );

        // Origin on the surface, heading inward: far side
        let t = sphere_intersection(DVec3::ZERO, -DVec3::Z, center, 1.0, forward()).unwrap();
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_respects_upper_bound() {
        let center = DVec3::new(0.0, 0.0, 5.0);
        let short = Interval::new(EPSILON, 3.0);
        assert_eq!(
            sphere_intersection(DVec3::ZERO, DVec3::Z, center, 1.0, short),
            None
        );
    }

    #[test]
    fn test_sphere_zero_direction() {
        let center = DVec3::new(0.0, 0.0, 5.0);
        assert_eq!(
            sphere_intersection(DVec3::ZERO, DVec3::ZERO, center, 1.0, forward()),
            None
        );
    }

    #[test]
    fn test_plane_normal_incidence() {
        let point = DVec3::new(0.0, 0.0, 3.0);
        let t = plane_intersection(DVec3::ZERO, DVec3::Z, point, -DVec3::Z, forward()).unwrap();
        assert!((t - 3.0).abs() < 1e-9);

        // Normal orientation and length do not matter
        let t = plane_intersection(DVec3::ZERO, DVec3::Z, point, DVec3::Z * 7.0, forward()).unwrap();
        assert!((t - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_plane_parallel_ray() {
        let point = DVec3::new(0.0, -1.0, 0.0);
        assert_eq!(
            plane_intersection(DVec3::ZERO, DVec3::X, point, DVec3::Y, forward()),
            None
        );

        // Lying in the plane
        assert_eq!(
            plane_intersection(point, DVec3::X, point, DVec3::Y, forward()),
            None
        );
    }

    #[test]
    fn test_plane_behind_and_at_origin() {
        let point = DVec3::new(0.0, 0.0, -2.0);
        assert_eq!(
            plane_intersection(DVec3::ZERO, DVec3::Z, point, DVec3::Z, forward()),
            None
        );

        // Origin on the plane: rejected by the epsilon
        assert_eq!(
            plane_intersection(DVec3::ZERO, DVec3::Z, DVec3::ZERO, DVec3::Z, forward()),
            None
        );
    }
}
