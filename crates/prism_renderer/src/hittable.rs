//! Hittable trait, HitRecord and the nearest-hit caster.

use prism_core::{Shape, Surface};
use prism_math::{vector, DVec3, Interval, Ray};

use crate::intersect::{plane_intersection, sphere_intersection};

/// Record of the nearest ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// The surface that was hit
    pub surface: &'a Surface,
    /// Position of `surface` in the scene's surface list
    pub index: usize,
    /// Distance along the (unit) ray direction
    pub t: f64,
    /// Point of intersection
    pub point: DVec3,
}

/// Something a ray can hit.
pub trait Hittable: Send + Sync {
    /// Distance to the accepted intersection strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;
}

impl Hittable for Surface {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        match self.shape {
            Shape::Sphere { radius } => {
                sphere_intersection(ray.origin, ray.direction, self.position, radius, ray_t)
            }
            Shape::Plane { normal } => {
                plane_intersection(ray.origin, ray.direction, self.position, normal, ray_t)
            }
        }
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        match self.shape {
            Shape::Sphere { .. } => vector::normalize(point - self.position),
            Shape::Plane { normal } => normal,
        }
    }
}

/// Cast a ray and return the nearest surface it hits beyond `epsilon`.
///
/// The direction is normalized first, so `t` in the record is a true
/// distance. Ties go to the surface declared first.
pub fn shoot<'a>(surfaces: &'a [Surface], ray: &Ray, epsilon: f64) -> Option<HitRecord<'a>> {
    let ray = ray.normalized();
    let mut closest: Option<(usize, f64)> = None;
    let mut ray_t = Interval::new(epsilon, f64::INFINITY);

    for (index, surface) in surfaces.iter().enumerate() {
        if let Some(t) = surface.hit(&ray, ray_t) {
            closest = Some((index, t));
            ray_t = ray_t.with_max(t);
        }
    }

    closest.map(|(index, t)| HitRecord {
        surface: &surfaces[index],
        index,
        t,
        point: ray.at(t),
    })
}

/// Whether any surface other than `skip` blocks the segment from `point` to
/// `light_position`.
pub fn occluded(
    surfaces: &[Surface],
    skip: usize,
    point: DVec3,
    light_position: DVec3,
    epsilon: f64,
) -> bool {
    let to_light = vector::subtract(point, light_position);
    let distance = vector::length(to_light);
    let ray = Ray::new(point, to_light).normalized();
    let ray_t = Interval::new(epsilon, distance);

    surfaces
        .iter()
        .enumerate()
        .any(|(index, surface)| index != skip && surface.hit(&ray, ray_t).is_some())
}
