//! Recursive ray tracer.
//!
//! Implements Whitted-style ray tracing with:
//! - Phong diffuse and specular shading with hard shadows
//! - Radial and spotlight attenuation
//! - Mirror reflection and refraction, bounded by `max_depth`

use std::time::Instant;

use log::{debug, info};
use prism_core::{Pixel, PixelBuffer, Scene, Shape, Surface};
use prism_math::{vector, Color, DVec3, Ray};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::PinholeCamera;
use crate::hittable::{occluded, shoot, HitRecord, Hittable};
use crate::shading::{angular_attenuation, diffuse, radial_attenuation, specular};

/// How transmitted rays leave a refractive surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefractionMode {
    /// Bend through spheres by Snell's law using the material's index of
    /// refraction, with air outside. Planes are treated as thin sheets.
    #[default]
    Snell,
    /// Continue along the incoming direction.
    Straight,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Transmission model
    pub refraction: RefractionMode,
    /// Phong specular exponent
    pub shininess: f64,
    /// Self-intersection tolerance for every ray
    pub epsilon: f64,
    /// Tile edge length for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            refraction: RefractionMode::Snell,
            shininess: 20.0,
            epsilon: 1e-5,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_refraction(mut self, refraction: RefractionMode) -> Self {
        self.refraction = refraction;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

/// Color seen along a ray. Black if it hits nothing.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    match shoot(scene.surfaces(), ray, config.epsilon) {
        Some(hit) => shade(scene, ray, &hit, depth, config),
        None => Color::ZERO,
    }
}

/// Shade a hit: local Phong lighting from every unshadowed light, blended
/// with the reflected and transmitted colors by the material weights.
///
/// Secondary rays are cast only while `depth < config.max_depth`.
pub fn shade(
    scene: &Scene,
    ray: &Ray,
    hit: &HitRecord<'_>,
    depth: u32,
    config: &RenderConfig,
) -> Color {
    let surface = hit.surface;
    let material = &surface.material;
    let point = hit.point;
    let normal = surface.normal_at(point);
    let incoming = vector::normalize(ray.direction);
    let view = -incoming;
    let bounce = depth < config.max_depth;

    let mut reflected = Color::ZERO;
    if material.reflectivity > config.epsilon && bounce {
        let direction = vector::reflect(normal, view);
        reflected = trace(scene, &Ray::new(point, direction), depth + 1, config);
    }

    let mut refracted = Color::ZERO;
    if material.refractivity > config.epsilon && bounce {
        let direction = refraction_direction(incoming, surface, normal, config.refraction);
        refracted = trace(scene, &Ray::new(point, direction), depth + 1, config);
    }

    let mut local = Color::ZERO;
    for light in scene.lights() {
        if occluded(scene.surfaces(), hit.index, point, light.position, config.epsilon) {
            continue;
        }

        let to_light = vector::subtract(point, light.position);
        let distance = vector::length(to_light);
        let l = vector::normalize(to_light);
        let r = vector::reflect(normal, l);

        let channel = |kd: f64, ks: f64, intensity: f64| {
            diffuse(kd, intensity, normal, l)
                + specular(l, normal, r, view, ks, intensity, config.shininess)
        };
        let phong = Color::new(
            channel(material.diffuse_color.x, material.specular_color.x, light.color.x),
            channel(material.diffuse_color.y, material.specular_color.y, light.color.y),
            channel(material.diffuse_color.z, material.specular_color.z, light.color.z),
        );

        local += phong * radial_attenuation(light, distance) * angular_attenuation(light, l);
    }

    local * material.local_weight()
        + reflected * material.reflectivity
        + refracted * material.refractivity
}

/// Direction of the transmitted ray leaving `surface` at a point with
/// outward normal `normal`.
fn refraction_direction(
    incoming: DVec3,
    surface: &Surface,
    normal: DVec3,
    mode: RefractionMode,
) -> DVec3 {
    match (mode, surface.shape) {
        (RefractionMode::Snell, Shape::Sphere { .. }) => {
            let ior = surface.material.index_of_refraction;
            if vector::dot(incoming, normal) < 0.0 {
                refract(incoming, normal, 1.0 / ior)
            } else {
                refract(incoming, -normal, ior)
            }
        }
        _ => incoming,
    }
}

/// Refract unit vector `uv` through a surface with unit normal `n` facing
/// against it. `eta` is the ratio of indices, incident over transmitted.
///
/// Total internal reflection returns the mirror direction.
pub fn refract(uv: DVec3, n: DVec3, eta: f64) -> DVec3 {
    let cos_theta = vector::dot(-uv, n).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    if eta * sin_theta > 1.0 {
        return vector::reflect(n, -uv);
    }

    let r_out_perp = vector::scale(uv + n * cos_theta, eta);
    let r_out_parallel = n * -(1.0 - r_out_perp.length_squared()).abs().sqrt();
    r_out_perp + r_out_parallel
}

/// Render one image pixel; `row` 0 is the top of the image.
pub fn render_pixel(
    scene: &Scene,
    camera: &PinholeCamera,
    x: u32,
    row: u32,
    config: &RenderConfig,
) -> Pixel {
    let ray = camera.get_ray(x, row);
    Pixel::from_color(trace(scene, &ray, 0, config))
}

/// Render the whole scene at `width` x `height` pixels.
///
/// Buckets are rendered in parallel on the current rayon pool. The result
/// does not depend on the thread count or bucket size.
pub fn render(scene: &Scene, width: u32, height: u32, config: &RenderConfig) -> PixelBuffer {
    let camera = PinholeCamera::new(scene.camera(), width, height);
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));

    info!(
        "Rendering {}x{} in {} buckets on {} threads (max depth {}, {:?} refraction)",
        width,
        height,
        buckets.len(),
        rayon::current_num_threads(),
        config.max_depth,
        config.refraction
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, scene, &camera, config)))
        .collect();

    let mut image = PixelBuffer::new(width, height);
    for result in &results {
        result.blit(&mut image);
    }

    debug!("Blitted {} buckets", results.len());
    info!("Rendered in {:.2?}", start.elapsed());

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Camera, Light, Material, SceneBuilder};

    fn eye_ray() -> Ray {
        Ray::new(DVec3::ZERO, DVec3::Z)
    }

    fn red_sphere_scene() -> Scene {
        SceneBuilder::new()
            .with_camera(Camera::new(2.0, 2.0))
            .with_surface(
                Surface::sphere(DVec3::new(0.0, 0.0, 5.0), 1.0)
                    .with_material(Material::diffuse(Color::new(1.0, 0.0, 0.0))),
            )
            .with_light(Light::point(DVec3::ZERO, Color::ONE))
            .build()
            .unwrap()
    }

    #[test]
    fn test_red_sphere_three_by_three() {
        let image = render(&red_sphere_scene(), 3, 3, &RenderConfig::default());

        for row in 0..3 {
            for x in 0..3 {
                let pixel = image.get(x, row);
                if (x, row) == (1, 1) {
                    assert!(pixel.r > 0);
                    assert_eq!((pixel.g, pixel.b), (0, 0));
                } else {
                    assert_eq!(pixel, Pixel::BLACK, "pixel ({}, {})", x, row);
                }
            }
        }
    }

    #[test]
    fn test_shadow_blocks_light() {
        let wall = Surface::plane(DVec3::new(0.0, 0.0, 10.0), -DVec3::Z)
            .with_material(Material::diffuse(Color::ONE));
        let light = Light::point(DVec3::new(0.0, 5.0, 0.0), Color::ONE);
        let occluder = Surface::sphere(DVec3::new(0.0, 2.5, 5.0), 0.5);
        let config = RenderConfig::default();

        let lit = SceneBuilder::new()
            .with_camera(Camera::new(1.0, 1.0))
            .with_surface(wall)
            .with_light(light)
            .build()
            .unwrap();
        let color = trace(&lit, &eye_ray(), 0, &config);
        assert!(color.min_element() > 0.0);

        let shadowed = SceneBuilder::new()
            .with_camera(Camera::new(1.0, 1.0))
            .with_surface(wall)
            .with_surface(occluder)
            .with_light(light)
            .build()
            .unwrap();
        assert_eq!(trace(&shadowed, &eye_ray(), 0, &config), Color::ZERO);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let mirror = Material::diffuse(Color::splat(0.5)).with_reflectivity(1.0);
        let scene = SceneBuilder::new()
            .with_camera(Camera::new(2.0, 2.0))
            .with_surface(Surface::plane(DVec3::new(0.0, 0.0, 3.0), -DVec3::Z).with_material(mirror))
            .with_surface(Surface::plane(DVec3::new(0.0, 0.0, -3.0), DVec3::Z).with_material(mirror))
            .with_light(Light::point(DVec3::ZERO, Color::ONE))
            .build()
            .unwrap();

        let config = RenderConfig::default();
        let first = render(&scene, 8, 8, &config);
        let second = render(&scene, 8, 8, &config);
        assert_eq!(first, second);

        let color = trace(&scene, &eye_ray(), 0, &config);
        assert!(color.is_finite());
    }

    #[test]
    fn test_reflection_weight_with_nothing_to_reflect() {
        let config = RenderConfig::default();
        let scene_with = |reflectivity: f64| {
            SceneBuilder::new()
                .with_camera(Camera::new(2.0, 2.0))
                .with_surface(Surface::sphere(DVec3::new(0.0, 0.0, 5.0), 1.0).with_material(
                    Material::diffuse(Color::new(0.8, 0.6, 0.4)).with_reflectivity(reflectivity),
                ))
                .with_light(Light::point(DVec3::ZERO, Color::ONE))
                .build()
                .unwrap()
        };

        let matte = trace(&scene_with(0.0), &eye_ray(), 0, &config);
        let shiny = trace(&scene_with(0.25), &eye_ray(), 0, &config);
        assert!((shiny - matte * 0.75).length() < 1e-12);

        let mirror = trace(&scene_with(1.0), &eye_ray(), 0, &config);
        assert_eq!(mirror, Color::ZERO);
    }

    fn mirror_and_backdrop(extra_lights: &[Light], reflectivity: f64) -> Scene {
        let mut builder = SceneBuilder::new()
            .with_camera(Camera::new(2.0, 2.0))
            .with_surface(Surface::sphere(DVec3::new(0.0, 0.0, 5.0), 1.0).with_material(
                Material::diffuse(Color::splat(0.2)).with_reflectivity(reflectivity),
            ))
            // Behind the eye, only visible in the mirror
            .with_surface(
                Surface::plane(DVec3::new(0.0, 0.0, -2.0), DVec3::Z)
                    .with_material(Material::diffuse(Color::ONE)),
            )
            .with_light(Light::point(DVec3::new(0.0, 3.0, 0.0), Color::ONE));
        for light in extra_lights {
            builder = builder.with_light(*light);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_reflection_added_once_per_hit() {
        let config = RenderConfig::default();
        let dark = Light::point(DVec3::new(5.0, 0.0, 0.0), Color::ZERO);

        let one = trace(&mirror_and_backdrop(&[], 0.5), &eye_ray(), 0, &config);
        let two = trace(&mirror_and_backdrop(&[dark], 0.5), &eye_ray(), 0, &config);
        assert!((one - two).length() < 1e-12);

        // The mirror actually contributes
        let matte = trace(&mirror_and_backdrop(&[], 0.0), &eye_ray(), 0, &config);
        assert!((one - matte).length() > 1e-3);
    }

    #[test]
    fn test_zero_depth_disables_bounces() {
        let scene = mirror_and_backdrop(&[], 0.5);
        let matte = mirror_and_backdrop(&[], 0.0);

        let flat = trace(&scene, &eye_ray(), 0, &RenderConfig::default().with_max_depth(0));
        let local = trace(&matte, &eye_ray(), 0, &RenderConfig::default());
        assert!((flat - local * 0.5).length() < 1e-12);
    }

    #[test]
    fn test_refract_normal_incidence() {
        let out = refract(DVec3::Z, -DVec3::Z, 1.0 / 1.5);
        assert!((out - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let incoming = DVec3::new(1.0, 0.0, 1.0).normalize();
        let out = refract(incoming, -DVec3::Z, 1.0 / 1.5);

        assert!((out.length() - 1.0).abs() < 1e-9);
        // Snell: sin(out) = sin(in) / 1.5
        let sin_in = std::f64::consts::FRAC_1_SQRT_2;
        assert!((out.x - sin_in / 1.5).abs() < 1e-9);
        assert!(out.z > incoming.z);
    }

    #[test]
    fn test_total_internal_reflection() {
        let incoming = DVec3::new(1.0, 0.0, 1.0).normalize();
        let out = refract(incoming, -DVec3::Z, 1.5);

        let mirror = DVec3::new(1.0, 0.0, -1.0).normalize();
        assert!((out - mirror).length() < 1e-9);
    }

    #[test]
    fn test_unit_ior_matches_straight_refraction() {
        let glass = Material::diffuse(Color::splat(0.1)).with_refractivity(0.9);
        let scene = SceneBuilder::new()
            .with_camera(Camera::new(2.0, 2.0))
            .with_surface(Surface::sphere(DVec3::new(0.3, 0.2, 4.0), 1.0).with_material(glass))
            .with_surface(
                Surface::plane(DVec3::new(0.0, 0.0, 9.0), -DVec3::Z)
                    .with_material(Material::diffuse(Color::new(0.0, 1.0, 0.0))),
            )
            .with_light(Light::point(DVec3::new(0.0, 0.0, 1.0), Color::ONE))
            .build()
            .unwrap();

        let snell = RenderConfig::default();
        let straight = RenderConfig::default().with_refraction(RefractionMode::Straight);
        let camera = PinholeCamera::new(scene.camera(), 6, 6);

        for row in 0..6 {
            for x in 0..6 {
                let ray = camera.get_ray(x, row);
                let a = trace(&scene, &ray, 0, &snell);
                let b = trace(&scene, &ray, 0, &straight);
                assert!((a - b).length() < 1e-9, "pixel ({}, {})", x, row);
            }
        }
    }

    #[test]
    fn test_parallel_matches_per_pixel() {
        let scene = mirror_and_backdrop(&[], 0.5);
        let config = RenderConfig::default();

        let tiled = render(&scene, 17, 11, &config.clone().with_bucket_size(4));
        let single = render(&scene, 17, 11, &config.clone().with_bucket_size(64));
        assert_eq!(tiled, single);

        let camera = PinholeCamera::new(scene.camera(), 17, 11);
        for row in 0..11 {
            for x in 0..17 {
                assert_eq!(tiled.get(x, row), render_pixel(&scene, &camera, x, row, &config));
            }
        }
    }

    #[test]
    fn test_image_is_top_down() {
        // Sphere up and ahead: only the top rows see it
        let scene = SceneBuilder::new()
            .with_camera(Camera::new(2.0, 2.0))
            .with_surface(
                Surface::sphere(DVec3::new(0.0, 3.75, 5.0), 2.0)
                    .with_material(Material::diffuse(Color::ONE)),
            )
            .with_light(Light::point(DVec3::ZERO, Color::ONE))
            .build()
            .unwrap();

        let image = render(&scene, 4, 4, &RenderConfig::default());
        assert!(image.row(0).iter().any(|p| *p != Pixel::BLACK));
        assert!(image.row(3).iter().all(|p| *p == Pixel::BLACK));
    }

    #[test]
    fn test_empty_scene_is_black() {
        let scene = SceneBuilder::new()
            .with_camera(Camera::new(1.0, 1.0))
            .build()
            .unwrap();

        let image = render(&scene, 5, 3, &RenderConfig::default());
        assert!(image.pixels().iter().all(|p| *p == Pixel::BLACK));
    }
}
