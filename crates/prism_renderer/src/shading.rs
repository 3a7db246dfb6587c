//! Phong shading terms and light falloff.
//!
//! The diffuse and specular terms work on one color channel at a time.

use prism_core::Light;
use prism_math::{vector, DVec3};

/// Lambertian term for one channel. `l` points from the surface toward the
/// light; both vectors are unit length.
#[inline]
pub fn diffuse(kd: f64, light: f64, n: DVec3, l: DVec3) -> f64 {
    let n_dot_l = vector::dot(n, l);
    if n_dot_l > 0.0 {
        kd * light * n_dot_l
    } else {
        0.0
    }
}

/// Phong highlight for one channel.
///
/// `r` is `l` reflected about `n` and `v` points from the surface toward the
/// viewer. Zero when the light is behind the surface.
#[inline]
pub fn specular(
    l: DVec3,
    n: DVec3,
    r: DVec3,
    v: DVec3,
    ks: f64,
    light: f64,
    shininess: f64,
) -> f64 {
    let v_dot_r = vector::dot(v, r);
    if v_dot_r > 0.0 && vector::dot(n, l) > 0.0 {
        ks * light * v_dot_r.powf(shininess)
    } else {
        0.0
    }
}

/// Distance falloff `1 / (a2 d^2 + a1 d + a0)`.
#[inline]
pub fn radial_attenuation(light: &Light, distance: f64) -> f64 {
    1.0 / (light.radial_a2 * distance * distance + light.radial_a1 * distance + light.radial_a0)
}

/// Spotlight falloff.
///
/// `l` is the unit vector from the shaded point toward the light and `d` is
/// its dot product with the unit spot axis. The result is 0 when
/// `d > cos(theta)` and `d^angular_a0` otherwise. Point lights always give 1.
pub fn angular_attenuation(light: &Light, l: DVec3) -> f64 {
    if !light.is_spotlight() {
        return 1.0;
    }

    let cos_theta = light.theta.to_radians().cos();
    let axis = vector::normalize(light.direction);
    let d = vector::dot(axis, l);

    if d > cos_theta {
        0.0
    } else {
        d.powf(light.angular_a0)
    }
}
