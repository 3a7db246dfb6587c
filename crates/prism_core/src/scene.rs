//! Scene types for Prism.
//!
//! A scene is one camera fixed at the origin looking down +Z, up to
//! [`MAX_SURFACES`] spheres and planes, and up to [`MAX_LIGHTS`] point or
//! spot lights. Values are checked once in [`Scene::new`]; after that the
//! scene is read-only and can be shared across render threads.

use prism_math::{vector, Color, DVec3, Interval};
use thiserror::Error;

/// Maximum number of surfaces (spheres + planes) in a scene.
pub const MAX_SURFACES: usize = 128;

/// Maximum number of lights in a scene.
pub const MAX_LIGHTS: usize = 128;

/// Slack allowed when checking `reflectivity + refractivity <= 1`, so that
/// pairs like 0.7 + 0.3 are not rejected for rounding.
const ENERGY_TOLERANCE: f64 = 1e-9;

/// Errors raised when scene values break an invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("camera width and height must be positive (got {width} x {height})")]
    InvalidCamera { width: f64, height: f64 },

    #[error("sphere radius must be positive (got {0})")]
    InvalidRadius(f64),

    #[error("plane normal must not be the zero vector")]
    ZeroNormal,

    #[error("{name} must be finite (got {value:?})")]
    NonFinite { name: &'static str, value: DVec3 },

    #[error("{name} components must be within [0, 1] (got {value:?})")]
    ColorOutOfRange { name: &'static str, value: Color },

    #[error("{name} must be within [0, 1] (got {value})")]
    CoefficientOutOfRange { name: &'static str, value: f64 },

    #[error("reflectivity + refractivity must not exceed 1 (got {reflectivity} + {refractivity})")]
    EnergyExceeded { reflectivity: f64, refractivity: f64 },

    #[error("index of refraction must be positive (got {0})")]
    InvalidIor(f64),

    #[error("light color must be non-negative (got {0:?})")]
    NegativeLightColor(Color),

    #[error("radial attenuation needs a0 > 0 and non-negative a1, a2 (got a0={a0}, a1={a1}, a2={a2})")]
    InvalidAttenuation { a0: f64, a1: f64, a2: f64 },

    #[error("spotlight theta must be within [0, 180) degrees (got {0})")]
    InvalidTheta(f64),

    #[error("angular-a0 must be finite and non-negative (got {0})")]
    InvalidAngularExponent(f64),

    #[error("scene has {0} surfaces, at most {} are supported", MAX_SURFACES)]
    TooManySurfaces(usize),

    #[error("scene has {0} lights, at most {} are supported", MAX_LIGHTS)]
    TooManyLights(usize),

    #[error("scene has no camera")]
    MissingCamera,
}

/// The view window. The eye sits at the origin and the view plane at z = 1,
/// spanning `width` x `height` world units centered on the Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(ValidationError::InvalidCamera {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Surface appearance for Phong shading plus mirror and transmission weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse reflectance (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular reflectance (RGB, 0-1)
    pub specular_color: Color,

    /// Weight of the mirror-reflected contribution
    pub reflectivity: f64,

    /// Weight of the transmitted contribution
    pub refractivity: f64,

    /// Index of refraction (1.0 = air, 1.5 = glass)
    pub index_of_refraction: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
            reflectivity: 0.0,
            refractivity: 0.0,
            index_of_refraction: 1.0,
        }
    }
}

impl Material {
    /// Create a purely diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse_color: color,
            ..Default::default()
        }
    }

    pub fn with_specular(mut self, color: Color) -> Self {
        self.specular_color = color;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_refractivity(mut self, refractivity: f64) -> Self {
        self.refractivity = refractivity;
        self
    }

    pub fn with_ior(mut self, index_of_refraction: f64) -> Self {
        self.index_of_refraction = index_of_refraction;
        self
    }

    /// Weight of the local (Phong) term: `1 - reflectivity - refractivity`.
    ///
    /// Together with `reflectivity` and `refractivity` this sums to 1.
    pub fn local_weight(&self) -> f64 {
        1.0 - self.reflectivity - self.refractivity
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_unit_color("diffuse_color", self.diffuse_color)?;
        check_unit_color("specular_color", self.specular_color)?;
        check_unit_coefficient("reflectivity", self.reflectivity)?;
        check_unit_coefficient("refractivity", self.refractivity)?;

        if self.reflectivity + self.refractivity > 1.0 + ENERGY_TOLERANCE {
            return Err(ValidationError::EnergyExceeded {
                reflectivity: self.reflectivity,
                refractivity: self.refractivity,
            });
        }

        if !(self.index_of_refraction.is_finite() && self.index_of_refraction > 0.0) {
            return Err(ValidationError::InvalidIor(self.index_of_refraction));
        }

        Ok(())
    }
}

/// Geometry of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Sphere centered at the surface position
    Sphere { radius: f64 },

    /// Infinite plane through the surface position.
    ///
    /// Unit length once the surface is part of a [`Scene`].
    Plane { normal: DVec3 },
}

/// A renderable object: a shape placed at `position` with a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    /// Sphere center, or any point on the plane
    pub position: DVec3,

    pub shape: Shape,

    pub material: Material,
}

impl Surface {
    /// Create a sphere with the default (black) material.
    pub fn sphere(center: DVec3, radius: f64) -> Self {
        Self {
            position: center,
            shape: Shape::Sphere { radius },
            material: Material::default(),
        }
    }

    /// Create a plane with the default (black) material.
    ///
    /// The normal need not be unit length.
    pub fn plane(position: DVec3, normal: DVec3) -> Self {
        Self {
            position,
            shape: Shape::Plane { normal },
            material: Material::default(),
        }
    }

    /// Set the material for this surface.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_finite("position", self.position)?;

        match self.shape {
            Shape::Sphere { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(ValidationError::InvalidRadius(radius));
                }
            }
            Shape::Plane { normal } => {
                check_finite("normal", normal)?;
                if normal == DVec3::ZERO {
                    return Err(ValidationError::ZeroNormal);
                }
            }
        }

        self.material.validate()
    }

    /// This surface with a unit-length plane normal.
    fn normalized(mut self) -> Self {
        if let Shape::Plane { normal } = &mut self.shape {
            *normal = vector::normalize(*normal);
        }
        self
    }
}

/// A point light, or a spotlight when both `theta` and `direction` are set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Emitted color; may exceed 1 for over-bright sources
    pub color: Color,

    pub position: DVec3,

    /// Spotlight axis; zero for an omnidirectional light
    pub direction: DVec3,

    /// Constant term of the radial falloff `1 / (a2 d^2 + a1 d + a0)`
    pub radial_a0: f64,
    pub radial_a1: f64,
    pub radial_a2: f64,

    /// Spotlight cone half-angle in degrees; 0 for an omnidirectional light
    pub theta: f64,

    /// Exponent of the angular falloff inside the cone
    pub angular_a0: f64,
}

impl Light {
    /// Create an omnidirectional light with no distance falloff.
    pub fn point(position: DVec3, color: Color) -> Self {
        Self {
            color,
            position,
            direction: DVec3::ZERO,
            radial_a0: 1.0,
            radial_a1: 0.0,
            radial_a2: 0.0,
            theta: 0.0,
            angular_a0: 0.0,
        }
    }

    /// Set the radial attenuation coefficients.
    pub fn with_radial(mut self, a0: f64, a1: f64, a2: f64) -> Self {
        self.radial_a0 = a0;
        self.radial_a1 = a1;
        self.radial_a2 = a2;
        self
    }

    /// Turn this light into a spotlight.
    pub fn with_spot(mut self, direction: DVec3, theta: f64, angular_a0: f64) -> Self {
        self.direction = direction;
        self.theta = theta;
        self.angular_a0 = angular_a0;
        self
    }

    /// Whether the light is restricted to a cone.
    pub fn is_spotlight(&self) -> bool {
        self.theta != 0.0 && vector::length(self.direction) != 0.0
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_finite("light position", self.position)?;
        check_finite("light direction", self.direction)?;
        check_finite("light color", self.color)?;

        if self.color.min_element() < 0.0 {
            return Err(ValidationError::NegativeLightColor(self.color));
        }

        // a0 > 0 keeps the falloff finite at the light position
        let constant_ok = self.radial_a0.is_finite() && self.radial_a0 > 0.0;
        let slopes_ok = [self.radial_a1, self.radial_a2]
            .iter()
            .all(|c| c.is_finite() && *c >= 0.0);
        if !(constant_ok && slopes_ok) {
            return Err(ValidationError::InvalidAttenuation {
                a0: self.radial_a0,
                a1: self.radial_a1,
                a2: self.radial_a2,
            });
        }

        if !(self.theta >= 0.0 && self.theta < 180.0) {
            return Err(ValidationError::InvalidTheta(self.theta));
        }

        if !(self.angular_a0.is_finite() && self.angular_a0 >= 0.0) {
            return Err(ValidationError::InvalidAngularExponent(self.angular_a0));
        }

        Ok(())
    }
}

/// A complete, validated scene.
#[derive(Clone, Debug)]
pub struct Scene {
    camera: Camera,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
}

impl Scene {
    /// Validate the parts and assemble a scene.
    ///
    /// Plane normals are normalized here, once, so rendering never writes to
    /// the scene.
    pub fn new(
        camera: Camera,
        surfaces: Vec<Surface>,
        lights: Vec<Light>,
    ) -> Result<Self, ValidationError> {
        camera.validate()?;

        if surfaces.len() > MAX_SURFACES {
            return Err(ValidationError::TooManySurfaces(surfaces.len()));
        }
        if lights.len() > MAX_LIGHTS {
            return Err(ValidationError::TooManyLights(lights.len()));
        }

        for surface in &surfaces {
            surface.validate()?;
        }
        for light in &lights {
            light.validate()?;
        }

        Ok(Self {
            camera,
            surfaces: surfaces.into_iter().map(Surface::normalized).collect(),
            lights,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Surfaces in declaration order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Lights in declaration order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

/// Incremental construction of a [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    camera: Option<Camera>,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn build(self) -> Result<Scene, ValidationError> {
        let camera = self.camera.ok_or(ValidationError::MissingCamera)?;
        Scene::new(camera, self.surfaces, self.lights)
    }
}

fn check_finite(name: &'static str, value: DVec3) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { name, value })
    }
}

fn check_unit_color(name: &'static str, value: Color) -> Result<(), ValidationError> {
    // NaN fails both comparisons
    if value.min_element() >= 0.0 && value.max_element() <= 1.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::ColorOutOfRange { name, value })
    }
}

fn check_unit_coefficient(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if Interval::UNIT.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::CoefficientOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(2.0, 2.0)
    }

    #[test]
    fn test_scene_creation() {
        let scene = SceneBuilder::new()
            .with_camera(camera())
            .with_surface(Surface::sphere(DVec3::new(0.0, 0.0, 5.0), 1.0))
            .with_surface(Surface::plane(DVec3::new(0.0, -1.0, 0.0), DVec3::Y))
            .with_light(Light::point(DVec3::ZERO, Color::ONE))
            .build()
            .unwrap();

        assert_eq!(scene.surfaces().len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.camera().width, 2.0);
    }

    #[test]
    fn test_plane_normal_normalized_on_construction() {
        let scene = SceneBuilder::new()
            .with_camera(camera())
            .with_surface(Surface::plane(DVec3::ZERO, DVec3::new(0.0, 3.0, 4.0)))
            .build()
            .unwrap();

        match scene.surfaces()[0].shape {
            Shape::Plane { normal } => {
                assert!((normal.length() - 1.0).abs() < 1e-12);
                assert!((normal - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
            }
            Shape::Sphere { .. } => panic!("expected a plane"),
        }
    }

    #[test]
    fn test_missing_camera() {
        let err = SceneBuilder::new().build().unwrap_err();
        assert_eq!(err, ValidationError::MissingCamera);
    }

    #[test]
    fn test_invalid_camera() {
        let err = Scene::new(Camera::new(0.0, 1.0), vec![], vec![]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCamera { .. }));
    }

    #[test]
    fn test_surface_limit() {
        let surfaces = vec![Surface::sphere(DVec3::Z * 5.0, 1.0); MAX_SURFACES + 1];
        let err = Scene::new(camera(), surfaces, vec![]).unwrap_err();
        assert_eq!(err, ValidationError::TooManySurfaces(MAX_SURFACES + 1));

        let surfaces = vec![Surface::sphere(DVec3::Z * 5.0, 1.0); MAX_SURFACES];
        assert!(Scene::new(camera(), surfaces, vec![]).is_ok());
    }

    #[test]
    fn test_light_limit() {
        let lights = vec![Light::point(DVec3::ZERO, Color::ONE); MAX_LIGHTS + 1];
        let err = Scene::new(camera(), vec![], lights).unwrap_err();
        assert_eq!(err, ValidationError::TooManyLights(MAX_LIGHTS + 1));
    }

    #[test]
    fn test_energy_limit() {
        let ok = Material::default().with_reflectivity(0.7).with_refractivity(0.3);
        assert!(ok.validate().is_ok());

        let over = Material::default().with_reflectivity(0.7).with_refractivity(0.4);
        assert!(matches!(
            over.validate(),
            Err(ValidationError::EnergyExceeded { .. })
        ));
    }

    #[test]
    fn test_local_weight_completes_unit_sum() {
        let m = Material::default().with_reflectivity(0.25).with_refractivity(0.5);
        assert!((m.local_weight() + m.reflectivity + m.refractivity - 1.0).abs() < 1e-12);
        assert_eq!(Material::default().local_weight(), 1.0);
    }

    #[test]
    fn test_material_color_range() {
        let m = Material::diffuse(Color::new(1.2, 0.0, 0.0));
        assert!(matches!(
            m.validate(),
            Err(ValidationError::ColorOutOfRange { name: "diffuse_color", .. })
        ));
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(
            Surface::sphere(DVec3::ZERO, 0.0).validate(),
            Err(ValidationError::InvalidRadius(0.0))
        );
        assert_eq!(
            Surface::plane(DVec3::ZERO, DVec3::ZERO).validate(),
            Err(ValidationError::ZeroNormal)
        );
    }

    #[test]
    fn test_light_attenuation_needs_constant_term() {
        let rejected = [
            (0.0, 0.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.0, 1.0, 0.0),
            (-1.0, 0.0, 0.0),
            (1.0, -0.5, 0.0),
            (1.0, 0.0, f64::NAN),
        ];
        for (a0, a1, a2) in rejected {
            let light = Light::point(DVec3::ZERO, Color::ONE).with_radial(a0, a1, a2);
            assert!(
                matches!(light.validate(), Err(ValidationError::InvalidAttenuation { .. })),
                "a0={a0} a1={a1} a2={a2} should be rejected"
            );
        }

        let light = Light::point(DVec3::ZERO, Color::ONE).with_radial(0.5, 0.0, 1.0);
        assert!(light.validate().is_ok());
    }

    #[test]
    fn test_unit_coefficient_bounds() {
        let full = Material::default().with_reflectivity(1.0);
        assert!(full.validate().is_ok());

        for value in [1.0001, -0.0001, f64::NAN] {
            assert!(matches!(
                Material::default().with_reflectivity(value).validate(),
                Err(ValidationError::CoefficientOutOfRange { name: "reflectivity", .. })
            ));
        }
    }

    #[test]
    fn test_over_bright_light_is_valid() {
        let light = Light::point(DVec3::ZERO, Color::new(3.0, 2.0, 5.0));
        assert!(light.validate().is_ok());
    }

    #[test]
    fn test_spotlight_detection() {
        let point = Light::point(DVec3::ZERO, Color::ONE);
        assert!(!point.is_spotlight());

        let no_axis = point.with_spot(DVec3::ZERO, 30.0, 1.0);
        assert!(!no_axis.is_spotlight());

        let spot = point.with_spot(DVec3::Z, 30.0, 1.0);
        assert!(spot.is_spotlight());
    }
}
