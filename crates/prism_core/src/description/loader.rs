//! Scene file loading.
//!
//! Converts parsed [`RawRecord`]s into a validated [`Scene`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use prism_math::DVec3;
use thiserror::Error;

use super::types::{RawRecord, RecordKind};
use crate::scene::{Camera, Light, Material, Scene, Surface, ValidationError};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed scene description: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("scene description contains no records")]
    Empty,

    #[error("record {index}: unknown type \"{name}\"")]
    UnknownType { index: usize, name: String },

    #[error("record {index}: unknown property \"{property}\"")]
    UnknownProperty { index: usize, property: String },

    #[error("record {index}: a {kind} cannot have property \"{property}\"")]
    MisplacedProperty {
        index: usize,
        kind: RecordKind,
        property: &'static str,
    },

    #[error("record {index}: {kind} is missing required property \"{property}\"")]
    MissingProperty {
        index: usize,
        kind: RecordKind,
        property: &'static str,
    },

    #[error("record {index}: only one camera is allowed (first camera is record {first})")]
    DuplicateCamera { index: usize, first: usize },

    #[error("record {index}: invalid {kind}: {source}")]
    Invalid {
        index: usize,
        kind: RecordKind,
        #[source]
        source: ValidationError,
    },

    #[error("invalid scene: {0}")]
    Scene(#[from] ValidationError),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load a scene description file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let scene = parse_scene(&text)?;

    info!(
        "Loaded scene {}: {} surfaces, {} lights, view {}x{}",
        path.display(),
        scene.surfaces().len(),
        scene.lights().len(),
        scene.camera().width,
        scene.camera().height
    );
    if scene.lights().is_empty() {
        warn!("Scene has no lights; every surface will render black");
    }
    if scene.surfaces().is_empty() {
        warn!("Scene has no surfaces; the image will be black");
    }

    Ok(scene)
}

/// Parse a scene description from a string.
pub fn parse_scene(text: &str) -> SceneResult<Scene> {
    let records: Vec<RawRecord> = serde_json::from_str(text)?;
    if records.is_empty() {
        return Err(SceneError::Empty);
    }

    let mut camera: Option<(usize, Camera)> = None;
    let mut surfaces = Vec::new();
    let mut lights = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let kind = RecordKind::parse(&record.kind).ok_or_else(|| SceneError::UnknownType {
            index,
            name: record.kind.clone(),
        })?;
        check_properties(index, kind, record)?;

        let invalid = |source| SceneError::Invalid {
            index,
            kind,
            source,
        };

        match kind {
            RecordKind::Camera => {
                if let Some((first, _)) = camera {
                    return Err(SceneError::DuplicateCamera { index, first });
                }
                let built = build_camera(index, record)?;
                built.validate().map_err(invalid)?;
                camera = Some((index, built));
            }
            RecordKind::Sphere | RecordKind::Plane => {
                let surface = build_surface(index, kind, record)?;
                surface.validate().map_err(invalid)?;
                surfaces.push(surface);
            }
            RecordKind::Light => {
                let light = build_light(index, record)?;
                light.validate().map_err(invalid)?;
                lights.push(light);
            }
        }
        debug!("Parsed record {} ({})", index, kind);
    }

    let (_, camera) = camera.ok_or(ValidationError::MissingCamera)?;
    Ok(Scene::new(camera, surfaces, lights)?)
}

/// Reject unknown properties and properties that do not belong on `kind`.
fn check_properties(index: usize, kind: RecordKind, record: &RawRecord) -> SceneResult<()> {
    if let Some(property) = record.unknown.keys().next() {
        return Err(SceneError::UnknownProperty {
            index,
            property: property.clone(),
        });
    }

    match record.properties().into_iter().find(|p| !kind.allows(p)) {
        Some(property) => Err(SceneError::MisplacedProperty {
            index,
            kind,
            property,
        }),
        None => Ok(()),
    }
}

fn required<T>(
    index: usize,
    kind: RecordKind,
    property: &'static str,
    value: Option<T>,
) -> SceneResult<T> {
    value.ok_or(SceneError::MissingProperty {
        index,
        kind,
        property,
    })
}

fn vec3(v: [f64; 3]) -> DVec3 {
    DVec3::from_array(v)
}

fn build_camera(index: usize, record: &RawRecord) -> SceneResult<Camera> {
    let kind = RecordKind::Camera;
    Ok(Camera::new(
        required(index, kind, "width", record.width)?,
        required(index, kind, "height", record.height)?,
    ))
}

fn build_surface(index: usize, kind: RecordKind, record: &RawRecord) -> SceneResult<Surface> {
    let position = vec3(required(index, kind, "position", record.position)?);

    let surface = if kind == RecordKind::Sphere {
        Surface::sphere(position, required(index, kind, "radius", record.radius)?)
    } else {
        Surface::plane(position, vec3(required(index, kind, "normal", record.normal)?))
    };

    let defaults = Material::default();
    let material = Material {
        diffuse_color: record.diffuse_color.map_or(defaults.diffuse_color, vec3),
        specular_color: record.specular_color.map_or(defaults.specular_color, vec3),
        reflectivity: record.reflectivity.unwrap_or(defaults.reflectivity),
        refractivity: record.refractivity.unwrap_or(defaults.refractivity),
        index_of_refraction: record.ior.unwrap_or(defaults.index_of_refraction),
    };

    Ok(surface.with_material(material))
}

fn build_light(index: usize, record: &RawRecord) -> SceneResult<Light> {
    let kind = RecordKind::Light;
    let position = vec3(required(index, kind, "position", record.position)?);
    let color = vec3(required(index, kind, "color", record.color)?);

    let defaults = Light::point(position, color);
    Ok(defaults
        .with_radial(
            record.radial_a0.unwrap_or(defaults.radial_a0),
            record.radial_a1.unwrap_or(defaults.radial_a1),
            record.radial_a2.unwrap_or(defaults.radial_a2),
        )
        .with_spot(
            record.direction.map_or(defaults.direction, vec3),
            record.theta.unwrap_or(defaults.theta),
            record.angular_a0.unwrap_or(defaults.angular_a0),
        ))
}
