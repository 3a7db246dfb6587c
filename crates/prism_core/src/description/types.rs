//! Record types for scene description files.
//!
//! These mirror the file syntax one-to-one before conversion to the scene
//! types in [`crate::scene`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// The kind of a scene record, from its `"type"` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Camera,
    Sphere,
    Plane,
    Light,
}

impl RecordKind {
    /// Parse a `"type"` value. Matching is exact (lowercase).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "camera" => Some(RecordKind::Camera),
            "sphere" => Some(RecordKind::Sphere),
            "plane" => Some(RecordKind::Plane),
            "light" => Some(RecordKind::Light),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Camera => "camera",
            RecordKind::Sphere => "sphere",
            RecordKind::Plane => "plane",
            RecordKind::Light => "light",
        }
    }

    /// Whether a record of this kind may carry `property`.
    pub fn allows(&self, property: &str) -> bool {
        use RecordKind::*;

        match property {
            "width" | "height" => *self == Camera,
            "position" => *self != Camera,
            "radius" => *self == Sphere,
            "normal" => *self == Plane,
            "diffuse_color" | "specular_color" | "reflectivity" | "refractivity" | "ior" => {
                matches!(self, Sphere | Plane)
            }
            "color" | "direction" | "radial-a0" | "radial-a1" | "radial-a2" | "theta"
            | "angular-a0" => *self == Light,
            _ => false,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record of a scene file, as written.
///
/// Every property is optional at this stage; which ones are allowed or
/// required depends on the record kind and is checked by the loader.
/// Properties the format does not define land in `unknown`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub kind: String,

    // Camera
    pub width: Option<f64>,
    pub height: Option<f64>,

    // Surfaces and lights
    pub position: Option<[f64; 3]>,

    // Sphere
    pub radius: Option<f64>,

    // Plane
    pub normal: Option<[f64; 3]>,

    // Surface material
    pub diffuse_color: Option<[f64; 3]>,
    pub specular_color: Option<[f64; 3]>,
    pub reflectivity: Option<f64>,
    pub refractivity: Option<f64>,
    #[serde(alias = "index_of_refraction")]
    pub ior: Option<f64>,

    // Light
    pub color: Option<[f64; 3]>,
    pub direction: Option<[f64; 3]>,
    #[serde(rename = "radial-a0")]
    pub radial_a0: Option<f64>,
    #[serde(rename = "radial-a1")]
    pub radial_a1: Option<f64>,
    #[serde(rename = "radial-a2")]
    pub radial_a2: Option<f64>,
    pub theta: Option<f64>,
    #[serde(rename = "angular-a0")]
    pub angular_a0: Option<f64>,

    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl RawRecord {
    /// Names of the known properties present on this record, in file-format
    /// spelling.
    pub fn properties(&self) -> Vec<&'static str> {
        let present = [
            ("width", self.width.is_some()),
            ("height", self.height.is_some()),
            ("position", self.position.is_some()),
            ("radius", self.radius.is_some()),
            ("normal", self.normal.is_some()),
            ("diffuse_color", self.diffuse_color.is_some()),
            ("specular_color", self.specular_color.is_some()),
            ("reflectivity", self.reflectivity.is_some()),
            ("refractivity", self.refractivity.is_some()),
            ("ior", self.ior.is_some()),
            ("color", self.color.is_some()),
            ("direction", self.direction.is_some()),
            ("radial-a0", self.radial_a0.is_some()),
            ("radial-a1", self.radial_a1.is_some()),
            ("radial-a2", self.radial_a2.is_some()),
            ("theta", self.theta.is_some()),
            ("angular-a0", self.angular_a0.is_some()),
        ];

        present
            .into_iter()
            .filter_map(|(name, is_set)| is_set.then_some(name))
            .collect()
    }
}
