//! Scene description files.
//!
//! A scene file is a JSON array of records, each tagged with a `"type"` of
//! `camera`, `sphere`, `plane` or `light`:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 0, 5], "radius": 1,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1] },
//!   { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
//!     "diffuse_color": [0.2, 0.2, 0.2], "reflectivity": 0.5 },
//!   { "type": "light", "position": [2, 2, 0], "color": [1.5, 1.5, 1.5],
//!     "radial-a0": 1, "radial-a1": 0.1, "radial-a2": 0.01 }
//! ]
//! ```
//!
//! Exactly one camera is required. Unknown record types, unknown properties
//! and properties on the wrong kind of record are rejected with the index of
//! the offending record.

mod loader;
mod types;

pub use loader::*;
pub use types::*;
