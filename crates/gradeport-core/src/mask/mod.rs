//! Local adjustment masks.
//!
//! A mask is a semantically or geometrically defined region carrying its own
//! scoped adjustment sub-record. The semantic taxonomy and its per-format
//! code mapping live in [`registry`]; the spatial payloads live in
//! [`geometry`] as a tagged union (one variant per archetype).

pub mod geometry;
pub mod registry;

pub use geometry::{
    GeometryArchetype, LinearGeometry, MaskGeometry, PointGeometry, RadialGeometry, RangeGeometry,
};
pub use registry::{MaskRegistry, MaskTypeInfo, SemanticMaskType};

use serde::{Deserialize, Serialize};

/// Local adjustment sub-record scoped to one mask.
///
/// Same shape as the record's basic tone group, but always scaled down by the
/// local strength (default 0.35) before export so local edits stay subtle
/// relative to global ones. Local temperature/tint are relative sliders
/// (-100 to 100), not Kelvin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskAdjustments {
    /// Local exposure (-5 to 5 stops)
    pub exposure: Option<f32>,
    /// Local contrast (-100 to 100)
    pub contrast: Option<f32>,
    /// Local highlights (-100 to 100)
    pub highlights: Option<f32>,
    /// Local shadows (-100 to 100)
    pub shadows: Option<f32>,
    /// Local whites (-100 to 100)
    pub whites: Option<f32>,
    /// Local blacks (-100 to 100)
    pub blacks: Option<f32>,
    /// Local clarity (-100 to 100)
    pub clarity: Option<f32>,
    /// Local saturation (-100 to 100)
    pub saturation: Option<f32>,
    /// Local temperature slider (-100 to 100)
    pub temperature: Option<f32>,
    /// Local tint slider (-100 to 100)
    pub tint: Option<f32>,
}

impl MaskAdjustments {
    pub fn is_empty(&self) -> bool {
        self.exposure.is_none()
            && self.contrast.is_none()
            && self.highlights.is_none()
            && self.shadows.is_none()
            && self.whites.is_none()
            && self.blacks.is_none()
            && self.clarity.is_none()
            && self.saturation.is_none()
            && self.temperature.is_none()
            && self.tint.is_none()
    }
}

/// One local mask: semantic type, optional display name, scoped adjustments,
/// and a geometry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    /// Semantic type tag; loose producer strings normalize on deserialize.
    pub mask_type: SemanticMaskType,
    /// Optional display name shown by the target editor.
    pub name: Option<String>,
    /// Scoped adjustment sub-record.
    #[serde(default)]
    pub adjustments: MaskAdjustments,
    /// Spatial definition matching the type's archetype.
    #[serde(default)]
    pub geometry: MaskGeometry,
}

impl Mask {
    /// Create a mask from a loosely-specified type string, normalizing it
    /// through the registry ("face" becomes `face_skin`, unknown strings
    /// become `subject`).
    pub fn from_loose_type(raw_type: &str, geometry: MaskGeometry) -> Self {
        Self {
            mask_type: MaskRegistry::global().normalize(raw_type),
            name: None,
            adjustments: MaskAdjustments::default(),
            geometry,
        }
    }

    /// Display name with the semantic type as fallback.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.mask_type.as_str().to_string(),
        }
    }
}
