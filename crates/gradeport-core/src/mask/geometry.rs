//! Mask geometry archetypes.
//!
//! Each mask carries exactly one geometry payload, modeled as a tagged union
//! so a single mask can never hold contradictory geometry fields. All spatial
//! coordinates are normalized: (0, 0) is the top-left corner of the image,
//! (1, 1) the bottom-right.

use serde::{Deserialize, Serialize};

/// The shape/schema a mask's spatial definition follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryArchetype {
    /// Bounding box + rotation (radial/elliptical gradient).
    Radial,
    /// Two endpoint coordinates (linear gradient).
    Linear,
    /// Single reference point (subject/person/background/sky).
    Point,
    /// Color or luminance range selector.
    Range,
}

/// Radial gradient geometry: an ellipse inscribed in a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGeometry {
    /// Top edge of the bounding box (0.0 to 1.0)
    pub top: f32,
    /// Left edge of the bounding box (0.0 to 1.0)
    pub left: f32,
    /// Bottom edge of the bounding box (0.0 to 1.0)
    pub bottom: f32,
    /// Right edge of the bounding box (0.0 to 1.0)
    pub right: f32,
    /// Rotation angle in degrees (positive = clockwise)
    pub angle: f32,
    /// Feather amount (0.0 = hard edge, 1.0 = full gradient)
    pub feather: f32,
}

impl RadialGeometry {
    pub fn new(top: f32, left: f32, bottom: f32, right: f32, angle: f32, feather: f32) -> Self {
        Self {
            top: top.clamp(0.0, 1.0),
            left: left.clamp(0.0, 1.0),
            bottom: bottom.clamp(0.0, 1.0),
            right: right.clamp(0.0, 1.0),
            angle,
            feather: feather.clamp(0.0, 1.0),
        }
    }
}

/// Linear gradient geometry: full effect at the zero point fading toward the
/// full point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGeometry {
    /// Full-effect endpoint X (0.0 to 1.0)
    pub zero_x: f32,
    /// Full-effect endpoint Y (0.0 to 1.0)
    pub zero_y: f32,
    /// No-effect endpoint X (0.0 to 1.0)
    pub full_x: f32,
    /// No-effect endpoint Y (0.0 to 1.0)
    pub full_y: f32,
}

impl LinearGeometry {
    pub fn new(zero_x: f32, zero_y: f32, full_x: f32, full_y: f32) -> Self {
        Self {
            zero_x: zero_x.clamp(0.0, 1.0),
            zero_y: zero_y.clamp(0.0, 1.0),
            full_x: full_x.clamp(0.0, 1.0),
            full_y: full_y.clamp(0.0, 1.0),
        }
    }
}

/// Single reference point used by subject/person/background/sky masks; the
/// editor's own segmentation resolves the actual region from this anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Anchor X (0.0 to 1.0)
    pub x: f32,
    /// Anchor Y (0.0 to 1.0)
    pub y: f32,
}

impl PointGeometry {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Image center, the default anchor when a producer gives none.
    pub fn center() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// Range selector geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum RangeGeometry {
    /// Select by color similarity around sampled points.
    Color {
        /// Selection tolerance (0.0 to 1.0)
        amount: f32,
        /// Apply the adjustment outside the selection instead.
        invert: bool,
        /// Sampled (x, y) image coordinates defining the target color.
        sample_points: Vec<(f32, f32)>,
    },
    /// Select by luminance band.
    Luminance {
        /// Lower luminance bound (0.0 to 1.0)
        min: f32,
        /// Upper luminance bound (0.0 to 1.0)
        max: f32,
        /// Band edge smoothing (0.0 to 1.0)
        smoothing: f32,
        /// Apply the adjustment outside the band instead.
        invert: bool,
    },
}

/// A mask's spatial definition: exactly one archetype payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskGeometry {
    Radial(RadialGeometry),
    Linear(LinearGeometry),
    Point(PointGeometry),
    Range(RangeGeometry),
}

impl MaskGeometry {
    /// The archetype tag for this payload.
    pub fn archetype(&self) -> GeometryArchetype {
        match self {
            MaskGeometry::Radial(_) => GeometryArchetype::Radial,
            MaskGeometry::Linear(_) => GeometryArchetype::Linear,
            MaskGeometry::Point(_) => GeometryArchetype::Point,
            MaskGeometry::Range(_) => GeometryArchetype::Range,
        }
    }
}

impl Default for MaskGeometry {
    fn default() -> Self {
        MaskGeometry::Point(PointGeometry::center())
    }
}
