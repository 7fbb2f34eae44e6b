//! Gradeport Core - Color-adjustment preset codec
//!
//! This crate provides the core preset functionality for Gradeport: the
//! canonical adjustment record, preset/look/style encoders, a round-trip
//! preset decoder, and 3D LUT export.

pub mod adjust;
pub mod curve;
pub mod decode;
pub mod encode;
pub mod lut;
pub mod mask;
pub mod model;
pub mod scaling;
pub mod xml;

pub use curve::{CurvePoint, ToneCurve, ToneCurveSet};
pub use decode::{parse_preset, DecodedPreset, PresetParseError};
pub use encode::{
    encode_preset, encode_preset_with, encode_profile, encode_profile_with, encode_style,
    encode_style_with, style_file_name, PresetOptions, ProfileOptions, StyleOptions, StyleVariant,
};
pub use lut::{sample_grid, write_lut, LutFormat};
pub use mask::{Mask, MaskAdjustments, MaskGeometry, MaskRegistry, SemanticMaskType};
pub use model::{AdjustmentRecord, HueBucket, Treatment};
