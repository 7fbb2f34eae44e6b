//! Canonical color-grade model.
//!
//! An [`AdjustmentRecord`] is the single, format-agnostic representation of a
//! photographic color grade. Every encoder consumes it read-only; the decoder
//! produces one. All value fields are `Option<f32>` so that "absent" stays
//! distinct from zero - absent fields are omitted from every encoding rather
//! than defaulted.

use serde::{Deserialize, Serialize};

use crate::curve::ToneCurveSet;
use crate::mask::Mask;

/// Rendering treatment for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Treatment {
    /// Normal color rendering.
    Color,
    /// Black & white rendering (HSL block replaced by the gray mixer).
    Monochrome,
}

/// The 8 named hue buckets used by the HSL block and the gray mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueBucket {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HueBucket {
    /// All buckets in canonical order.
    pub const ALL: [HueBucket; 8] = [
        HueBucket::Red,
        HueBucket::Orange,
        HueBucket::Yellow,
        HueBucket::Green,
        HueBucket::Aqua,
        HueBucket::Blue,
        HueBucket::Purple,
        HueBucket::Magenta,
    ];

    /// Capitalized label used in exported tag names (e.g. "Red").
    pub fn label(self) -> &'static str {
        match self {
            HueBucket::Red => "Red",
            HueBucket::Orange => "Orange",
            HueBucket::Yellow => "Yellow",
            HueBucket::Green => "Green",
            HueBucket::Aqua => "Aqua",
            HueBucket::Blue => "Blue",
            HueBucket::Purple => "Purple",
            HueBucket::Magenta => "Magenta",
        }
    }

    /// Index into the parallel per-bucket arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            HueBucket::Red => 0,
            HueBucket::Orange => 1,
            HueBucket::Yellow => 2,
            HueBucket::Green => 3,
            HueBucket::Aqua => 4,
            HueBucket::Blue => 5,
            HueBucket::Purple => 6,
            HueBucket::Magenta => 7,
        }
    }
}

/// Per-hue-bucket HSL adjustments, active only for color grades.
///
/// Three parallel scalar sets (hue shift, saturation shift, luminance shift),
/// each -100 to 100, indexed by [`HueBucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HueAdjustments {
    /// Hue shift per bucket (-100 to 100)
    pub hue: [Option<f32>; 8],
    /// Saturation shift per bucket (-100 to 100)
    pub saturation: [Option<f32>; 8],
    /// Luminance shift per bucket (-100 to 100)
    pub luminance: [Option<f32>; 8],
}

impl HueAdjustments {
    pub fn hue_for(&self, bucket: HueBucket) -> Option<f32> {
        self.hue[bucket.index()]
    }

    pub fn saturation_for(&self, bucket: HueBucket) -> Option<f32> {
        self.saturation[bucket.index()]
    }

    pub fn luminance_for(&self, bucket: HueBucket) -> Option<f32> {
        self.luminance[bucket.index()]
    }

    /// True when no bucket carries any adjustment.
    pub fn is_empty(&self) -> bool {
        self.hue.iter().all(Option::is_none)
            && self.saturation.iter().all(Option::is_none)
            && self.luminance.iter().all(Option::is_none)
    }
}

/// Per-hue-bucket luminance mix, active only for monochrome grades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrayMixer {
    /// Luminance mix per bucket (-100 to 100)
    pub mix: [Option<f32>; 8],
}

impl GrayMixer {
    pub fn mix_for(&self, bucket: HueBucket) -> Option<f32> {
        self.mix[bucket.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.mix.iter().all(Option::is_none)
    }
}

/// One color-grading wheel (a hue/saturation/luminance triplet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorWheel {
    /// Hue angle (0 to 360)
    pub hue: Option<f32>,
    /// Saturation (0 to 100)
    pub saturation: Option<f32>,
    /// Luminance (-100 to 100)
    pub luminance: Option<f32>,
}

impl ColorWheel {
    pub fn is_empty(&self) -> bool {
        self.hue.is_none() && self.saturation.is_none() && self.luminance.is_none()
    }
}

/// Color grading scoped to tonal ranges, independent of the HSL block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorGrading {
    pub shadows: ColorWheel,
    pub midtones: ColorWheel,
    pub highlights: ColorWheel,
    pub global: ColorWheel,
    /// Blending between adjacent tonal ranges (0 to 100)
    pub blending: Option<f32>,
    /// Shadow/highlight balance (-100 to 100)
    pub balance: Option<f32>,
}

impl ColorGrading {
    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
            && self.midtones.is_empty()
            && self.highlights.is_empty()
            && self.global.is_empty()
            && self.blending.is_none()
            && self.balance.is_none()
    }
}

/// One independent point-color correction vector.
///
/// Stored as the raw 1D vector of floats the target format expects; the codec
/// passes it through without interpreting individual components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointColor(pub Vec<f32>);

/// Film grain settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grain {
    /// Grain amount (0 to 100)
    pub amount: Option<f32>,
    /// Grain size (0 to 100)
    pub size: Option<f32>,
    /// Grain frequency / roughness (0 to 100)
    pub frequency: Option<f32>,
}

impl Grain {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.size.is_none() && self.frequency.is_none()
    }
}

/// Post-crop vignette settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vignette {
    /// Vignette amount (-100 to 100)
    pub amount: Option<f32>,
    /// Midpoint (0 to 100)
    pub midpoint: Option<f32>,
    /// Feather (0 to 100)
    pub feather: Option<f32>,
    /// Roundness (-100 to 100)
    pub roundness: Option<f32>,
    /// Vignette style (0, 1 or 2)
    pub style: Option<u8>,
    /// Highlight contrast preservation (0 to 100)
    pub highlight_contrast: Option<f32>,
}

impl Vignette {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.midpoint.is_none()
            && self.feather.is_none()
            && self.roundness.is_none()
            && self.style.is_none()
            && self.highlight_contrast.is_none()
    }
}

/// The canonical adjustment record: one flat record per color grade.
///
/// Created by an external producer (the analysis collaborator or the preset
/// decoder), immutable input to each encoder, never mutated by the codec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    // ===== Basic tone =====
    /// Exposure adjustment (-5 to 5 stops)
    pub exposure: Option<f32>,
    /// Contrast (-100 to 100)
    pub contrast: Option<f32>,
    /// Highlights (-100 to 100)
    pub highlights: Option<f32>,
    /// Shadows (-100 to 100)
    pub shadows: Option<f32>,
    /// Whites (-100 to 100)
    pub whites: Option<f32>,
    /// Blacks (-100 to 100)
    pub blacks: Option<f32>,
    /// Clarity (-100 to 100)
    pub clarity: Option<f32>,
    /// Vibrance (-100 to 100)
    pub vibrance: Option<f32>,
    /// Saturation (-100 to 100)
    pub saturation: Option<f32>,
    /// White balance temperature in Kelvin (2000 to 50000)
    pub temperature: Option<f32>,
    /// White balance tint (-150 to 150)
    pub tint: Option<f32>,

    // ===== Rendering mode =====
    /// Explicit treatment, when the producer stated one.
    pub treatment: Option<Treatment>,
    /// Explicit monochrome flag, independent of `treatment`.
    pub monochrome: Option<bool>,
    /// Free-text camera profile hint (e.g. "Adobe Portrait").
    pub camera_profile: Option<String>,

    // ===== Color blocks =====
    /// Per-hue HSL adjustments (color grades only).
    #[serde(default)]
    pub hsl: HueAdjustments,
    /// Per-hue luminance mix (monochrome grades only).
    #[serde(default)]
    pub gray_mixer: GrayMixer,
    /// Shadow/midtone/highlight/global color grading.
    #[serde(default)]
    pub color_grading: ColorGrading,

    // ===== Curves & point colors =====
    /// Master/red/green/blue tone curves.
    #[serde(default)]
    pub tone_curves: ToneCurveSet,
    /// Up to 4 independent point-color correction vectors.
    #[serde(default)]
    pub point_colors: Vec<PointColor>,

    // ===== Effects =====
    #[serde(default)]
    pub grain: Grain,
    #[serde(default)]
    pub vignette: Vignette,

    // ===== Local masks =====
    /// Ordered local masks; encoders emit at most [`MAX_EXPORTED_MASKS`].
    #[serde(default)]
    pub masks: Vec<Mask>,

    // ===== Metadata =====
    /// Short display name for the grade.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Producer confidence score (provenance only, never re-encoded).
    pub confidence: Option<f32>,
    /// Producer reasoning (provenance only, never re-encoded).
    pub reasoning: Option<String>,
}

/// Practical cap on the number of masks an encoder will emit.
pub const MAX_EXPORTED_MASKS: usize = 3;

/// Profile-name substrings that signal a monochrome rendering intent.
const MONOCHROME_PROFILE_KEYWORDS: [&str; 3] = ["monochrome", "black & white", "b&w"];

impl AdjustmentRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived monochrome predicate used by every encoder.
    ///
    /// A record is monochrome when ANY of four independent signals is true:
    /// 1. the explicit `monochrome` flag
    /// 2. `treatment` is [`Treatment::Monochrome`]
    /// 3. the camera profile name contains a monochrome keyword
    /// 4. `saturation` is at or below -100 (full desaturation)
    ///
    /// Monochrome and color are mutually exclusive for encoding: when this
    /// returns true the gray mixer is emitted and the HSL block suppressed.
    pub fn is_monochrome(&self) -> bool {
        if self.monochrome == Some(true) {
            return true;
        }
        if self.treatment == Some(Treatment::Monochrome) {
            return true;
        }
        if let Some(profile) = &self.camera_profile {
            let lower = profile.to_lowercase();
            if MONOCHROME_PROFILE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                return true;
            }
        }
        matches!(self.saturation, Some(s) if s <= -100.0)
    }

    /// Display name with a fallback for unnamed grades.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled Grade")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Monochrome Derivation Tests =====

    #[test]
    fn test_default_record_is_color() {
        let record = AdjustmentRecord::new();
        assert!(!record.is_monochrome());
    }

    #[test]
    fn test_explicit_flag_forces_monochrome() {
        let mut record = AdjustmentRecord::new();
        record.monochrome = Some(true);
        assert!(record.is_monochrome());
    }

    #[test]
    fn test_treatment_forces_monochrome() {
        let mut record = AdjustmentRecord::new();
        record.treatment = Some(Treatment::Monochrome);
        assert!(record.is_monochrome());
    }

    #[test]
    fn test_profile_keyword_forces_monochrome() {
        let mut record = AdjustmentRecord::new();
        record.camera_profile = Some("Adobe Monochrome".to_string());
        assert!(record.is_monochrome());

        record.camera_profile = Some("Classic B&W Film".to_string());
        assert!(record.is_monochrome());
    }

    #[test]
    fn test_full_desaturation_forces_monochrome() {
        let mut record = AdjustmentRecord::new();
        record.saturation = Some(-100.0);
        assert!(record.is_monochrome());
    }

    #[test]
    fn test_partial_desaturation_stays_color() {
        let mut record = AdjustmentRecord::new();
        record.saturation = Some(-99.0);
        assert!(!record.is_monochrome());
    }

    #[test]
    fn test_explicit_color_treatment_does_not_override_other_signals() {
        // Any single true signal wins, even with treatment = color.
        let mut record = AdjustmentRecord::new();
        record.treatment = Some(Treatment::Color);
        record.saturation = Some(-100.0);
        assert!(record.is_monochrome());
    }

    // ===== Helper Tests =====

    #[test]
    fn test_display_name_fallback() {
        let mut record = AdjustmentRecord::new();
        assert_eq!(record.display_name(), "Untitled Grade");

        record.name = Some("Golden Hour".to_string());
        assert_eq!(record.display_name(), "Golden Hour");
    }

    #[test]
    fn test_hue_adjustments_empty() {
        let mut hsl = HueAdjustments::default();
        assert!(hsl.is_empty());

        hsl.saturation[HueBucket::Blue.index()] = Some(15.0);
        assert!(!hsl.is_empty());
        assert_eq!(hsl.saturation_for(HueBucket::Blue), Some(15.0));
        assert_eq!(hsl.saturation_for(HueBucket::Red), None);
    }

    #[test]
    fn test_bucket_order_matches_labels() {
        let labels: Vec<&str> = HueBucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            vec!["Red", "Orange", "Yellow", "Green", "Aqua", "Blue", "Purple", "Magenta"]
        );
        for (i, bucket) in HueBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }

    #[test]
    fn test_color_grading_empty() {
        let mut grading = ColorGrading::default();
        assert!(grading.is_empty());

        grading.shadows.hue = Some(220.0);
        assert!(!grading.is_empty());
    }
}
