//! Minimal profile/"look" encoder.
//!
//! A look is a base-layer color transform meant to sit underneath a full
//! preset, so this encoder deliberately emits only basic tone, white balance,
//! and a camera-profile selection - no masks, curves, or color grading.

use crate::mask::SemanticMaskType;
use crate::model::AdjustmentRecord;
use crate::scaling::{self, clamp_only, ranges, scale, Rounding};
use crate::xml::DocBuilder;

use super::{fmt_exposure, fmt_plain_int, fmt_signed_int};

/// Options for the profile encoder.
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// Strength applied to tone values. Documented default: 0.5, so the look
    /// stays subtle enough to layer a preset on top.
    pub strength: f32,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            strength: scaling::PROFILE_STRENGTH,
        }
    }
}

/// Encode a minimal look document with default options.
pub fn encode_profile(record: &AdjustmentRecord) -> String {
    encode_profile_with(record, &ProfileOptions::default())
}

/// Encode a minimal look document.
pub fn encode_profile_with(record: &AdjustmentRecord, options: &ProfileOptions) -> String {
    let strength = options.strength;
    let monochrome = record.is_monochrome();
    let camera_profile = select_camera_profile(record);
    let mut doc = DocBuilder::new();

    doc.attr_text("crs:PresetType", Some("Look"))
        .attr_text("crs:LookTable", Some("RGB"))
        .attr_text(
            "crs:Treatment",
            Some(if monochrome { "Black & White" } else { "Color" }),
        )
        .attr_text("crs:CameraProfile", Some(camera_profile.as_str()));
    if monochrome {
        doc.attr_text("crs:ConvertToGrayscale", Some("True"));
    }

    doc.attr(
        "crs:Exposure2012",
        scale(record.exposure, ranges::EXPOSURE, strength, Rounding::TwoDecimals)
            .map(fmt_exposure),
    );
    let tone_fields = [
        ("crs:Contrast2012", record.contrast),
        ("crs:Highlights2012", record.highlights),
        ("crs:Shadows2012", record.shadows),
        ("crs:Whites2012", record.whites),
        ("crs:Blacks2012", record.blacks),
        ("crs:Clarity2012", record.clarity),
        ("crs:Vibrance", record.vibrance),
        ("crs:Saturation", record.saturation),
    ];
    for (tag, value) in tone_fields {
        doc.attr(tag, scale(value, ranges::TONE, strength, Rounding::Integer).map(fmt_signed_int));
    }
    doc.attr(
        "crs:Temperature",
        clamp_only(record.temperature, ranges::TEMPERATURE).map(fmt_plain_int),
    );
    doc.attr(
        "crs:Tint",
        scale(record.tint, ranges::TINT, strength, Rounding::Integer).map(fmt_signed_int),
    );

    doc.child_alt_text("crs:Name", Some(record.display_name()));
    doc.child_alt_text("crs:Group", Some("Gradeport Looks"));
    doc.child_alt_text("crs:Description", record.description.as_deref());

    doc.serialize()
}

/// Select the camera profile the look should reference.
///
/// A supplied hint wins if it names a known profile family; otherwise the
/// record's masks are inspected for portrait/landscape signals. The
/// monochrome derivation always wins over both.
fn select_camera_profile(record: &AdjustmentRecord) -> String {
    if record.is_monochrome() {
        return "Adobe Monochrome".to_string();
    }
    if let Some(hint) = &record.camera_profile {
        let lower = hint.to_lowercase();
        if lower.contains("monochrome") {
            return "Adobe Monochrome".to_string();
        }
        if lower.contains("portrait") {
            return "Adobe Portrait".to_string();
        }
        if lower.contains("landscape") {
            return "Adobe Landscape".to_string();
        }
        if lower.contains("color") {
            return "Adobe Color".to_string();
        }
    }
    profile_from_masks(record)
}

fn profile_from_masks(record: &AdjustmentRecord) -> String {
    use SemanticMaskType::*;
    let mut portrait = false;
    let mut landscape = false;
    for mask in &record.masks {
        match mask.mask_type {
            FaceSkin | FaceEyeSclera | FaceIrisPupil | FaceEyebrows | FaceLips | FaceTeeth
            | Hair | Beard | BodySkin | Clothing | Person => portrait = true,
            Sky | Background | Water | Vegetation | Mountains | Architecture | Road | Ground
            | Flowers => landscape = true,
            _ => {}
        }
    }
    // Faces outrank scenery when both are present.
    if portrait {
        "Adobe Portrait".to_string()
    } else if landscape {
        "Adobe Landscape".to_string()
    } else {
        "Adobe Color".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ToneCurve;
    use crate::mask::{Mask, MaskGeometry};
    use crate::model::Treatment;

    #[test]
    fn test_empty_record_is_minimally_valid() {
        let record = AdjustmentRecord::new();
        let xml = encode_profile(&record);
        assert!(xml.contains("crs:PresetType=\"Look\""));
        assert!(xml.contains("crs:Treatment=\"Color\""));
        assert!(xml.contains("crs:CameraProfile=\"Adobe Color\""));
    }

    #[test]
    fn test_profile_strength_halves_tone() {
        let mut record = AdjustmentRecord::new();
        record.contrast = Some(40.0);
        record.exposure = Some(1.0);
        let xml = encode_profile(&record);
        assert!(xml.contains("crs:Contrast2012=\"+20\""));
        assert!(xml.contains("crs:Exposure2012=\"+0.50\""));
    }

    #[test]
    fn test_temperature_not_strength_scaled() {
        let mut record = AdjustmentRecord::new();
        record.temperature = Some(7200.0);
        let xml = encode_profile(&record);
        assert!(xml.contains("crs:Temperature=\"7200\""));
    }

    #[test]
    fn test_omits_curves_grading_and_masks() {
        let mut record = AdjustmentRecord::new();
        record.tone_curves.master = ToneCurve::from_pairs(&[(0, 0), (255, 255)]);
        record.color_grading.shadows.hue = Some(220.0);
        record.masks.push(Mask::from_loose_type("sky", MaskGeometry::default()));
        let xml = encode_profile(&record);
        assert!(!xml.contains("ToneCurve"));
        assert!(!xml.contains("ColorGrade"));
        assert!(!xml.contains("MaskGroupBasedCorrections"));
    }

    // ===== Profile Selection Tests =====

    #[test]
    fn test_hint_keyword_selects_profile() {
        let mut record = AdjustmentRecord::new();
        record.camera_profile = Some("warm portrait film".to_string());
        let xml = encode_profile(&record);
        assert!(xml.contains("crs:CameraProfile=\"Adobe Portrait\""));
    }

    #[test]
    fn test_monochrome_wins_over_hint() {
        let mut record = AdjustmentRecord::new();
        record.camera_profile = Some("landscape".to_string());
        record.treatment = Some(Treatment::Monochrome);
        let xml = encode_profile(&record);
        assert!(xml.contains("crs:CameraProfile=\"Adobe Monochrome\""));
        assert!(xml.contains("crs:ConvertToGrayscale=\"True\""));
    }

    #[test]
    fn test_face_mask_selects_portrait() {
        let mut record = AdjustmentRecord::new();
        record.masks.push(Mask::from_loose_type("face", MaskGeometry::default()));
        let xml = encode_profile(&record);
        assert!(xml.contains("Adobe Portrait"));
    }

    #[test]
    fn test_sky_mask_selects_landscape() {
        let mut record = AdjustmentRecord::new();
        record.masks.push(Mask::from_loose_type("sky", MaskGeometry::default()));
        let xml = encode_profile(&record);
        assert!(xml.contains("Adobe Landscape"));
    }

    #[test]
    fn test_face_outranks_sky() {
        let mut record = AdjustmentRecord::new();
        record.masks.push(Mask::from_loose_type("sky", MaskGeometry::default()));
        record.masks.push(Mask::from_loose_type("face", MaskGeometry::default()));
        let xml = encode_profile(&record);
        assert!(xml.contains("Adobe Portrait"));
    }
}
