//! Competing-format style encoder.
//!
//! Emits the reduced field set the competing editor's style grammar carries:
//! a flat list of `<E K="..." V="..."/>` entries inside an `<SL>` envelope.
//! The full variant covers basic tone, HSL, color grading, grain, and
//! vignette; the basic variant restricts output to bare tone fields only.
//! Variants are distinguished by a filename suffix convention, handled by
//! [`style_file_name`].

use crate::model::{AdjustmentRecord, HueBucket};
use crate::scaling::{self, clamp_only, ranges, scale, Rounding};
use crate::xml::escape;

use super::{fmt_exposure, fmt_plain_int, fmt_signed_int};

/// Which slice of the record the style document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleVariant {
    /// Basic tone, HSL, color grading, grain, vignette.
    #[default]
    Full,
    /// Bare tone fields only.
    Basic,
}

/// Options for the style encoder.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Strength applied to tone values. Documented default: 1.0.
    pub strength: f32,
    pub variant: StyleVariant,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            strength: scaling::PRESET_STRENGTH,
            variant: StyleVariant::Full,
        }
    }
}

/// Suggested file name for a style document, applying the variant suffix
/// convention the target editor expects.
pub fn style_file_name(name: &str, variant: StyleVariant) -> String {
    match variant {
        StyleVariant::Full => format!("{}.costyle", name),
        StyleVariant::Basic => format!("{} Basic.costyle", name),
    }
}

/// Encode a style document with default options for the given variant.
pub fn encode_style(record: &AdjustmentRecord, variant: StyleVariant) -> String {
    encode_style_with(
        record,
        &StyleOptions {
            variant,
            ..Default::default()
        },
    )
}

/// Encode a style document.
pub fn encode_style_with(record: &AdjustmentRecord, options: &StyleOptions) -> String {
    let strength = options.strength;
    let monochrome = record.is_monochrome();

    // Collect (key, value) entries, filter the absent ones, serialize once.
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut push = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            entries.push((key.to_string(), value));
        }
    };

    push("Name", Some(escape(record.display_name())));
    push("Description", record.description.as_deref().map(escape));
    push(
        "Treatment",
        Some(if monochrome { "BlackAndWhite" } else { "Color" }.to_string()),
    );

    // ===== Basic tone (both variants) =====
    push(
        "Exposure",
        scale(record.exposure, ranges::EXPOSURE, strength, Rounding::TwoDecimals)
            .map(fmt_exposure),
    );
    let tone_fields = [
        ("Contrast", record.contrast),
        ("Highlights", record.highlights),
        ("Shadows", record.shadows),
        ("Whites", record.whites),
        ("Blacks", record.blacks),
        ("Clarity", record.clarity),
        ("Vibrance", record.vibrance),
        ("Saturation", record.saturation),
    ];
    for (key, value) in tone_fields {
        push(key, scale(value, ranges::TONE, strength, Rounding::Integer).map(fmt_signed_int));
    }
    push(
        "Temperature",
        clamp_only(record.temperature, ranges::TEMPERATURE).map(fmt_plain_int),
    );
    push(
        "Tint",
        scale(record.tint, ranges::TINT, strength, Rounding::Integer).map(fmt_signed_int),
    );

    if options.variant == StyleVariant::Full {
        // ===== HSL =====
        if !monochrome {
            for bucket in HueBucket::ALL {
                push(
                    &format!("HueAdjustment{}", bucket.label()),
                    clamp_only(record.hsl.hue_for(bucket), ranges::TONE).map(fmt_signed_int),
                );
                push(
                    &format!("SaturationAdjustment{}", bucket.label()),
                    scale(
                        record.hsl.saturation_for(bucket),
                        ranges::TONE,
                        strength,
                        Rounding::Integer,
                    )
                    .map(fmt_signed_int),
                );
                push(
                    &format!("LuminanceAdjustment{}", bucket.label()),
                    scale(
                        record.hsl.luminance_for(bucket),
                        ranges::TONE,
                        strength,
                        Rounding::Integer,
                    )
                    .map(fmt_signed_int),
                );
            }
        }

        // ===== Color grading =====
        let wheels = [
            ("Shadow", &record.color_grading.shadows),
            ("Midtone", &record.color_grading.midtones),
            ("Highlight", &record.color_grading.highlights),
            ("Global", &record.color_grading.global),
        ];
        for (label, wheel) in wheels {
            push(
                &format!("ColorGrade{}Hue", label),
                clamp_only(wheel.hue, ranges::WHEEL_HUE).map(fmt_plain_int),
            );
            push(
                &format!("ColorGrade{}Sat", label),
                scale(wheel.saturation, ranges::WHEEL_SATURATION, strength, Rounding::Integer)
                    .map(fmt_plain_int),
            );
            push(
                &format!("ColorGrade{}Lum", label),
                scale(wheel.luminance, ranges::TONE, strength, Rounding::Integer)
                    .map(fmt_signed_int),
            );
        }

        // ===== Grain & vignette =====
        push(
            "GrainAmount",
            scale(record.grain.amount, ranges::PERCENT, strength, Rounding::Integer)
                .map(fmt_plain_int),
        );
        push(
            "GrainSize",
            clamp_only(record.grain.size, ranges::PERCENT).map(fmt_plain_int),
        );
        push(
            "VignetteAmount",
            scale(record.vignette.amount, ranges::TONE, strength, Rounding::Integer)
                .map(fmt_signed_int),
        );
        push(
            "VignetteMidpoint",
            clamp_only(record.vignette.midpoint, ranges::PERCENT).map(fmt_plain_int),
        );
    }

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<SL Engine=\"1300\">\n");
    for (key, value) in entries {
        out.push_str(&format!("  <E K=\"{}\" V=\"{}\"/>\n", key, value));
    }
    out.push_str("</SL>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_minimally_valid() {
        let record = AdjustmentRecord::new();
        let text = encode_style(&record, StyleVariant::Full);
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<E K=\"Name\" V=\"Untitled Grade\"/>"));
        assert!(text.contains("<E K=\"Treatment\" V=\"Color\"/>"));
        assert!(!text.contains("Exposure"));
    }

    #[test]
    fn test_full_variant_carries_hsl_and_grading() {
        let mut record = AdjustmentRecord::new();
        record.contrast = Some(25.0);
        record.hsl.saturation[HueBucket::Aqua.index()] = Some(-30.0);
        record.color_grading.shadows.hue = Some(220.0);
        record.color_grading.shadows.saturation = Some(15.0);
        let text = encode_style(&record, StyleVariant::Full);
        assert!(text.contains("<E K=\"Contrast\" V=\"+25\"/>"));
        assert!(text.contains("<E K=\"SaturationAdjustmentAqua\" V=\"-30\"/>"));
        assert!(text.contains("<E K=\"ColorGradeShadowHue\" V=\"220\"/>"));
    }

    #[test]
    fn test_basic_variant_restricts_to_tone() {
        let mut record = AdjustmentRecord::new();
        record.contrast = Some(25.0);
        record.hsl.saturation[HueBucket::Aqua.index()] = Some(-30.0);
        record.grain.amount = Some(40.0);
        let text = encode_style(&record, StyleVariant::Basic);
        assert!(text.contains("<E K=\"Contrast\" V=\"+25\"/>"));
        assert!(!text.contains("SaturationAdjustmentAqua"));
        assert!(!text.contains("GrainAmount"));
    }

    #[test]
    fn test_monochrome_suppresses_hsl() {
        let mut record = AdjustmentRecord::new();
        record.monochrome = Some(true);
        record.hsl.hue[HueBucket::Red.index()] = Some(10.0);
        let text = encode_style(&record, StyleVariant::Full);
        assert!(text.contains("<E K=\"Treatment\" V=\"BlackAndWhite\"/>"));
        assert!(!text.contains("HueAdjustmentRed"));
    }

    #[test]
    fn test_file_name_suffix_convention() {
        assert_eq!(style_file_name("Golden Hour", StyleVariant::Full), "Golden Hour.costyle");
        assert_eq!(
            style_file_name("Golden Hour", StyleVariant::Basic),
            "Golden Hour Basic.costyle"
        );
    }

    #[test]
    fn test_name_is_escaped() {
        let mut record = AdjustmentRecord::new();
        record.name = Some("Salt & Pepper".to_string());
        let text = encode_style(&record, StyleVariant::Basic);
        assert!(text.contains("V=\"Salt &amp; Pepper\""));
    }
}
