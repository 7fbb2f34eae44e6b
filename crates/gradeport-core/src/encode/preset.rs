//! Full preset encoder.
//!
//! Emits every populated field group of a record as a metadata-namespaced
//! preset document: basic tone, HSL or gray mixer (chosen by the monochrome
//! derivation), color grading, tone curves, point colors, grain, vignette,
//! and up to three local masks resolved through the mask registry.

use crate::curve::ToneCurve;
use crate::mask::{Mask, MaskGeometry, MaskRegistry, RangeGeometry};
use crate::model::{AdjustmentRecord, HueBucket, MAX_EXPORTED_MASKS};
use crate::scaling::{self, clamp_only, ranges, scale, Rounding};
use crate::xml::{escape, DocBuilder};

use super::{fmt_coord, fmt_exposure, fmt_plain_int, fmt_signed_int};

/// Options for the full preset encoder.
#[derive(Debug, Clone)]
pub struct PresetOptions {
    /// Strength applied to global adjustments. Documented default: 1.0.
    pub strength: f32,
    /// Strength applied to per-mask local adjustments. Documented
    /// default: 0.35, so local edits stay subtle relative to global ones.
    pub local_strength: f32,
    /// Preset group shown by the target editor.
    pub group: String,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            strength: scaling::PRESET_STRENGTH,
            local_strength: scaling::LOCAL_STRENGTH,
            group: "Gradeport".to_string(),
        }
    }
}

/// Encode a full preset with default options.
pub fn encode_preset(record: &AdjustmentRecord) -> String {
    encode_preset_with(record, &PresetOptions::default())
}

/// Encode a full preset document.
pub fn encode_preset_with(record: &AdjustmentRecord, options: &PresetOptions) -> String {
    let strength = options.strength;
    let monochrome = record.is_monochrome();
    let mut doc = DocBuilder::new();

    doc.attr_text("crs:PresetType", Some("Normal"))
        .attr_text("crs:ProcessVersion", Some("11.0"))
        .attr_text(
            "crs:Treatment",
            Some(if monochrome { "Black & White" } else { "Color" }),
        );
    if monochrome {
        doc.attr_text("crs:ConvertToGrayscale", Some("True"));
    }
    doc.attr_text("crs:CameraProfile", record.camera_profile.as_deref());

    // ===== Basic tone =====
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
    // Temperature is an absolute Kelvin quantity, clamped but never
    // strength-scaled (halving 5500 K would change the hue, not the amount).
    doc.attr(
        "crs:Temperature",
        clamp_only(record.temperature, ranges::TEMPERATURE).map(fmt_plain_int),
    );
    doc.attr(
        "crs:Tint",
        scale(record.tint, ranges::TINT, strength, Rounding::Integer).map(fmt_signed_int),
    );

    // ===== HSL block or gray mixer =====
    if monochrome {
        for bucket in HueBucket::ALL {
            doc.attr(
                &format!("crs:GrayMixer{}", bucket.label()),
                scale(
                    record.gray_mixer.mix_for(bucket),
                    ranges::TONE,
                    strength,
                    Rounding::Integer,
                )
                .map(fmt_signed_int),
            );
        }
    } else {
        for bucket in HueBucket::ALL {
            // Hue shifts are rotations: clamped, never strength-scaled.
            doc.attr(
                &format!("crs:HueAdjustment{}", bucket.label()),
                clamp_only(record.hsl.hue_for(bucket), ranges::TONE).map(fmt_signed_int),
            );
        }
        for bucket in HueBucket::ALL {
            doc.attr(
                &format!("crs:SaturationAdjustment{}", bucket.label()),
                scale(
                    record.hsl.saturation_for(bucket),
                    ranges::TONE,
                    strength,
                    Rounding::Integer,
                )
                .map(fmt_signed_int),
            );
        }
        for bucket in HueBucket::ALL {
            doc.attr(
                &format!("crs:LuminanceAdjustment{}", bucket.label()),
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
        doc.attr(
            &format!("crs:ColorGrade{}Hue", label),
            clamp_only(wheel.hue, ranges::WHEEL_HUE).map(fmt_plain_int),
        );
        doc.attr(
            &format!("crs:ColorGrade{}Sat", label),
            scale(wheel.saturation, ranges::WHEEL_SATURATION, strength, Rounding::Integer)
                .map(fmt_plain_int),
        );
        doc.attr(
            &format!("crs:ColorGrade{}Lum", label),
            scale(wheel.luminance, ranges::TONE, strength, Rounding::Integer)
                .map(fmt_signed_int),
        );
    }
    doc.attr(
        "crs:ColorGradeBlending",
        clamp_only(record.color_grading.blending, ranges::PERCENT).map(fmt_plain_int),
    );
    doc.attr(
        "crs:ColorGradeBalance",
        scale(record.color_grading.balance, ranges::TONE, strength, Rounding::Integer)
            .map(fmt_signed_int),
    );

    // ===== Grain =====
    doc.attr(
        "crs:GrainAmount",
        scale(record.grain.amount, ranges::PERCENT, strength, Rounding::Integer)
            .map(fmt_plain_int),
    );
    doc.attr(
        "crs:GrainSize",
        clamp_only(record.grain.size, ranges::PERCENT).map(fmt_plain_int),
    );
    doc.attr(
        "crs:GrainFrequency",
        clamp_only(record.grain.frequency, ranges::PERCENT).map(fmt_plain_int),
    );

    // ===== Vignette =====
    doc.attr(
        "crs:PostCropVignetteAmount",
        scale(record.vignette.amount, ranges::TONE, strength, Rounding::Integer)
            .map(fmt_signed_int),
    );
    doc.attr(
        "crs:PostCropVignetteMidpoint",
        clamp_only(record.vignette.midpoint, ranges::PERCENT).map(fmt_plain_int),
    );
    doc.attr(
        "crs:PostCropVignetteFeather",
        clamp_only(record.vignette.feather, ranges::PERCENT).map(fmt_plain_int),
    );
    doc.attr(
        "crs:PostCropVignetteRoundness",
        clamp_only(record.vignette.roundness, ranges::TONE).map(fmt_signed_int),
    );
    doc.attr(
        "crs:PostCropVignetteStyle",
        record.vignette.style.map(|s| s.min(2).to_string()),
    );
    doc.attr(
        "crs:PostCropVignetteHighlightContrast",
        scale(
            record.vignette.highlight_contrast,
            ranges::PERCENT,
            strength,
            Rounding::Integer,
        )
        .map(fmt_plain_int),
    );

    // ===== Children: metadata, curves, point colors, masks =====
    doc.child_alt_text("crs:Name", Some(record.display_name()));
    doc.child_alt_text("crs:Group", Some(options.group.as_str()));
    doc.child_alt_text("crs:Description", record.description.as_deref());

    append_curves(&mut doc, record);
    doc.child("crs:PointColors", point_colors_body(record));
    doc.child("crs:MaskGroupBasedCorrections", masks_body(record, options));

    doc.serialize()
}

fn append_curves(doc: &mut DocBuilder, record: &AdjustmentRecord) {
    let curves: [(&str, &ToneCurve); 4] = [
        ("crs:ToneCurvePV2012", &record.tone_curves.master),
        ("crs:ToneCurvePV2012Red", &record.tone_curves.red),
        ("crs:ToneCurvePV2012Green", &record.tone_curves.green),
        ("crs:ToneCurvePV2012Blue", &record.tone_curves.blue),
    ];
    for (tag, curve) in curves {
        // Empty curves serialize to an empty string, which child() drops.
        doc.child(tag, curve.to_sequence_text());
    }
}

fn point_colors_body(record: &AdjustmentRecord) -> String {
    if record.point_colors.is_empty() {
        return String::new();
    }
    let mut body = String::from("<rdf:Seq>\n");
    for point_color in record.point_colors.iter().take(4) {
        let values: Vec<String> = point_color
            .0
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| v.to_string())
            .collect();
        if values.is_empty() {
            continue;
        }
        body.push_str(&format!("     <rdf:li>{}</rdf:li>\n", values.join(", ")));
    }
    if !body.contains("<rdf:li>") {
        return String::new();
    }
    body.push_str("    </rdf:Seq>");
    body
}

fn masks_body(record: &AdjustmentRecord, options: &PresetOptions) -> String {
    if record.masks.is_empty() {
        return String::new();
    }
    let registry = MaskRegistry::global();
    let mut body = String::from("<rdf:Seq>\n");
    for mask in record.masks.iter().take(MAX_EXPORTED_MASKS) {
        body.push_str("     <rdf:li>\n      <rdf:Description");
        for (name, value) in mask_attrs(mask, registry, options.local_strength) {
            body.push_str(&format!("\n       {}=\"{}\"", name, value));
        }
        body.push_str("/>\n     </rdf:li>\n");
    }
    body.push_str("    </rdf:Seq>");
    body
}

/// Attribute list for one mask correction block: registry codes, scaled
/// local adjustments, and the geometry payload for the mask's archetype.
fn mask_attrs(
    mask: &Mask,
    registry: &MaskRegistry,
    local_strength: f32,
) -> Vec<(String, String)> {
    let info = registry.resolve(mask.mask_type);
    let mut attrs: Vec<(String, String)> = vec![
        ("crs:What".into(), "Correction".into()),
        ("crs:CorrectionName".into(), escape(&mask.display_name())),
        ("crs:CorrectionActive".into(), "True".into()),
        ("crs:MaskType".into(), info.type_code.to_string()),
        ("crs:MaskSubType".into(), info.subtype_code.to_string()),
    ];

    let local = &mask.adjustments;
    let mut push = |name: &str, value: Option<String>| {
        if let Some(value) = value {
            attrs.push((name.to_string(), value));
        }
    };
    push(
        "crs:LocalExposure2012",
        scale(local.exposure, ranges::EXPOSURE, local_strength, Rounding::TwoDecimals)
            .map(fmt_exposure),
    );
    let local_tone = [
        ("crs:LocalContrast2012", local.contrast),
        ("crs:LocalHighlights2012", local.highlights),
        ("crs:LocalShadows2012", local.shadows),
        ("crs:LocalWhites2012", local.whites),
        ("crs:LocalBlacks2012", local.blacks),
        ("crs:LocalClarity2012", local.clarity),
        ("crs:LocalSaturation", local.saturation),
        ("crs:LocalTemperature", local.temperature),
        ("crs:LocalTint", local.tint),
    ];
    for (tag, value) in local_tone {
        push(tag, scale(value, ranges::TONE, local_strength, Rounding::Integer).map(fmt_signed_int));
    }

    match &mask.geometry {
        MaskGeometry::Point(point) => {
            push("crs:ReferenceX", Some(fmt_coord(point.x)));
            push("crs:ReferenceY", Some(fmt_coord(point.y)));
        }
        MaskGeometry::Radial(radial) => {
            push("crs:Top", Some(fmt_coord(radial.top)));
            push("crs:Left", Some(fmt_coord(radial.left)));
            push("crs:Bottom", Some(fmt_coord(radial.bottom)));
            push("crs:Right", Some(fmt_coord(radial.right)));
            push("crs:Angle", Some(format!("{:.2}", radial.angle)));
            push("crs:Feather", Some(fmt_coord(radial.feather)));
        }
        MaskGeometry::Linear(linear) => {
            push("crs:ZeroX", Some(fmt_coord(linear.zero_x)));
            push("crs:ZeroY", Some(fmt_coord(linear.zero_y)));
            push("crs:FullX", Some(fmt_coord(linear.full_x)));
            push("crs:FullY", Some(fmt_coord(linear.full_y)));
        }
        MaskGeometry::Range(RangeGeometry::Color {
            amount,
            invert,
            sample_points,
        }) => {
            push("crs:RangeAmount", Some(fmt_coord(amount.clamp(0.0, 1.0))));
            push(
                "crs:RangeInvert",
                Some(if *invert { "True" } else { "False" }.to_string()),
            );
            let samples: Vec<String> = sample_points
                .iter()
                .map(|(x, y)| format!("{:.6},{:.6}", x, y))
                .collect();
            if !samples.is_empty() {
                push("crs:SamplePoints", Some(samples.join(";")));
            }
        }
        MaskGeometry::Range(RangeGeometry::Luminance {
            min,
            max,
            smoothing,
            invert,
        }) => {
            push("crs:LumMin", Some(fmt_coord(min.clamp(0.0, 1.0))));
            push("crs:LumMax", Some(fmt_coord(max.clamp(0.0, 1.0))));
            push("crs:LumSmoothing", Some(fmt_coord(smoothing.clamp(0.0, 1.0))));
            push(
                "crs:RangeInvert",
                Some(if *invert { "True" } else { "False" }.to_string()),
            );
        }
    }

    attrs
}
