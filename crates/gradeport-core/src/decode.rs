//! Preset decoder.
//!
//! Parses a preset/look document back into an [`AdjustmentRecord`]. The
//! decoder is lossy-tolerant by design: any field it cannot find is simply
//! absent in the resulting record. The only failures are structural - text
//! that is not a recognizable look/profile document at all.

use thiserror::Error;

use crate::curve::ToneCurve;
use crate::mask::{
    LinearGeometry, Mask, MaskAdjustments, MaskGeometry, MaskRegistry, PointGeometry,
    RadialGeometry, RangeGeometry,
};
use crate::model::{AdjustmentRecord, HueBucket, PointColor, Treatment};
use crate::xml::{element_attrs, element_inner, element_inners, unescape, Attrs};

/// Namespace marker every document produced by this codec carries.
const CRS_NAMESPACE: &str = "http://ns.adobe.com/camera-raw-settings/1.0/";
/// RGB look-table marker carried by profile/look documents.
const LOOK_TABLE_MARKER: &str = "crs:LookTable";

/// Error types for preset parsing.
#[derive(Debug, Error)]
pub enum PresetParseError {
    /// The text carries neither the settings namespace nor a look-table
    /// marker, so it is not a document this codec understands.
    #[error("not a recognizable look/profile document")]
    UnrecognizedDocument,

    /// Recognized wrapper but no description block to read settings from.
    #[error("document has no description block")]
    MissingDescription,
}

/// Result of a successful parse.
#[derive(Debug, Clone, Default)]
pub struct DecodedPreset {
    /// The reconstructed record. Fields the document does not carry are
    /// absent, never defaulted.
    pub record: AdjustmentRecord,
    /// Display name, when the document carries one.
    pub name: Option<String>,
    /// Free-text description, when present.
    pub description: Option<String>,
}

/// Parse a preset or look document.
pub fn parse_preset(text: &str) -> Result<DecodedPreset, PresetParseError> {
    if !text.contains(CRS_NAMESPACE) && !text.contains(LOOK_TABLE_MARKER) {
        return Err(PresetParseError::UnrecognizedDocument);
    }

    let attrs = element_attrs(text, "rdf:Description");
    if attrs.is_empty() {
        return Err(PresetParseError::MissingDescription);
    }

    let mut record = AdjustmentRecord::new();

    // ===== Rendering mode =====
    record.treatment = match attrs.get_text("crs:Treatment").as_deref() {
        Some("Black & White") => Some(Treatment::Monochrome),
        Some("Color") => Some(Treatment::Color),
        _ => None,
    };
    if attrs.get_bool("crs:ConvertToGrayscale") == Some(true) {
        record.monochrome = Some(true);
    }
    record.camera_profile = attrs.get_text("crs:CameraProfile");

    // ===== Basic tone =====
    record.exposure = attrs.get_f32("crs:Exposure2012");
    record.contrast = attrs.get_f32("crs:Contrast2012");
    record.highlights = attrs.get_f32("crs:Highlights2012");
    record.shadows = attrs.get_f32("crs:Shadows2012");
    record.whites = attrs.get_f32("crs:Whites2012");
    record.blacks = attrs.get_f32("crs:Blacks2012");
    record.clarity = attrs.get_f32("crs:Clarity2012");
    record.vibrance = attrs.get_f32("crs:Vibrance");
    record.saturation = attrs.get_f32("crs:Saturation");
    record.temperature = attrs.get_f32("crs:Temperature");
    record.tint = attrs.get_f32("crs:Tint");

    // ===== HSL block & gray mixer =====
    for bucket in HueBucket::ALL {
        let i = bucket.index();
        record.hsl.hue[i] = attrs.get_f32(&format!("crs:HueAdjustment{}", bucket.label()));
        record.hsl.saturation[i] =
            attrs.get_f32(&format!("crs:SaturationAdjustment{}", bucket.label()));
        record.hsl.luminance[i] =
            attrs.get_f32(&format!("crs:LuminanceAdjustment{}", bucket.label()));
        record.gray_mixer.mix[i] = attrs.get_f32(&format!("crs:GrayMixer{}", bucket.label()));
    }

    // ===== Color grading =====
    {
        let grading = &mut record.color_grading;
        let wheels = [
            ("Shadow", &mut grading.shadows),
            ("Midtone", &mut grading.midtones),
            ("Highlight", &mut grading.highlights),
            ("Global", &mut grading.global),
        ];
        for (label, wheel) in wheels {
            wheel.hue = attrs.get_f32(&format!("crs:ColorGrade{}Hue", label));
            wheel.saturation = attrs.get_f32(&format!("crs:ColorGrade{}Sat", label));
            wheel.luminance = attrs.get_f32(&format!("crs:ColorGrade{}Lum", label));
        }
        grading.blending = attrs.get_f32("crs:ColorGradeBlending");
        grading.balance = attrs.get_f32("crs:ColorGradeBalance");
    }

    // ===== Grain & vignette =====
    record.grain.amount = attrs.get_f32("crs:GrainAmount");
    record.grain.size = attrs.get_f32("crs:GrainSize");
    record.grain.frequency = attrs.get_f32("crs:GrainFrequency");
    record.vignette.amount = attrs.get_f32("crs:PostCropVignetteAmount");
    record.vignette.midpoint = attrs.get_f32("crs:PostCropVignetteMidpoint");
    record.vignette.feather = attrs.get_f32("crs:PostCropVignetteFeather");
    record.vignette.roundness = attrs.get_f32("crs:PostCropVignetteRoundness");
    record.vignette.style = attrs.get_u8("crs:PostCropVignetteStyle");
    record.vignette.highlight_contrast = attrs.get_f32("crs:PostCropVignetteHighlightContrast");

    // ===== Curves =====
    record.tone_curves.master = parse_curve(text, "crs:ToneCurvePV2012");
    record.tone_curves.red = parse_curve(text, "crs:ToneCurvePV2012Red");
    record.tone_curves.green = parse_curve(text, "crs:ToneCurvePV2012Green");
    record.tone_curves.blue = parse_curve(text, "crs:ToneCurvePV2012Blue");

    // ===== Point colors =====
    if let Some(body) = element_inner(text, "crs:PointColors") {
        for li in element_inners(body, "rdf:li") {
            let values: Vec<f32> = li
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect();
            if !values.is_empty() {
                record.point_colors.push(PointColor(values));
            }
        }
    }

    // ===== Masks =====
    if let Some(body) = element_inner(text, "crs:MaskGroupBasedCorrections") {
        for li in element_inners(body, "rdf:li") {
            if let Some(mask) = parse_mask_block(li) {
                record.masks.push(mask);
            }
        }
    }

    // ===== Metadata =====
    let name = alt_text(text, "crs:Name");
    let description = alt_text(text, "crs:Description");
    record.name = name.clone();
    record.description = description.clone();

    Ok(DecodedPreset {
        record,
        name,
        description,
    })
}

fn parse_curve(text: &str, tag: &str) -> ToneCurve {
    match element_inner(text, tag) {
        Some(body) => ToneCurve::from_sequence_text(body),
        None => ToneCurve::new(),
    }
}

/// Extract the x-default text of a name/description element.
fn alt_text(text: &str, tag: &str) -> Option<String> {
    let body = element_inner(text, tag)?;
    let li = element_inner(body, "rdf:li")?;
    let trimmed = li.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(unescape(trimmed))
    }
}

/// Reconstruct one mask from a correction block.
///
/// The semantic type comes from the registry's reverse lookup (unknown code
/// pairs fall back to `subject`); the geometry payload is chosen by which
/// attribute set is present.
fn parse_mask_block(block: &str) -> Option<Mask> {
    let attrs = element_attrs(block, "rdf:Description");
    if attrs.is_empty() {
        return None;
    }

    let type_code = attrs.get_u32("crs:MaskType").unwrap_or(0);
    let subtype_code = attrs.get_u32("crs:MaskSubType").unwrap_or(0);
    let mask_type = MaskRegistry::global().reverse(type_code, subtype_code);

    let mut adjustments = MaskAdjustments::default();
    adjustments.exposure = attrs.get_f32("crs:LocalExposure2012");
    adjustments.contrast = attrs.get_f32("crs:LocalContrast2012");
    adjustments.highlights = attrs.get_f32("crs:LocalHighlights2012");
    adjustments.shadows = attrs.get_f32("crs:LocalShadows2012");
    adjustments.whites = attrs.get_f32("crs:LocalWhites2012");
    adjustments.blacks = attrs.get_f32("crs:LocalBlacks2012");
    adjustments.clarity = attrs.get_f32("crs:LocalClarity2012");
    adjustments.saturation = attrs.get_f32("crs:LocalSaturation");
    adjustments.temperature = attrs.get_f32("crs:LocalTemperature");
    adjustments.tint = attrs.get_f32("crs:LocalTint");

    Some(Mask {
        mask_type,
        name: attrs.get_text("crs:CorrectionName"),
        adjustments,
        geometry: parse_geometry(&attrs),
    })
}

fn parse_geometry(attrs: &Attrs) -> MaskGeometry {
    if attrs.get("crs:Top").is_some() {
        return MaskGeometry::Radial(RadialGeometry::new(
            attrs.get_f32("crs:Top").unwrap_or(0.0),
            attrs.get_f32("crs:Left").unwrap_or(0.0),
            attrs.get_f32("crs:Bottom").unwrap_or(1.0),
            attrs.get_f32("crs:Right").unwrap_or(1.0),
            attrs.get_f32("crs:Angle").unwrap_or(0.0),
            attrs.get_f32("crs:Feather").unwrap_or(0.5),
        ));
    }
    if attrs.get("crs:ZeroX").is_some() {
        return MaskGeometry::Linear(LinearGeometry::new(
            attrs.get_f32("crs:ZeroX").unwrap_or(0.0),
            attrs.get_f32("crs:ZeroY").unwrap_or(0.0),
            attrs.get_f32("crs:FullX").unwrap_or(1.0),
            attrs.get_f32("crs:FullY").unwrap_or(1.0),
        ));
    }
    if attrs.get("crs:LumMin").is_some() || attrs.get("crs:LumMax").is_some() {
        return MaskGeometry::Range(RangeGeometry::Luminance {
            min: attrs.get_f32("crs:LumMin").unwrap_or(0.0),
            max: attrs.get_f32("crs:LumMax").unwrap_or(1.0),
            smoothing: attrs.get_f32("crs:LumSmoothing").unwrap_or(0.0),
            invert: attrs.get_bool("crs:RangeInvert").unwrap_or(false),
        });
    }
    if attrs.get("crs:RangeAmount").is_some() || attrs.get("crs:SamplePoints").is_some() {
        let sample_points = attrs
            .get("crs:SamplePoints")
            .map(parse_sample_points)
            .unwrap_or_default();
        return MaskGeometry::Range(RangeGeometry::Color {
            amount: attrs.get_f32("crs:RangeAmount").unwrap_or(0.5),
            invert: attrs.get_bool("crs:RangeInvert").unwrap_or(false),
            sample_points,
        });
    }
    if attrs.get("crs:ReferenceX").is_some() {
        return MaskGeometry::Point(PointGeometry::new(
            attrs.get_f32("crs:ReferenceX").unwrap_or(0.5),
            attrs.get_f32("crs:ReferenceY").unwrap_or(0.5),
        ));
    }
    MaskGeometry::default()
}

/// Parse "x,y;x,y" sample-point lists, discarding malformed entries.
fn parse_sample_points(raw: &str) -> Vec<(f32, f32)> {
    raw.split(';')
        .filter_map(|pair| {
            let mut parts = pair.split(',');
            let x: f32 = parts.next()?.trim().parse().ok()?;
            let y: f32 = parts.next()?.trim().parse().ok()?;
            if parts.next().is_some() {
                return None;
            }
            Some((x, y))
        })
        .collect()
}
