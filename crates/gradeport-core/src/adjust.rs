//! Per-sample adjustment pipeline.
//!
//! Applies a record's tone adjustments to one RGB sample in 0..1 space. This
//! is the transform the LUT sampler bakes into its lattice, so stage order is
//! fixed and must match the reference pixel path:
//!
//! 1. Exposure
//! 2. Contrast
//! 3. Clarity
//! 4. Temperature
//! 5. Tint
//! 6. Highlights
//! 7. Shadows
//! 8. Whites
//! 9. Blacks
//! 10. Saturation
//! 11. Vibrance
//! 12. Monochrome collapse (when the record derives monochrome)
//! 13. Tone curves (master first, then per-channel)

use crate::model::AdjustmentRecord;

/// Neutral white-balance temperature in Kelvin.
const NEUTRAL_KELVIN: f32 = 6500.0;

/// Apply a record's full tone pipeline to one RGB sample.
///
/// Channels are 0..1; the result is clamped into 0..1 before the curves run.
pub fn apply_to_sample(record: &AdjustmentRecord, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b) = (r, g, b);

    if let Some(exposure) = record.exposure {
        (r, g, b) = apply_exposure(r, g, b, exposure);
    }
    if let Some(contrast) = record.contrast {
        (r, g, b) = apply_contrast(r, g, b, contrast);
    }
    if let Some(clarity) = record.clarity {
        (r, g, b) = apply_clarity(r, g, b, clarity);
    }
    if let Some(temperature) = record.temperature {
        (r, g, b) = apply_temperature(r, g, b, temperature);
    }
    if let Some(tint) = record.tint {
        (r, g, b) = apply_tint(r, g, b, tint);
    }

    let luminance = calculate_luminance(r, g, b);
    if let Some(highlights) = record.highlights {
        (r, g, b) = apply_highlights(r, g, b, luminance, highlights);
    }
    if let Some(shadows) = record.shadows {
        (r, g, b) = apply_shadows(r, g, b, luminance, shadows);
    }
    if let Some(whites) = record.whites {
        (r, g, b) = apply_whites(r, g, b, whites);
    }
    if let Some(blacks) = record.blacks {
        (r, g, b) = apply_blacks(r, g, b, blacks);
    }
    if let Some(saturation) = record.saturation {
        (r, g, b) = apply_saturation(r, g, b, saturation);
    }
    if let Some(vibrance) = record.vibrance {
        (r, g, b) = apply_vibrance(r, g, b, vibrance);
    }

    if record.is_monochrome() {
        let gray = calculate_luminance(r, g, b);
        (r, g, b) = (gray, gray, gray);
    }

    r = r.clamp(0.0, 1.0);
    g = g.clamp(0.0, 1.0);
    b = b.clamp(0.0, 1.0);

    record.tone_curves.apply(r, g, b)
}

/// Exposure in stops; each stop doubles or halves brightness.
#[inline]
fn apply_exposure(r: f32, g: f32, b: f32, exposure: f32) -> (f32, f32, f32) {
    if exposure == 0.0 {
        return (r, g, b);
    }
    let multiplier = 2.0_f32.powf(exposure);
    (r * multiplier, g * multiplier, b * multiplier)
}

/// Contrast around the 0.5 midpoint.
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let factor = 1.0 + (contrast / 100.0);
    let midpoint = 0.5;
    (
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// Clarity: contrast weighted toward the midtones, leaving deep shadows and
/// bright highlights mostly untouched.
#[inline]
fn apply_clarity(r: f32, g: f32, b: f32, clarity: f32) -> (f32, f32, f32) {
    if clarity == 0.0 {
        return (r, g, b);
    }
    let luminance = calculate_luminance(r, g, b);
    // Midtone weight: 1 at luminance 0.5, 0 at either extreme.
    let weight = 1.0 - (2.0 * luminance - 1.0).abs();
    let factor = 1.0 + (clarity / 100.0) * 0.5 * weight;
    let midpoint = 0.5;
    (
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// White balance temperature in Kelvin, neutral at 6500 K.
/// Above neutral warms (more red), below cools (more blue).
#[inline]
fn apply_temperature(r: f32, g: f32, b: f32, kelvin: f32) -> (f32, f32, f32) {
    let warmth = ((kelvin - NEUTRAL_KELVIN) / 4500.0).clamp(-1.0, 1.0);
    if warmth == 0.0 {
        return (r, g, b);
    }
    // Warmer: boost red, reduce blue. Cooler: the reverse (shift < 0).
    let shift = warmth * 0.3;
    (r * (1.0 + shift), g, b * (1.0 - shift))
}

/// Green-magenta tint (-150 to 150); positive is magenta.
#[inline]
fn apply_tint(r: f32, g: f32, b: f32, tint: f32) -> (f32, f32, f32) {
    if tint == 0.0 {
        return (r, g, b);
    }
    let shift = (tint / 150.0) * 0.2;
    if tint < 0.0 {
        // Green tint
        (r, g * (1.0 + shift.abs()), b)
    } else {
        // Magenta tint (red + blue)
        (r * (1.0 + shift), g * (1.0 - shift), b * (1.0 + shift))
    }
}

/// Luminance using ITU-R BT.709 coefficients.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Smooth interpolation between two edges.
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Highlights affect bright areas (luminance > 0.5).
#[inline]
fn apply_highlights(r: f32, g: f32, b: f32, luminance: f32, highlights: f32) -> (f32, f32, f32) {
    if highlights == 0.0 {
        return (r, g, b);
    }
    let highlight_mask = smoothstep(0.5, 1.0, luminance);
    let adjustment = (highlights / 100.0) * highlight_mask;

    if highlights < 0.0 {
        let factor = 1.0 + adjustment;
        (r * factor, g * factor, b * factor)
    } else {
        let boost = adjustment * 0.5;
        (r + boost, g + boost, b + boost)
    }
}

/// Shadows affect dark areas (luminance < 0.5).
#[inline]
fn apply_shadows(r: f32, g: f32, b: f32, luminance: f32, shadows: f32) -> (f32, f32, f32) {
    if shadows == 0.0 {
        return (r, g, b);
    }
    let shadow_mask = smoothstep(0.5, 0.0, luminance);
    let adjustment = (shadows / 100.0) * shadow_mask;

    if shadows < 0.0 {
        let factor = 1.0 + adjustment;
        (r * factor, g * factor, b * factor)
    } else {
        let boost = adjustment * 0.5;
        (r + boost, g + boost, b + boost)
    }
}

/// Whites affect the brightest pixels (any channel > 0.9).
#[inline]
fn apply_whites(r: f32, g: f32, b: f32, whites: f32) -> (f32, f32, f32) {
    if whites == 0.0 {
        return (r, g, b);
    }
    let max_channel = r.max(g).max(b);
    if max_channel > 0.9 {
        let factor = 1.0 + (whites / 100.0) * 0.3;
        (r * factor, g * factor, b * factor)
    } else {
        (r, g, b)
    }
}

/// Blacks affect the darkest pixels (any channel < 0.1).
#[inline]
fn apply_blacks(r: f32, g: f32, b: f32, blacks: f32) -> (f32, f32, f32) {
    if blacks == 0.0 {
        return (r, g, b);
    }
    let min_channel = r.min(g).min(b);
    if min_channel < 0.1 {
        let factor = 1.0 + (blacks / 100.0) * 0.2;
        (r * factor, g * factor, b * factor)
    } else {
        (r, g, b)
    }
}

/// Luminance-preserving saturation.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 0.0 {
        return (r, g, b);
    }
    let gray = calculate_luminance(r, g, b);
    let factor = 1.0 + (saturation / 100.0);
    (
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}

/// Vibrance: saturation that protects already-saturated colors and skin tones.
#[inline]
fn apply_vibrance(r: f32, g: f32, b: f32, vibrance: f32) -> (f32, f32, f32) {
    if vibrance == 0.0 {
        return (r, g, b);
    }

    let max_c = r.max(g).max(b);
    let min_c = r.min(g).min(b);
    let current_sat = if max_c > 0.0 {
        (max_c - min_c) / max_c
    } else {
        0.0
    };

    // Skin tones (R > G > B with a meaningful red lead) get half the effect.
    let is_skin = r > g && g > b && (r - g) > 0.06;
    let skin_protection = if is_skin { 0.5 } else { 1.0 };
    let saturation_protection = 1.0 - current_sat;

    let effective_vibrance = vibrance * skin_protection * saturation_protection;
    apply_saturation(r, g, b, effective_vibrance)
}
