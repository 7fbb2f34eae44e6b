//! Tone-curve subsystem.
//!
//! Curves are stored as ordered integer point pairs in 0..255 space. Four
//! operations cover the whole lifecycle:
//!
//! 1. [`ToneCurve::normalize`] - raw float pairs to clamped integer points
//! 2. [`ToneCurve::to_sequence_text`] - serialize to the nested list grammar
//! 3. [`ToneCurve::from_sequence_text`] - parse the same grammar back
//! 4. [`ToneCurve::resample`] - evaluate at a 0..1 input for LUT generation
//!
//! Resampling uses linear interpolation between the bracketing pair (found by
//! linear scan), matching the reference pixel pipeline bit-for-bit. Spline
//! smoothing for on-screen curve editing is out of scope here: LUT parity
//! beats prettiness.

use serde::{Deserialize, Serialize};

/// One tone-curve control point in 0..255 space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input value (0 to 255)
    pub input: u8,
    /// Output value (0 to 255)
    pub output: u8,
}

impl CurvePoint {
    pub fn new(input: u8, output: u8) -> Self {
        Self { input, output }
    }
}

/// A tone curve: an ordered sequence of control points.
///
/// An empty curve means "no adjustment" and is omitted from every encoding
/// (serialized as an empty string, never an empty container).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneCurve {
    pub points: Vec<CurvePoint>,
}

impl ToneCurve {
    /// Create an empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a curve directly from integer pairs.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        Self {
            points: pairs.iter().map(|&(i, o)| CurvePoint::new(i, o)).collect(),
        }
    }

    /// Normalize a raw point list into clamped integer pairs.
    ///
    /// Non-finite entries are dropped; everything else is clamped into
    /// 0..255 and rounded. Point order is preserved.
    pub fn normalize(raw: &[(f32, f32)]) -> Self {
        let points = raw
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|&(x, y)| {
                CurvePoint::new(
                    x.clamp(0.0, 255.0).round() as u8,
                    y.clamp(0.0, 255.0).round() as u8,
                )
            })
            .collect();
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize to the nested list text used by the preset formats.
    ///
    /// Empty curves serialize to an empty string - the caller omits the
    /// enclosing element entirely rather than emitting an empty sequence.
    pub fn to_sequence_text(&self) -> String {
        if self.points.is_empty() {
            return String::new();
        }
        let mut out = String::from("<rdf:Seq>\n");
        for point in &self.points {
            out.push_str(&format!("     <rdf:li>{}, {}</rdf:li>\n", point.input, point.output));
        }
        out.push_str("    </rdf:Seq>");
        out
    }

    /// Parse curve text produced by [`Self::to_sequence_text`].
    ///
    /// Each `rdf:li` body must parse as two comma-separated numbers; bodies
    /// that do not are discarded rather than failing the whole curve.
    pub fn from_sequence_text(text: &str) -> Self {
        let mut points = Vec::new();
        let mut rest = text;
        while let Some(open) = rest.find("<rdf:li>") {
            let after = &rest[open + "<rdf:li>".len()..];
            let Some(close) = after.find("</rdf:li>") else {
                break;
            };
            if let Some(point) = parse_pair(&after[..close]) {
                points.push(point);
            }
            rest = &after[close + "</rdf:li>".len()..];
        }
        Self { points }
    }

    /// Resample the curve at `x` (0..1 input, 0..1 output).
    ///
    /// The input is mapped to 255-space, the bracketing pair located by
    /// linear scan, and the result linearly interpolated and mapped back.
    /// Values outside the curve's domain clamp to the nearest endpoint's
    /// output. An empty curve is the identity.
    pub fn resample(&self, x: f32) -> f32 {
        let points = &self.points;
        if points.is_empty() {
            return x.clamp(0.0, 1.0);
        }
        let v = x.clamp(0.0, 1.0) * 255.0;

        let first = points[0];
        if v <= f32::from(first.input) {
            return f32::from(first.output) / 255.0;
        }
        let last = points[points.len() - 1];
        if v >= f32::from(last.input) {
            return f32::from(last.output) / 255.0;
        }

        // Linear scan for the bracketing pair.
        for pair in points.windows(2) {
            let (p0, p1) = (pair[0], pair[1]);
            let x0 = f32::from(p0.input);
            let x1 = f32::from(p1.input);
            if v >= x0 && v <= x1 {
                let y0 = f32::from(p0.output);
                let y1 = f32::from(p1.output);
                if (x1 - x0).abs() < f32::EPSILON {
                    return y1 / 255.0;
                }
                let t = (v - x0) / (x1 - x0);
                return (y0 + (y1 - y0) * t) / 255.0;
            }
        }

        // Unreachable for ordered points; clamp to the last output anyway.
        f32::from(last.output) / 255.0
    }
}

/// Parse one "in, out" pair, rejecting anything that is not exactly two
/// comma-separated numbers.
fn parse_pair(body: &str) -> Option<CurvePoint> {
    let mut parts = body.split(',');
    let input: f32 = parts.next()?.trim().parse().ok()?;
    let output: f32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || !input.is_finite() || !output.is_finite() {
        return None;
    }
    Some(CurvePoint::new(
        input.clamp(0.0, 255.0).round() as u8,
        output.clamp(0.0, 255.0).round() as u8,
    ))
}

/// The four named tone curves of a grade.
///
/// Application order is fixed: master first on all three channels, then each
/// channel-specific curve on top. The LUT sampler depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneCurveSet {
    pub master: ToneCurve,
    pub red: ToneCurve,
    pub green: ToneCurve,
    pub blue: ToneCurve,
}

impl ToneCurveSet {
    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
            && self.red.is_empty()
            && self.green.is_empty()
            && self.blue.is_empty()
    }

    /// Apply the curve set to one RGB sample (all channels 0..1).
    pub fn apply(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let r = self.master.resample(r);
        let g = self.master.resample(g);
        let b = self.master.resample(b);
        (
            self.red.resample(r),
            self.green.resample(g),
            self.blue.resample(b),
        )
    }
}
