//! 3D LUT export.
//!
//! Bakes a record's global color adjustments into a lattice of RGB samples
//! and serializes it in either of two text dialects. Mask-local adjustments
//! are excluded: a LUT is a pure color transform with no spatial awareness.

use rayon::prelude::*;

use crate::adjust::apply_to_sample;
use crate::model::AdjustmentRecord;

/// Output dialect for [`write_lut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LutFormat {
    /// `.cube`: floating-point samples in 0..1, six decimals.
    #[default]
    Cube,
    /// `.3dl`: integer samples in 0..1023.
    ThreeDl,
}

/// Sample the record's color transform on an N-sided lattice.
///
/// Samples are ordered red-fastest: index `r + g*N + b*N*N`. Sizes below 2
/// cannot describe a lattice and are raised to 2.
pub fn sample_grid(record: &AdjustmentRecord, size: u32) -> Vec<(f32, f32, f32)> {
    let size = size.max(2) as usize;
    let step = 1.0 / (size - 1) as f32;

    // Each blue slab is independent, so slabs are filled in parallel and
    // concatenated back in lattice order.
    (0..size)
        .into_par_iter()
        .map(|b| {
            let blue = b as f32 * step;
            let mut slab = Vec::with_capacity(size * size);
            for g in 0..size {
                let green = g as f32 * step;
                for r in 0..size {
                    let red = r as f32 * step;
                    slab.push(apply_to_sample(record, red, green, blue));
                }
            }
            slab
        })
        .flatten()
        .collect()
}

/// Serialize a record's color transform as a 3D LUT.
pub fn write_lut(record: &AdjustmentRecord, size: u32, format: LutFormat) -> String {
    let size = size.max(2);
    let samples = sample_grid(record, size);
    let mut out = String::with_capacity(samples.len() * 24 + 128);

    match format {
        LutFormat::Cube => {
            out.push_str(&format!("# Generated by Gradeport\nTITLE \"{}\"\n", record.display_name()));
            out.push_str(&format!("LUT_3D_SIZE {}\n", size));
            out.push_str("DOMAIN_MIN 0.0 0.0 0.0\n");
            out.push_str("DOMAIN_MAX 1.0 1.0 1.0\n\n");
            for (r, g, b) in samples {
                out.push_str(&format!("{:.6} {:.6} {:.6}\n", r, g, b));
            }
        }
        LutFormat::ThreeDl => {
            // Header row lists the input lattice coordinates in 0..1023.
            let step = 1023.0 / (size - 1) as f32;
            let coords: Vec<String> = (0..size)
                .map(|i| ((i as f32 * step).round() as u32).to_string())
                .collect();
            out.push_str(&format!("# Generated by Gradeport\n{}\n", coords.join(" ")));
            for (r, g, b) in samples {
                out.push_str(&format!(
                    "{} {} {}\n",
                    quantize_10bit(r),
                    quantize_10bit(g),
                    quantize_10bit(b)
                ));
            }
        }
    }
    out
}

fn quantize_10bit(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 1023.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Treatment;

    #[test]
    fn test_identity_grid_corners() {
        let record = AdjustmentRecord::new();
        let grid = sample_grid(&record, 2);
        assert_eq!(grid.len(), 8);
        // Red-fastest ordering: index = r + g*2 + b*4.
        assert_eq!(grid[0], (0.0, 0.0, 0.0));
        assert_eq!(grid[1], (1.0, 0.0, 0.0));
        assert_eq!(grid[2], (0.0, 1.0, 0.0));
        assert_eq!(grid[4], (0.0, 0.0, 1.0));
        assert_eq!(grid[7], (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_grid_size_clamped_to_minimum() {
        let record = AdjustmentRecord::new();
        assert_eq!(sample_grid(&record, 0).len(), 8);
        assert_eq!(sample_grid(&record, 1).len(), 8);
    }

    #[test]
    fn test_samples_stay_in_unit_range() {
        let mut record = AdjustmentRecord::new();
        record.exposure = Some(5.0);
        record.contrast = Some(100.0);
        for (r, g, b) in sample_grid(&record, 5) {
            assert!((0.0..=1.0).contains(&r));
            assert!((0.0..=1.0).contains(&g));
            assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_monochrome_grid_is_neutral() {
        let mut record = AdjustmentRecord::new();
        record.treatment = Some(Treatment::Monochrome);
        for (r, g, b) in sample_grid(&record, 3) {
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn test_cube_dialect_layout() {
        let mut record = AdjustmentRecord::new();
        record.name = Some("Teal Shadows".to_string());
        let text = write_lut(&record, 2, LutFormat::Cube);
        assert!(text.contains("TITLE \"Teal Shadows\""));
        assert!(text.contains("LUT_3D_SIZE 2"));
        assert!(text.contains("DOMAIN_MIN 0.0 0.0 0.0"));
        let data_lines: Vec<&str> = text
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
            .collect();
        assert_eq!(data_lines.len(), 8);
        assert_eq!(data_lines[0], "0.000000 0.000000 0.000000");
        assert_eq!(data_lines[7], "1.000000 1.000000 1.000000");
    }

    #[test]
    fn test_3dl_dialect_layout() {
        let record = AdjustmentRecord::new();
        let text = write_lut(&record, 3, LutFormat::ThreeDl);
        assert!(text.contains("0 512 1023"));
        let last = text.lines().last().unwrap();
        assert_eq!(last, "1023 1023 1023");
        // 27 samples plus comment and coordinate header.
        assert_eq!(text.lines().count(), 29);
    }

    #[test]
    fn test_exposure_lifts_midtones() {
        let mut record = AdjustmentRecord::new();
        record.exposure = Some(1.0);
        let grid = sample_grid(&record, 3);
        // Mid-gray sample sits at index 1 + 1*3 + 1*9 = 13.
        let (r, _, _) = grid[13];
        assert!(r > 0.5);
    }
}
