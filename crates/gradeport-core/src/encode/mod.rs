//! Preset encoders.
//!
//! Three text producers share this module: the full preset encoder, the
//! minimal profile/look encoder, and the competing-format style encoder.
//! All are pure - no file I/O - and all tolerate a fully empty record by
//! emitting a minimally valid document.

mod preset;
mod profile;
mod style;

pub use preset::{encode_preset, encode_preset_with, PresetOptions};
pub use profile::{encode_profile, encode_profile_with, ProfileOptions};
pub use style::{encode_style, encode_style_with, style_file_name, StyleOptions, StyleVariant};

/// Format an integer-valued slider with an explicit sign for positives,
/// the convention the preset formats use ("+20", "-5", "0").
pub(crate) fn fmt_signed_int(value: f32) -> String {
    let rounded = value.round() as i64;
    if rounded > 0 {
        format!("+{}", rounded)
    } else {
        rounded.to_string()
    }
}

/// Format exposure: always two decimals, signed ("+1.20", "-0.50", "0.00").
pub(crate) fn fmt_exposure(value: f32) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a non-negative integer field (temperature, hue angles, percents).
pub(crate) fn fmt_plain_int(value: f32) -> String {
    format!("{}", value.round() as i64)
}

/// Format a normalized coordinate (mask geometry).
pub(crate) fn fmt_coord(value: f32) -> String {
    format!("{:.6}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_int_formatting() {
        assert_eq!(fmt_signed_int(20.4), "+20");
        assert_eq!(fmt_signed_int(-5.0), "-5");
        assert_eq!(fmt_signed_int(0.0), "0");
    }

    #[test]
    fn test_exposure_formatting() {
        assert_eq!(fmt_exposure(1.2), "+1.20");
        assert_eq!(fmt_exposure(-0.5), "-0.50");
        assert_eq!(fmt_exposure(0.0), "0.00");
    }

    #[test]
    fn test_plain_int_formatting() {
        assert_eq!(fmt_plain_int(5512.7), "5513");
    }
}
