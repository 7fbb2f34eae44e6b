//! Mask taxonomy registry.
//!
//! A single read-only table maps every semantic mask type to the
//! (type-code, subtype-code) pair the external formats use, plus the geometry
//! archetype that type expects. Built once behind a `OnceLock`, queried by
//! every encoder and the decoder through two lookups (forward and reverse).
//!
//! The registry resolves codes only; validating that a mask's geometry
//! payload matches its archetype is the encoder's job.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::geometry::GeometryArchetype;

/// Canonical semantic mask vocabulary.
///
/// Unknown or loosely-specified producer strings normalize to
/// [`SemanticMaskType::Subject`] - a deliberate fallback, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticMaskType {
    // Face / person parts
    FaceSkin,
    FaceEyeSclera,
    FaceIrisPupil,
    FaceEyebrows,
    FaceLips,
    FaceTeeth,
    Hair,
    Beard,
    BodySkin,
    Clothing,
    // Whole-entity
    Person,
    Subject,
    // Landscape / background elements
    Sky,
    Background,
    Water,
    Vegetation,
    Mountains,
    Architecture,
    Road,
    Ground,
    Flowers,
    // Gradients
    LinearGradient,
    RadialGradient,
    // Range selectors
    ColorRange,
    LuminanceRange,
}

impl SemanticMaskType {
    /// All canonical types, in registry order.
    pub const ALL: [SemanticMaskType; 25] = [
        SemanticMaskType::FaceSkin,
        SemanticMaskType::FaceEyeSclera,
        SemanticMaskType::FaceIrisPupil,
        SemanticMaskType::FaceEyebrows,
        SemanticMaskType::FaceLips,
        SemanticMaskType::FaceTeeth,
        SemanticMaskType::Hair,
        SemanticMaskType::Beard,
        SemanticMaskType::BodySkin,
        SemanticMaskType::Clothing,
        SemanticMaskType::Person,
        SemanticMaskType::Subject,
        SemanticMaskType::Sky,
        SemanticMaskType::Background,
        SemanticMaskType::Water,
        SemanticMaskType::Vegetation,
        SemanticMaskType::Mountains,
        SemanticMaskType::Architecture,
        SemanticMaskType::Road,
        SemanticMaskType::Ground,
        SemanticMaskType::Flowers,
        SemanticMaskType::LinearGradient,
        SemanticMaskType::RadialGradient,
        SemanticMaskType::ColorRange,
        SemanticMaskType::LuminanceRange,
    ];

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticMaskType::FaceSkin => "face_skin",
            SemanticMaskType::FaceEyeSclera => "face_eye_sclera",
            SemanticMaskType::FaceIrisPupil => "face_iris_pupil",
            SemanticMaskType::FaceEyebrows => "face_eyebrows",
            SemanticMaskType::FaceLips => "face_lips",
            SemanticMaskType::FaceTeeth => "face_teeth",
            SemanticMaskType::Hair => "hair",
            SemanticMaskType::Beard => "beard",
            SemanticMaskType::BodySkin => "body_skin",
            SemanticMaskType::Clothing => "clothing",
            SemanticMaskType::Person => "person",
            SemanticMaskType::Subject => "subject",
            SemanticMaskType::Sky => "sky",
            SemanticMaskType::Background => "background",
            SemanticMaskType::Water => "water",
            SemanticMaskType::Vegetation => "vegetation",
            SemanticMaskType::Mountains => "mountains",
            SemanticMaskType::Architecture => "architecture",
            SemanticMaskType::Road => "road",
            SemanticMaskType::Ground => "ground",
            SemanticMaskType::Flowers => "flowers",
            SemanticMaskType::LinearGradient => "linear_gradient",
            SemanticMaskType::RadialGradient => "radial_gradient",
            SemanticMaskType::ColorRange => "color_range",
            SemanticMaskType::LuminanceRange => "luminance_range",
        }
    }
}

impl fmt::Display for SemanticMaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Producers speak a loose vocabulary, so deserialization always goes through
// normalization; an unrecognized string becomes Subject, never an error.
impl<'de> Deserialize<'de> for SemanticMaskType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MaskRegistry::global().normalize(&raw))
    }
}

impl Serialize for SemanticMaskType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Registry entry: the format codes and archetype for one semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskTypeInfo {
    pub mask_type: SemanticMaskType,
    /// Format type code (mask category).
    pub type_code: u32,
    /// Format subtype code within the category.
    pub subtype_code: u32,
    pub archetype: GeometryArchetype,
}

// Format type codes, one per mask category.
const TYPE_PERSON_PART: u32 = 1;
const TYPE_SUBJECT: u32 = 2;
const TYPE_SKY: u32 = 3;
const TYPE_ENVIRONMENT: u32 = 4;
const TYPE_GRADIENT: u32 = 5;
const TYPE_RANGE: u32 = 6;

/// Read-only mask taxonomy registry with forward and reverse indexes.
pub struct MaskRegistry {
    forward: HashMap<SemanticMaskType, MaskTypeInfo>,
    reverse: HashMap<(u32, u32), SemanticMaskType>,
}

impl MaskRegistry {
    /// The process-wide registry, built on first use.
    pub fn global() -> &'static MaskRegistry {
        static REGISTRY: OnceLock<MaskRegistry> = OnceLock::new();
        REGISTRY.get_or_init(MaskRegistry::build)
    }

    fn build() -> Self {
        use GeometryArchetype::{Linear, Point, Radial, Range};
        use SemanticMaskType::*;

        let entries: [(SemanticMaskType, u32, u32, GeometryArchetype); 25] = [
            // Person parts: reference-point anchored
            (Person, TYPE_PERSON_PART, 0, Point),
            (FaceSkin, TYPE_PERSON_PART, 1, Point),
            (FaceEyeSclera, TYPE_PERSON_PART, 2, Point),
            (FaceIrisPupil, TYPE_PERSON_PART, 3, Point),
            (FaceEyebrows, TYPE_PERSON_PART, 4, Point),
            (FaceLips, TYPE_PERSON_PART, 5, Point),
            (FaceTeeth, TYPE_PERSON_PART, 6, Point),
            (Hair, TYPE_PERSON_PART, 7, Point),
            (Beard, TYPE_PERSON_PART, 8, Point),
            (BodySkin, TYPE_PERSON_PART, 9, Point),
            (Clothing, TYPE_PERSON_PART, 10, Point),
            // Whole-entity
            (Subject, TYPE_SUBJECT, 0, Point),
            (Sky, TYPE_SKY, 0, Point),
            // Environment / background elements
            (Background, TYPE_ENVIRONMENT, 0, Point),
            (Water, TYPE_ENVIRONMENT, 1, Point),
            (Vegetation, TYPE_ENVIRONMENT, 2, Point),
            (Mountains, TYPE_ENVIRONMENT, 3, Point),
            (Architecture, TYPE_ENVIRONMENT, 4, Point),
            (Road, TYPE_ENVIRONMENT, 5, Point),
            (Ground, TYPE_ENVIRONMENT, 6, Point),
            (Flowers, TYPE_ENVIRONMENT, 7, Point),
            // Gradients
            (LinearGradient, TYPE_GRADIENT, 0, Linear),
            (RadialGradient, TYPE_GRADIENT, 1, Radial),
            // Range selectors
            (ColorRange, TYPE_RANGE, 0, Range),
            (LuminanceRange, TYPE_RANGE, 1, Range),
        ];

        let mut forward = HashMap::with_capacity(entries.len());
        let mut reverse = HashMap::with_capacity(entries.len());
        for (mask_type, type_code, subtype_code, archetype) in entries {
            forward.insert(
                mask_type,
                MaskTypeInfo {
                    mask_type,
                    type_code,
                    subtype_code,
                    archetype,
                },
            );
            reverse.insert((type_code, subtype_code), mask_type);
        }
        Self { forward, reverse }
    }

    /// Forward lookup: semantic type to format codes and archetype.
    ///
    /// The table is total over [`SemanticMaskType`], so this never fails.
    pub fn resolve(&self, mask_type: SemanticMaskType) -> MaskTypeInfo {
        self.forward[&mask_type]
    }

    /// Reverse lookup: format codes back to a semantic type.
    ///
    /// Unknown code pairs fall back to [`SemanticMaskType::Subject`].
    pub fn reverse(&self, type_code: u32, subtype_code: u32) -> SemanticMaskType {
        self.reverse
            .get(&(type_code, subtype_code))
            .copied()
            .unwrap_or(SemanticMaskType::Subject)
    }

    /// Normalize a loosely-specified producer string to the canonical
    /// vocabulary. Unrecognized strings fall back to `Subject`.
    pub fn normalize(&self, raw: &str) -> SemanticMaskType {
        use SemanticMaskType::*;
        match raw.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "face" | "skin" | "face_skin" | "faceskin" => FaceSkin,
            "eye" | "eyes" | "sclera" | "eye_sclera" | "face_eye_sclera" => FaceEyeSclera,
            "iris" | "pupil" | "iris_pupil" | "face_iris_pupil" => FaceIrisPupil,
            "eyebrow" | "eyebrows" | "brows" | "face_eyebrows" => FaceEyebrows,
            "lips" | "mouth" | "face_lips" => FaceLips,
            "teeth" | "face_teeth" => FaceTeeth,
            "hair" => Hair,
            "beard" | "facial_hair" => Beard,
            "body" | "body_skin" => BodySkin,
            "clothing" | "clothes" => Clothing,
            "person" | "people" | "human" | "portrait" => Person,
            "subject" => Subject,
            "sky" | "clouds" => Sky,
            "background" | "backdrop" => Background,
            "water" | "sea" | "ocean" | "lake" => Water,
            "vegetation" | "foliage" | "trees" | "plants" => Vegetation,
            "mountain" | "mountains" | "hills" => Mountains,
            "architecture" | "building" | "buildings" => Architecture,
            "road" | "street" | "path" => Road,
            "ground" | "floor" | "earth" => Ground,
            "flower" | "flowers" => Flowers,
            "linear" | "linear_gradient" | "gradient" => LinearGradient,
            "radial" | "radial_gradient" => RadialGradient,
            "color_range" | "color" => ColorRange,
            "luminance_range" | "luminance" | "luminosity" => LuminanceRange,
            _ => Subject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Normalization Tests =====

    #[test]
    fn test_face_synonyms_normalize_to_face_skin() {
        let registry = MaskRegistry::global();
        assert_eq!(registry.normalize("face"), SemanticMaskType::FaceSkin);
        assert_eq!(registry.normalize("skin"), SemanticMaskType::FaceSkin);
        assert_eq!(registry.normalize("Face Skin"), SemanticMaskType::FaceSkin);
    }

    #[test]
    fn test_people_normalizes_to_person() {
        let registry = MaskRegistry::global();
        assert_eq!(registry.normalize("people"), SemanticMaskType::Person);
        assert_eq!(registry.normalize("HUMAN"), SemanticMaskType::Person);
    }

    #[test]
    fn test_unrecognized_string_falls_back_to_subject() {
        let registry = MaskRegistry::global();
        assert_eq!(registry.normalize("warp drive"), SemanticMaskType::Subject);
        assert_eq!(registry.normalize(""), SemanticMaskType::Subject);
    }

    // ===== Forward / Reverse Tests =====

    #[test]
    fn test_forward_reverse_bijection() {
        let registry = MaskRegistry::global();
        for mask_type in SemanticMaskType::ALL {
            let info = registry.resolve(mask_type);
            assert_eq!(
                registry.reverse(info.type_code, info.subtype_code),
                mask_type,
                "reverse lookup broke for {}",
                mask_type
            );
        }
    }

    #[test]
    fn test_face_skin_round_trip_from_synonym() {
        let registry = MaskRegistry::global();
        let canonical = registry.normalize("face");
        let info = registry.resolve(canonical);
        // Reverse returns the canonical type, not the original synonym.
        assert_eq!(
            registry.reverse(info.type_code, info.subtype_code),
            SemanticMaskType::FaceSkin
        );
    }

    #[test]
    fn test_unknown_codes_fall_back_to_subject() {
        let registry = MaskRegistry::global();
        assert_eq!(registry.reverse(99, 99), SemanticMaskType::Subject);
    }

    #[test]
    fn test_code_pairs_are_unique() {
        let registry = MaskRegistry::global();
        let mut seen = std::collections::HashSet::new();
        for mask_type in SemanticMaskType::ALL {
            let info = registry.resolve(mask_type);
            assert!(
                seen.insert((info.type_code, info.subtype_code)),
                "duplicate code pair for {}",
                mask_type
            );
        }
    }

    // ===== Archetype Tests =====

    #[test]
    fn test_archetypes_match_geometry_family() {
        let registry = MaskRegistry::global();
        assert_eq!(
            registry.resolve(SemanticMaskType::RadialGradient).archetype,
            GeometryArchetype::Radial
        );
        assert_eq!(
            registry.resolve(SemanticMaskType::LinearGradient).archetype,
            GeometryArchetype::Linear
        );
        assert_eq!(
            registry.resolve(SemanticMaskType::Sky).archetype,
            GeometryArchetype::Point
        );
        assert_eq!(
            registry.resolve(SemanticMaskType::LuminanceRange).archetype,
            GeometryArchetype::Range
        );
    }

    // ===== Serde Tests =====

    #[test]
    fn test_deserialize_loose_string() {
        let mask_type: SemanticMaskType = serde_json_like_roundtrip("\"people\"");
        assert_eq!(mask_type, SemanticMaskType::Person);
    }

    // Minimal stand-in for a JSON round trip without pulling serde_json into
    // dev-dependencies: drive Deserialize through the string deserializer.
    fn serde_json_like_roundtrip(json_str: &str) -> SemanticMaskType {
        use serde::de::value::{Error, StrDeserializer};
        use serde::Deserialize;
        let trimmed = json_str.trim_matches('"');
        let deserializer: StrDeserializer<Error> = StrDeserializer::new(trimmed);
        SemanticMaskType::deserialize(deserializer).unwrap()
    }
}
