//! Point records and field accessors
//!
//! Serialized keys match the display keys of the bundled point dataset
//! (`"Meridian System"`, `"Location (Cun)"`, ...) so the JS array can be handed over as-is.

use serde::{Deserialize, Serialize};

use crate::error::AcupointError;

// =============================================================================
// Point Record
// =============================================================================

/// One acupuncture point's full attribute set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointRecord {
    #[serde(rename = "Meridian System")]
    pub meridian_system: String,
    #[serde(rename = "Point Code")]
    pub point_code: String,
    #[serde(rename = "English Name")]
    pub english_name: String,
    #[serde(rename = "Chinese Name")]
    pub chinese_name: String,
    #[serde(rename = "Pinyin")]
    pub pinyin: String,
    #[serde(rename = "Point Category")]
    pub point_category: String,
    #[serde(rename = "Indications")]
    pub indications: String,
    /// Comma-joined free text, matched by substring
    #[serde(rename = "Symptoms")]
    pub symptoms: String,
    /// Comma-joined free text, matched by substring
    #[serde(rename = "Diseases")]
    pub diseases: String,
    #[serde(rename = "Functions")]
    pub functions: String,
    #[serde(rename = "Location (Cun)")]
    pub location_cun: String,
    #[serde(rename = "Anatomical Location")]
    pub anatomical_location: String,
    #[serde(rename = "General Location")]
    pub general_location: String,
    #[serde(rename = "Contraindications")]
    pub contraindications: String,
    #[serde(rename = "Needling Depth")]
    pub needling_depth: String,
    #[serde(rename = "Needling Method")]
    pub needling_method: String,
    #[serde(rename = "Stimulation Method")]
    pub stimulation_method: String,
    #[serde(rename = "Electrical Stimulation")]
    pub electrical_stimulation: String,
}

impl PointRecord {
    /// Field accessor used by the filter engine and the table projections
    pub fn field(&self, field: PointField) -> &str {
        match field {
            PointField::MeridianSystem => &self.meridian_system,
            PointField::PointCode => &self.point_code,
            PointField::EnglishName => &self.english_name,
            PointField::ChineseName => &self.chinese_name,
            PointField::Pinyin => &self.pinyin,
            PointField::PointCategory => &self.point_category,
            PointField::Indications => &self.indications,
            PointField::Symptoms => &self.symptoms,
            PointField::Diseases => &self.diseases,
            PointField::Functions => &self.functions,
            PointField::LocationCun => &self.location_cun,
            PointField::AnatomicalLocation => &self.anatomical_location,
            PointField::GeneralLocation => &self.general_location,
            PointField::Contraindications => &self.contraindications,
            PointField::NeedlingDepth => &self.needling_depth,
            PointField::NeedlingMethod => &self.needling_method,
            PointField::StimulationMethod => &self.stimulation_method,
            PointField::ElectricalStimulation => &self.electrical_stimulation,
        }
    }
}

// =============================================================================
// Point Field
// =============================================================================

/// Names one attribute of a [`PointRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointField {
    MeridianSystem,
    PointCode,
    EnglishName,
    ChineseName,
    Pinyin,
    PointCategory,
    Indications,
    Symptoms,
    Diseases,
    Functions,
    LocationCun,
    AnatomicalLocation,
    GeneralLocation,
    Contraindications,
    NeedlingDepth,
    NeedlingMethod,
    StimulationMethod,
    ElectricalStimulation,
}

impl PointField {
    /// Every field, in the column order of the on-screen results table
    pub const ALL: [PointField; 18] = [
        PointField::MeridianSystem,
        PointField::PointCode,
        PointField::EnglishName,
        PointField::ChineseName,
        PointField::Pinyin,
        PointField::PointCategory,
        PointField::Indications,
        PointField::Symptoms,
        PointField::Diseases,
        PointField::Functions,
        PointField::LocationCun,
        PointField::AnatomicalLocation,
        PointField::GeneralLocation,
        PointField::Contraindications,
        PointField::NeedlingDepth,
        PointField::NeedlingMethod,
        PointField::StimulationMethod,
        PointField::ElectricalStimulation,
    ];

    /// Dataset key for this field
    pub fn key(&self) -> &'static str {
        match self {
            PointField::MeridianSystem => "Meridian System",
            PointField::PointCode => "Point Code",
            PointField::EnglishName => "English Name",
            PointField::ChineseName => "Chinese Name",
            PointField::Pinyin => "Pinyin",
            PointField::PointCategory => "Point Category",
            PointField::Indications => "Indications",
            PointField::Symptoms => "Symptoms",
            PointField::Diseases => "Diseases",
            PointField::Functions => "Functions",
            PointField::LocationCun => "Location (Cun)",
            PointField::AnatomicalLocation => "Anatomical Location",
            PointField::GeneralLocation => "General Location",
            PointField::Contraindications => "Contraindications",
            PointField::NeedlingDepth => "Needling Depth",
            PointField::NeedlingMethod => "Needling Method",
            PointField::StimulationMethod => "Stimulation Method",
            PointField::ElectricalStimulation => "Electrical Stimulation",
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Search category; one tab, one selection set and one searched field each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Symptoms,
    Diseases,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Symptoms => "symptoms",
            Category::Diseases => "diseases",
        }
    }

    /// Singular noun used in warnings
    pub fn singular(&self) -> &'static str {
        match self {
            Category::Symptoms => "symptom",
            Category::Diseases => "disease",
        }
    }

    /// Record field a search in this category matches against
    pub fn field(&self) -> PointField {
        match self {
            Category::Symptoms => PointField::Symptoms,
            Category::Diseases => PointField::Diseases,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = AcupointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "symptoms" | "symptom" => Ok(Category::Symptoms),
            "diseases" | "disease" => Ok(Category::Diseases),
            other => Err(AcupointError::UnknownCategory(other.to_string())),
        }
    }
}
