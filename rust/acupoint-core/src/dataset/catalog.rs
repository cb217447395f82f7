//! Dataset: the ordered point records plus the suggestion vocabularies
//!
//! The records are supplied fully materialized by the host page. Nothing here validates
//! them; vocabularies are derived from the records only when the host does not ship them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::dataset::record::{Category, PointField, PointRecord};
use crate::error::AcupointError;

/// Read-only point dataset for one session
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<PointRecord>,
    symptoms: Vec<String>,
    diseases: Vec<String>,
}

/// Aggregate figures about the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_points: usize,
    pub total_symptoms: usize,
    pub total_diseases: usize,
    pub meridian_systems: Vec<String>,
    pub categories: Vec<String>,
}

impl Dataset {
    /// Build a dataset whose vocabularies are derived from the records
    pub fn new(points: Vec<PointRecord>) -> Self {
        let symptoms = derive_vocabulary(&points, PointField::Symptoms);
        let diseases = derive_vocabulary(&points, PointField::Diseases);
        Self {
            points,
            symptoms,
            diseases,
        }
    }

    /// Build a dataset with explicit vocabularies (the host's symptom and disease lists)
    pub fn with_vocabularies(
        points: Vec<PointRecord>,
        symptoms: Vec<String>,
        diseases: Vec<String>,
    ) -> Self {
        Self {
            points,
            symptoms,
            diseases,
        }
    }

    /// Replace one vocabulary, keeping the other as it is
    pub fn with_vocabulary(mut self, category: Category, terms: Vec<String>) -> Self {
        match category {
            Category::Symptoms => self.symptoms = terms,
            Category::Diseases => self.diseases = terms,
        }
        self
    }

    /// Parse a JSON array of point records
    pub fn from_json(json: &str) -> Result<Self, AcupointError> {
        let points: Vec<PointRecord> =
            serde_json::from_str(json).map_err(|e| AcupointError::InvalidInput(e.to_string()))?;
        Ok(Self::new(points))
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dropdown vocabulary for a category
    pub fn vocabulary(&self, category: Category) -> &[String] {
        match category {
            Category::Symptoms => &self.symptoms,
            Category::Diseases => &self.diseases,
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_points: self.points.len(),
            total_symptoms: self.symptoms.len(),
            total_diseases: self.diseases.len(),
            meridian_systems: distinct_values(&self.points, PointField::MeridianSystem),
            categories: distinct_values(&self.points, PointField::PointCategory),
        }
    }
}

/// Split a comma-joined field across all records into unique terms, first-seen order.
/// Uniqueness is case-insensitive; the first spelling wins.
fn derive_vocabulary(points: &[PointRecord], field: PointField) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for point in points {
        for term in point.field(field).split(',') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            if seen.insert(term.to_lowercase()) {
                terms.push(term.to_string());
            }
        }
    }

    terms
}

fn distinct_values(points: &[PointRecord], field: PointField) -> Vec<String> {
    let mut seen = HashSet::new();
    points
        .iter()
        .map(|p| p.field(field).trim())
        .filter(|v| !v.is_empty() && seen.insert(v.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(code: &str, meridian: &str, symptoms: &str, diseases: &str) -> PointRecord {
        PointRecord {
            point_code: code.into(),
            meridian_system: meridian.into(),
            symptoms: symptoms.into(),
            diseases: diseases.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derived_vocabulary_order_and_dedup() {
        let dataset = Dataset::new(vec![
            point("LU7", "Lung (LU)", "headache, nausea", "Common cold"),
            point("LI4", "Large Intestine (LI)", "Fever, headache", "common cold, sinusitis"),
            point("ST36", "Stomach (ST)", "cough,, ", ""),
        ]);

        assert_eq!(
            dataset.vocabulary(Category::Symptoms),
            &["headache", "nausea", "Fever", "cough"]
        );
        assert_eq!(
            dataset.vocabulary(Category::Diseases),
            &["Common cold", "sinusitis"]
        );
    }

    #[test]
    fn test_summary() {
        let dataset = Dataset::new(vec![
            point("LU7", "Lung (LU)", "cough", ""),
            point("LU9", "Lung (LU)", "wheezing", ""),
            point("LI4", "Large Intestine (LI)", "headache", "migraine"),
        ]);

        let summary = dataset.summary();
        assert_eq!(summary.total_points, 3);
        assert_eq!(summary.total_symptoms, 3);
        assert_eq!(summary.total_diseases, 1);
        assert_eq!(summary.meridian_systems, vec!["Lung (LU)", "Large Intestine (LI)"]);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn test_from_json() {
        let dataset = Dataset::from_json(
            r#"[{"Point Code": "GV20", "Symptoms": "dizziness"}, {"Point Code": "CV12"}]"#,
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.points()[0].point_code, "GV20");

        assert!(matches!(
            Dataset::from_json("{not json"),
            Err(AcupointError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_explicit_vocabularies_are_kept_verbatim() {
        let dataset = Dataset::with_vocabularies(
            vec![point("LU7", "Lung (LU)", "cough", "")],
            vec!["Cough".into(), "Chills".into()],
            vec![],
        );
        assert_eq!(dataset.vocabulary(Category::Symptoms), &["Cough", "Chills"]);
        assert!(dataset.vocabulary(Category::Diseases).is_empty());
    }

    #[test]
    fn test_override_one_vocabulary() {
        let dataset = Dataset::new(vec![point("LU7", "Lung (LU)", "cough", "asthma")])
            .with_vocabulary(Category::Diseases, vec!["Asthma".into(), "Bronchitis".into()]);

        assert_eq!(dataset.vocabulary(Category::Symptoms), &["cough"]);
        assert_eq!(dataset.vocabulary(Category::Diseases), &["Asthma", "Bronchitis"]);
    }
}
