//! Filter engine
//!
//! A record matches when ANY selected item is a case-insensitive substring of the
//! searched field. Matching is deliberately not tokenized: "cold" matches both
//! "common cold" and "cold hands", "ear" matches "early".

use crate::dataset::{Category, Dataset, PointField, PointRecord};
use crate::error::AcupointError;
use crate::selection::SelectionSet;

/// Records of `points` matching `selection` on `field`, in dataset order.
///
/// An empty selection is refused rather than returning the whole dataset.
pub fn filter_points(
    points: &[PointRecord],
    selection: &SelectionSet,
    field: PointField,
    category: Category,
) -> Result<Vec<PointRecord>, AcupointError> {
    if selection.is_empty() {
        return Err(AcupointError::EmptySelection { category });
    }

    let needles: Vec<String> = selection.iter().map(str::to_lowercase).collect();

    Ok(points
        .iter()
        .filter(|point| matches_any(point.field(field), &needles))
        .cloned()
        .collect())
}

/// Search `dataset` in `category` (Symptoms field for symptoms, Diseases for diseases)
pub fn filter_dataset(
    dataset: &Dataset,
    selection: &SelectionSet,
    category: Category,
) -> Result<Vec<PointRecord>, AcupointError> {
    filter_points(dataset.points(), selection, category.field(), category)
}

/// `needles` must already be lowercased
fn matches_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
