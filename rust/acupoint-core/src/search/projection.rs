//! Result projection: the last filter result plus per-row inclusion flags

use serde::{Deserialize, Serialize};

use crate::dataset::{PointField, PointRecord};
use crate::error::AcupointError;

// =============================================================================
// Display Types
// =============================================================================

/// What the results area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No search run yet, or the owning selection was cleared
    Hidden,
    /// Search ran and matched nothing
    NoResults,
    /// Table visible with a count line
    Results { count_label: String },
}

impl DisplayState {
    /// Name the results renderer switches on
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Hidden => "hidden",
            DisplayState::NoResults => "noResults",
            DisplayState::Results { .. } => "results",
        }
    }

    pub fn count_label(&self) -> Option<&str> {
        match self {
            DisplayState::Results { count_label } => Some(count_label),
            _ => None,
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub index: usize,
    pub included: bool,
    /// Column values in [`PointField::ALL`] order
    pub cells: Vec<String>,
}

/// "1 point found" / "N points found"
pub fn count_label(count: usize) -> String {
    format!("{} point{} found", count, if count != 1 { "s" } else { "" })
}

// =============================================================================
// Projection
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ResultProjection {
    records: Vec<PointRecord>,
    included: Vec<bool>,
    searched: bool,
}

impl ResultProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh projection from a filter result; every row starts included
    pub fn from_records(records: Vec<PointRecord>) -> Self {
        let included = vec![true; records.len()];
        Self {
            records,
            included,
            searched: true,
        }
    }

    /// Replace contents wholesale with a new filter result
    pub fn replace(&mut self, records: Vec<PointRecord>) {
        *self = Self::from_records(records);
    }

    /// Empty and hide
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    pub fn inclusion_flags(&self) -> &[bool] {
        &self.included
    }

    pub fn is_included(&self, index: usize) -> Option<bool> {
        self.included.get(index).copied()
    }

    /// Select-all / deselect-all
    pub fn set_all(&mut self, included: bool) {
        self.included.iter_mut().for_each(|flag| *flag = included);
    }

    pub fn set_included(&mut self, index: usize, included: bool) -> Result<(), AcupointError> {
        let len = self.included.len();
        let flag = self
            .included
            .get_mut(index)
            .ok_or(AcupointError::RowOutOfRange { index, len })?;
        *flag = included;
        Ok(())
    }

    /// Flip one row; returns the new flag
    pub fn toggle(&mut self, index: usize) -> Result<bool, AcupointError> {
        let len = self.included.len();
        let flag = self
            .included
            .get_mut(index)
            .ok_or(AcupointError::RowOutOfRange { index, len })?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Included records, in result order
    pub fn included_records(&self) -> Vec<PointRecord> {
        self.records
            .iter()
            .zip(&self.included)
            .filter(|(_, included)| **included)
            .map(|(record, _)| record.clone())
            .collect()
    }

    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|&&flag| flag).count()
    }

    pub fn display_state(&self) -> DisplayState {
        if !self.searched {
            DisplayState::Hidden
        } else if self.records.is_empty() {
            DisplayState::NoResults
        } else {
            DisplayState::Results {
                count_label: count_label(self.records.len()),
            }
        }
    }

    pub fn table_rows(&self) -> Vec<ResultRow> {
        self.records
            .iter()
            .zip(&self.included)
            .enumerate()
            .map(|(index, (record, &included))| ResultRow {
                index,
                included,
                cells: PointField::ALL
                    .iter()
                    .map(|&field| record.field(field).to_string())
                    .collect(),
            })
            .collect()
    }
}
