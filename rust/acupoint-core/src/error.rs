//! Crate error type
//!
//! Two variants are user-facing warnings (empty selection, empty inclusion). They abort the
//! one requested operation and leave session state untouched. The rest are boundary and
//! rendering failures.

use crate::dataset::Category;

/// Errors produced by the session, filter engine and export composer
#[derive(Debug, Clone, PartialEq)]
pub enum AcupointError {
    /// A search was requested with no selected criteria
    EmptySelection { category: Category },
    /// An export was requested with every result row deselected
    EmptyInclusion,
    /// Row index outside the current result projection
    RowOutOfRange { index: usize, len: usize },
    /// Category name not recognised at the JS boundary
    UnknownCategory(String),
    /// Malformed payload received from JS
    InvalidInput(String),
    /// PDF writer failure
    Render(String),
}

impl AcupointError {
    /// True for the two warnings the UI shows as a blocking alert
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AcupointError::EmptySelection { .. } | AcupointError::EmptyInclusion
        )
    }
}

impl std::fmt::Display for AcupointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcupointError::EmptySelection { category } => {
                write!(f, "Please select at least one {}", category.singular())
            }
            AcupointError::EmptyInclusion => write!(
                f,
                "Please select at least one acupuncture point to include in the prescription"
            ),
            AcupointError::RowOutOfRange { index, len } => {
                write!(f, "Row {} out of range (results: {})", index, len)
            }
            AcupointError::UnknownCategory(name) => write!(f, "Unknown category: {}", name),
            AcupointError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AcupointError::Render(msg) => write!(f, "PDF render error: {}", msg),
        }
    }
}

impl std::error::Error for AcupointError {}

// =============================================================================
// Tests
// =============================================================================
