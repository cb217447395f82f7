//! Patient metadata entered alongside an export

use serde::{Deserialize, Serialize};

/// Placeholder printed for a blank patient field
pub const NOT_AVAILABLE: &str = "N/A";

/// Free-text patient fields. Nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientMeta {
    pub name: String,
    pub age: String,
    pub sex: String,
}

impl PatientMeta {
    pub fn new(name: impl Into<String>, age: impl Into<String>, sex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            sex: sex.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        or_not_available(&self.name)
    }

    pub fn display_age(&self) -> &str {
        or_not_available(&self.age)
    }

    pub fn display_sex(&self) -> &str {
        or_not_available(&self.sex)
    }
}

/// Blank (empty or whitespace-only) → "N/A"
fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}
