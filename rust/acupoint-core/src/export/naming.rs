//! Export file naming and date formatting

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub const FILE_PREFIX: &str = "Acupuncture_Prescription";
pub const FILE_EXTENSION: &str = "pdf";

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// `Acupuncture_Prescription_<name>_<YYYYMMDD>.pdf`
///
/// Each whitespace run in the name becomes one underscore. Path separators become `-` so
/// the "N/A" placeholder stays a single path component.
pub fn prescription_file_name(patient_name: &str, date: NaiveDate) -> String {
    let name = whitespace()
        .replace_all(patient_name, "_")
        .replace(['/', '\\'], "-");

    format!(
        "{}_{}_{}.{}",
        FILE_PREFIX,
        name,
        date.format("%Y%m%d"),
        FILE_EXTENSION
    )
}

/// Long-form date, e.g. "March 7, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
