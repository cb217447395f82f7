//! Tests for the prescription layout: block order, patient block, summary table, details

use crate::dataset::PointRecord;
use crate::error::AcupointError;
use crate::export::config::{LayoutConfig, Rgb};
use crate::export::document::{Align, PrescriptionDocument};
use crate::export::layout::ExportComposer;
use crate::export::patient::PatientMeta;
use chrono::NaiveDate;

fn march_7() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

fn union_valley() -> PointRecord {
    PointRecord {
        meridian_system: "Large Intestine (LI)".into(),
        point_code: "LI4".into(),
        english_name: "Union Valley".into(),
        chinese_name: "Hegu".into(),
        pinyin: "He Gu".into(),
        point_category: "Yuan-Source".into(),
        indications: "Pain of the head and face".into(),
        symptoms: "headache, toothache".into(),
        diseases: "common cold".into(),
        functions: "Expels wind".into(),
        location_cun: "Dorsum of hand".into(),
        anatomical_location: "First dorsal interosseous".into(),
        general_location: "Hand".into(),
        contraindications: "Pregnancy".into(),
        needling_depth: "0.5-1 cun".into(),
        needling_method: "Perpendicular".into(),
        stimulation_method: "Manual".into(),
        electrical_stimulation: "2Hz".into(),
    }
}

fn compose_one(meta: PatientMeta) -> PrescriptionDocument {
    ExportComposer::default()
        .compose(&[union_valley()], &meta, march_7())
        .unwrap()
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_empty_inclusion_is_rejected() {
    let composer = ExportComposer::default();
    let result = composer.compose(&[], &PatientMeta::new("Jane Doe", "42", "F"), march_7());
    assert_eq!(result.unwrap_err(), AcupointError::EmptyInclusion);

    // Regardless of patient data
    assert!(composer.compose(&[], &PatientMeta::default(), march_7()).is_err());
}

// ============================================================================
// Header + Patient Block
// ============================================================================

#[test]
fn test_title_and_date_are_centered() {
    let doc = compose_one(PatientMeta::new("Jane Doe", "42", "F"));

    let (page, title) = doc.find_text("SHIZOR - Acupuncture Prescription").unwrap();
    assert_eq!(page, 1);
    assert_eq!(title.align, Align::Center);
    assert_eq!(title.font_size, 22.0);

    let (_, date) = doc.find_text("Date: ").unwrap();
    assert_eq!(date.text, "Date: March 7, 2024");
    assert_eq!(date.align, Align::Center);
    assert!(date.y > title.y);
}

#[test]
fn test_patient_block() {
    let doc = compose_one(PatientMeta::new("Jane Doe", "42", "F"));
    let page = &doc.pages[0];

    assert!(page.find_text("Patient Information").is_some());
    assert_eq!(page.find_text("Name: ").unwrap().text, "Name: Jane Doe");
    assert_eq!(page.find_text("Age: ").unwrap().text, "Age: 42");
    assert_eq!(page.find_text("Sex: ").unwrap().text, "Sex: F");
}

#[test]
fn test_blank_patient_fields_print_na() {
    let doc = compose_one(PatientMeta::new("", " ", ""));
    let page = &doc.pages[0];

    assert_eq!(page.find_text("Name: ").unwrap().text, "Name: N/A");
    assert_eq!(page.find_text("Age: ").unwrap().text, "Age: N/A");
    assert_eq!(page.find_text("Sex: ").unwrap().text, "Sex: N/A");
}

#[test]
fn test_file_name_embeds_patient_and_date() {
    let doc = compose_one(PatientMeta::new("Jane Doe", "", ""));
    assert_eq!(doc.file_name, "Acupuncture_Prescription_Jane_Doe_20240307.pdf");
}

// ============================================================================
// Summary Table
// ============================================================================

#[test]
fn test_summary_table_columns() {
    let doc = compose_one(PatientMeta::default());
    let page = &doc.pages[0];

    let headers: Vec<_> = page
        .texts()
        .filter(|t| t.bold)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        headers,
        vec![
            "Meridian",
            "Code",
            "English Name",
            "Chinese",
            "Pinyin",
            "Category",
            "Functions",
            "Indications",
            "Location",
            "Anatomical",
            "Depth",
            "Method"
        ]
    );

    // Code sits in the second column: margin 15 + Meridian 20 + padding 2
    let code = page.texts().find(|t| t.text == "LI4").unwrap();
    assert!((code.x - 37.0).abs() < 1e-4);
}

#[test]
fn test_summary_table_excludes_detail_fields() {
    let doc = compose_one(PatientMeta::default());

    // Symptoms, diseases, contraindications and stimulation only appear as detail lines
    for excluded in ["headache, toothache", "common cold", "Pregnancy", "Manual", "2Hz", "Hand"] {
        assert!(
            doc.texts().all(|t| t.text != excluded),
            "{} should not be a table cell",
            excluded
        );
    }
}

#[test]
fn test_header_row_is_filled_and_rows_alternate() {
    let mut second = union_valley();
    second.point_code = "ST36".into();

    let config = LayoutConfig::default();
    let doc = ExportComposer::new(config.clone())
        .compose(&[union_valley(), second], &PatientMeta::default(), march_7())
        .unwrap();
    let rects: Vec<_> = doc.pages[0].rects().collect();

    // 12 columns x (header + 2 rows)
    assert_eq!(rects.len(), 36);
    assert!(rects[..12].iter().all(|r| r.fill == Some(config.head_fill)));
    assert!(rects[12..24].iter().all(|r| r.fill.is_none()));
    assert!(rects[24..].iter().all(|r| r.fill == Some(config.alternate_fill)));

    // Rows are stacked without gaps
    assert!((rects[12].y - (rects[0].y + rects[0].height)).abs() < 1e-4);
    assert!((rects[24].y - (rects[12].y + rects[12].height)).abs() < 1e-4);
    assert_eq!(rects[0].y, config.table_start_y);
}

#[test]
fn test_long_cell_grows_row_height() {
    let mut wordy = union_valley();
    wordy.functions = "Expels wind, releases the exterior, stops pain, regulates the face \
                       and mouth, tonifies qi and consolidates the exterior"
        .into();

    let composer = ExportComposer::default();
    let short = composer
        .compose(&[union_valley()], &PatientMeta::default(), march_7())
        .unwrap();
    let tall = composer
        .compose(&[wordy], &PatientMeta::default(), march_7())
        .unwrap();

    let body_height = |doc: &PrescriptionDocument| doc.pages[0].rects().nth(12).unwrap().height;
    assert!(body_height(&tall) > body_height(&short));
}

// ============================================================================
// Detail Blocks
// ============================================================================

#[test]
fn test_detail_block_content_and_order() {
    let doc = compose_one(PatientMeta::default());
    let page = &doc.pages[0];

    let heading = page.find_text("Additional Point Details:").unwrap();
    let title = page.find_text("1. ").unwrap();
    assert_eq!(title.text, "1. LI4 - Union Valley");

    let lines: Vec<_> = [
        "Symptoms: headache, toothache",
        "Diseases: common cold",
        "Contraindications: Pregnancy",
        "Stimulation: Manual | Electrical: 2Hz",
    ]
    .iter()
    .map(|expected| page.texts().find(|t| t.text == *expected).unwrap())
    .collect();

    assert!(heading.y < title.y);
    assert!(title.y < lines[0].y);
    for pair in lines.windows(2) {
        assert!(pair[0].y < pair[1].y);
    }
    assert!(lines.iter().all(|l| l.x == 20.0));

    // Details start below the table
    let table_bottom = page
        .rects()
        .map(|r| r.y + r.height)
        .fold(0.0f32, f32::max);
    assert!(heading.y > table_bottom);
}

#[test]
fn test_detail_numbering_follows_included_order() {
    let mut second = union_valley();
    second.point_code = "ST36".into();
    second.english_name = "Leg Three Miles".into();

    let doc = ExportComposer::default()
        .compose(&[second, union_valley()], &PatientMeta::default(), march_7())
        .unwrap();

    assert!(doc.find_text("1. ST36 - Leg Three Miles").is_some());
    assert!(doc.find_text("2. LI4 - Union Valley").is_some());
}

#[test]
fn test_long_paragraph_wraps_at_fixed_advance() {
    let mut record = union_valley();
    record.contraindications = "Contraindicated in pregnancy; avoid deep needling over \
        blood vessels; use caution in patients with bleeding disorders, in the elderly, in \
        debilitated patients, after heavy meals, with severe fatigue, and in patients who \
        are anxious about needling or prone to fainting during treatment sessions"
        .repeat(2);

    let config = LayoutConfig::default();
    let doc = ExportComposer::new(config.clone())
        .compose(&[record], &PatientMeta::default(), march_7())
        .unwrap();
    let page = &doc.pages[0];

    let first = page.find_text("Contraindications: ").unwrap();
    let following: Vec<_> = page
        .texts()
        .filter(|t| t.x == config.detail_indent_x && t.y > first.y)
        .collect();
    let next_para = page.find_text("Stimulation: ").unwrap();

    // Continuation lines sit between the first line and the next paragraph
    let continuation: Vec<_> = following.iter().filter(|t| t.y < next_para.y).collect();
    assert!(!continuation.is_empty());
    assert!((continuation[0].y - first.y - config.detail_line_advance).abs() < 1e-4);
}

// ============================================================================
// Footer + Serialization
// ============================================================================

#[test]
fn test_single_page_footer() {
    let doc = compose_one(PatientMeta::default());
    assert_eq!(doc.page_count(), 1);

    let page = &doc.pages[0];
    let footer = page.find_text("Page ").unwrap();
    assert_eq!(footer.text, "Page 1 of 1");
    assert_eq!(footer.align, Align::Center);
    assert_eq!(footer.color, Rgb(150, 150, 150));
    assert!(page
        .find_text("Generated by SHIZOR - Acupuncture Point Prescription System")
        .is_some());
}

#[test]
fn test_document_serializes_for_js() {
    let doc = compose_one(PatientMeta::new("Jane Doe", "42", "F"));
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["fileName"], "Acupuncture_Prescription_Jane_Doe_20240307.pdf");
    assert_eq!(value["pageWidth"], 297.0);
    let first = &value["pages"][0]["elements"][0];
    assert_eq!(first["kind"], "text");
    assert_eq!(first["align"], "center");
    assert_eq!(first["fontSize"], 22.0);
}
