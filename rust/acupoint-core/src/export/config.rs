//! Layout configuration for the prescription export
//!
//! All positions are millimetres on a landscape A4 page, origin top-left, y measured to
//! the text baseline. Font sizes are points.

use serde::{Deserialize, Serialize};

/// Type aliases for clarity
pub type Mm = f32;
pub type Pt = f32;

/// RGB colour, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to 0.0..=1.0
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    // ===== PAGE =====
    pub page_width: Mm,
    pub page_height: Mm,
    /// x of centered captions (title, date, footer)
    pub center_x: Mm,
    /// Left edge of headings and the summary table
    pub margin_left: Mm,

    // ===== HEADER =====
    pub title: String,
    pub title_font_size: Pt,
    pub title_y: Mm,
    pub date_font_size: Pt,
    pub date_y: Mm,

    // ===== PATIENT BLOCK =====
    pub patient_heading: String,
    pub patient_heading_font_size: Pt,
    pub patient_heading_y: Mm,
    pub patient_font_size: Pt,
    pub patient_y: Mm,
    /// x of the Name, Age and Sex entries
    pub patient_field_x: [Mm; 3],

    // ===== SUMMARY TABLE =====
    pub table_start_y: Mm,
    /// One width per summary column
    pub column_widths: Vec<Mm>,
    pub cell_padding: Mm,
    pub head_font_size: Pt,
    pub body_font_size: Pt,
    /// Line height as a multiple of the font size
    pub line_height_factor: f32,
    pub grid_line_width: Mm,
    /// Top of the table on continuation pages
    pub table_top_margin: Mm,
    /// A body row whose bottom would pass `page_height - table_bottom_margin` moves to a new page
    pub table_bottom_margin: Mm,

    // ===== DETAIL BLOCKS =====
    /// Gap between the table's last row and the details heading
    pub details_gap: Mm,
    pub details_heading: String,
    pub details_heading_font_size: Pt,
    pub details_heading_advance: Mm,
    pub point_title_font_size: Pt,
    pub point_title_advance: Mm,
    pub detail_font_size: Pt,
    pub detail_indent_x: Mm,
    pub detail_wrap_width: Mm,
    pub detail_line_advance: Mm,
    pub block_gap: Mm,

    // ===== PAGE BREAKS =====
    /// Checked before the details heading and before each point title
    pub table_continuation_threshold: Mm,
    /// Checked before each wrapped detail paragraph
    pub detail_block_threshold: Mm,
    /// Baseline limit for a single wrapped line; keeps long paragraphs off the footer
    pub content_bottom: Mm,
    /// Restart y after a break outside the table
    pub continuation_top: Mm,

    // ===== FOOTER =====
    pub footer_font_size: Pt,
    pub footer_page_y: Mm,
    pub footer_attribution_y: Mm,
    pub attribution: String,

    // ===== COLOURS =====
    pub heading_color: Rgb,
    pub muted_color: Rgb,
    pub body_color: Rgb,
    pub table_text_color: Rgb,
    pub head_fill: Rgb,
    pub head_text_color: Rgb,
    pub alternate_fill: Rgb,
    pub grid_color: Rgb,
    pub footer_color: Rgb,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            center_x: 148.0,
            margin_left: 15.0,

            title: "SHIZOR - Acupuncture Prescription".to_string(),
            title_font_size: 22.0,
            title_y: 20.0,
            date_font_size: 10.0,
            date_y: 27.0,

            patient_heading: "Patient Information".to_string(),
            patient_heading_font_size: 12.0,
            patient_heading_y: 38.0,
            patient_font_size: 10.0,
            patient_y: 45.0,
            patient_field_x: [15.0, 70.0, 100.0],

            table_start_y: 52.0,
            column_widths: vec![
                20.0, 15.0, 25.0, 15.0, 15.0, 20.0, 35.0, 30.0, 25.0, 25.0, 15.0, 20.0,
            ],
            cell_padding: 2.0,
            head_font_size: 8.0,
            body_font_size: 7.0,
            line_height_factor: 1.15,
            grid_line_width: 0.1,
            table_top_margin: 14.0,
            table_bottom_margin: 14.0,

            details_gap: 10.0,
            details_heading: "Additional Point Details:".to_string(),
            details_heading_font_size: 10.0,
            details_heading_advance: 7.0,
            point_title_font_size: 9.0,
            point_title_advance: 5.0,
            detail_font_size: 8.0,
            detail_indent_x: 20.0,
            detail_wrap_width: 270.0,
            detail_line_advance: 4.0,
            block_gap: 3.0,

            table_continuation_threshold: 180.0,
            detail_block_threshold: 185.0,
            content_bottom: 195.0,
            continuation_top: 20.0,

            footer_font_size: 8.0,
            footer_page_y: 200.0,
            footer_attribution_y: 205.0,
            attribution: "Generated by SHIZOR - Acupuncture Point Prescription System"
                .to_string(),

            heading_color: Rgb(44, 62, 80),
            muted_color: Rgb(108, 117, 125),
            body_color: Rgb(73, 80, 87),
            table_text_color: Rgb(51, 51, 51),
            head_fill: Rgb(44, 62, 80),
            head_text_color: Rgb::WHITE,
            alternate_fill: Rgb(248, 249, 250),
            grid_color: Rgb(200, 200, 200),
            footer_color: Rgb(150, 150, 150),
        }
    }
}

impl LayoutConfig {
    /// Smaller body text; fits more rows and detail lines per page
    pub fn compact() -> Self {
        Self {
            body_font_size: 6.0,
            head_font_size: 7.0,
            detail_font_size: 7.0,
            detail_line_advance: 3.5,
            block_gap: 2.0,
            ..Self::default()
        }
    }

    /// Line height in mm for a font size
    pub fn line_height(&self, font_size: Pt) -> Mm {
        font_size * self.line_height_factor * MM_PER_PT
    }

    /// Total width of the summary table
    pub fn table_width(&self) -> Mm {
        self.column_widths.iter().sum()
    }
}

/// 1 pt = 1/72 in
pub const MM_PER_PT: f32 = 25.4 / 72.0;
