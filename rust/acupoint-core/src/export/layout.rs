//! Export composer: lays the prescription out across landscape pages
//!
//! Single forward pass over header, patient block, summary table and detail blocks. Page
//! breaks are driven by the vertical cursor against the thresholds in [`LayoutConfig`].
//! Footers are written afterwards by [`finalize_footers`], once the page count is known.

use chrono::NaiveDate;

use crate::dataset::{PointField, PointRecord};
use crate::error::AcupointError;
use crate::export::config::{LayoutConfig, Mm, Pt, Rgb};
use crate::export::document::{Align, Element, Page, PrescriptionDocument, RectBlock, TextRun};
use crate::export::metrics::wrap_text;
use crate::export::naming::{long_date, prescription_file_name};
use crate::export::patient::PatientMeta;

/// Summary table columns: header label and source field
pub const SUMMARY_COLUMNS: [(&str, PointField); 12] = [
    ("Meridian", PointField::MeridianSystem),
    ("Code", PointField::PointCode),
    ("English Name", PointField::EnglishName),
    ("Chinese", PointField::ChineseName),
    ("Pinyin", PointField::Pinyin),
    ("Category", PointField::PointCategory),
    ("Functions", PointField::Functions),
    ("Indications", PointField::Indications),
    ("Location", PointField::LocationCun),
    ("Anatomical", PointField::AnatomicalLocation),
    ("Depth", PointField::NeedlingDepth),
    ("Method", PointField::NeedlingMethod),
];

/// Width used when the configured widths run short of the column list
const FALLBACK_COLUMN_WIDTH: Mm = 20.0;

/// Baseline position inside a line box, as a fraction of the line height
const BASELINE_RATIO: f32 = 0.8;

/// Title line of a detail block, numbered from 1
pub fn detail_title(number: usize, record: &PointRecord) -> String {
    format!("{}. {} - {}", number, record.point_code, record.english_name)
}

/// The four free-text paragraphs of a detail block
pub fn detail_paragraphs(record: &PointRecord) -> [String; 4] {
    [
        format!("Symptoms: {}", record.symptoms),
        format!("Diseases: {}", record.diseases),
        format!("Contraindications: {}", record.contraindications),
        format!(
            "Stimulation: {} | Electrical: {}",
            record.stimulation_method, record.electrical_stimulation
        ),
    ]
}

// =============================================================================
// Page Cursor
// =============================================================================

/// Current page plus the vertical write position
struct PageCursor {
    done: Vec<Page>,
    current: Page,
    y: Mm,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            current: Page::new(1),
            y: 0.0,
        }
    }

    fn add_page(&mut self, top: Mm) {
        let next = Page::new(self.current.number + 1);
        self.done.push(std::mem::replace(&mut self.current, next));
        self.y = top;
    }

    /// Start a new page when the cursor has passed `threshold`
    fn break_if_past(&mut self, threshold: Mm, top: Mm) -> bool {
        if self.y > threshold {
            self.add_page(top);
            true
        } else {
            false
        }
    }

    fn push(&mut self, element: Element) {
        self.current.elements.push(element);
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Head,
    Body,
    Alternate,
}

// =============================================================================
// Composer
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ExportComposer {
    config: LayoutConfig,
}

impl ExportComposer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `records` (the included subset, in result order) for `meta` on `date`.
    ///
    /// An empty record list is refused; no document is produced.
    pub fn compose(
        &self,
        records: &[PointRecord],
        meta: &PatientMeta,
        date: NaiveDate,
    ) -> Result<PrescriptionDocument, AcupointError> {
        if records.is_empty() {
            return Err(AcupointError::EmptyInclusion);
        }

        let mut cursor = PageCursor::new();
        self.layout_header(&mut cursor, meta, date);
        self.layout_summary_table(&mut cursor, records);
        self.layout_details(&mut cursor, records);

        let mut pages = cursor.finish();
        finalize_footers(&mut pages, &self.config);

        Ok(PrescriptionDocument {
            title: self.config.title.clone(),
            file_name: prescription_file_name(meta.display_name(), date),
            page_width: self.config.page_width,
            page_height: self.config.page_height,
            pages,
        })
    }

    // =========================================================================
    // Header + Patient Block
    // =========================================================================

    fn layout_header(&self, cursor: &mut PageCursor, meta: &PatientMeta, date: NaiveDate) {
        let c = &self.config;

        cursor.push(centered(&c.title, c.center_x, c.title_y, c.title_font_size, c.heading_color));
        cursor.push(centered(
            &format!("Date: {}", long_date(date)),
            c.center_x,
            c.date_y,
            c.date_font_size,
            c.muted_color,
        ));

        cursor.push(text(
            &c.patient_heading,
            c.margin_left,
            c.patient_heading_y,
            c.patient_heading_font_size,
            c.heading_color,
        ));

        let entries = [
            format!("Name: {}", meta.display_name()),
            format!("Age: {}", meta.display_age()),
            format!("Sex: {}", meta.display_sex()),
        ];
        for (entry, x) in entries.iter().zip(c.patient_field_x) {
            cursor.push(text(entry, x, c.patient_y, c.patient_font_size, c.body_color));
        }
    }

    // =========================================================================
    // Summary Table
    // =========================================================================

    fn column_width(&self, index: usize) -> Mm {
        self.config
            .column_widths
            .get(index)
            .copied()
            .unwrap_or(FALLBACK_COLUMN_WIDTH)
    }

    fn wrap_cells<'a>(
        &self,
        values: impl Iterator<Item = &'a str>,
        font_size: Pt,
        bold: bool,
    ) -> Vec<Vec<String>> {
        let inner = |i: usize| (self.column_width(i) - 2.0 * self.config.cell_padding).max(0.0);
        values
            .enumerate()
            .map(|(i, value)| wrap_text(value, inner(i), font_size, bold))
            .collect()
    }

    fn row_height(&self, cells: &[Vec<String>], font_size: Pt) -> Mm {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * self.config.line_height(font_size) + 2.0 * self.config.cell_padding
    }

    /// Header row, then one body row per record. The header repeats on every page the
    /// table spans. A row that does not fit in the space left is split between cell lines:
    /// the lines that fit stay, the rest continue under the header on the next page. When
    /// not even one line fits, the whole row moves.
    fn layout_summary_table(&self, cursor: &mut PageCursor, records: &[PointRecord]) {
        let c = &self.config;
        let head = self.wrap_cells(
            SUMMARY_COLUMNS.iter().map(|(label, _)| *label),
            c.head_font_size,
            true,
        );
        let limit = c.page_height - c.table_bottom_margin;
        let line_height = c.line_height(c.body_font_size);

        cursor.y = c.table_start_y;
        self.draw_row(cursor, &head, RowStyle::Head);
        let mut fresh_page = true;

        for (i, record) in records.iter().enumerate() {
            let style = if i % 2 == 1 {
                RowStyle::Alternate
            } else {
                RowStyle::Body
            };
            let mut cells = self.wrap_cells(
                SUMMARY_COLUMNS.iter().map(|(_, field)| record.field(*field)),
                c.body_font_size,
                false,
            );

            loop {
                let height = self.row_height(&cells, c.body_font_size);
                if cursor.y + height <= limit {
                    self.draw_row(cursor, &cells, style);
                    fresh_page = false;
                    break;
                }

                let room = limit - cursor.y - 2.0 * c.cell_padding;
                let mut fit = if room > 0.0 {
                    (room / line_height).floor() as usize
                } else {
                    0
                };
                // A page with only the header must take at least one line
                if fresh_page {
                    fit = fit.max(1);
                }

                if fit > 0 {
                    let (head_part, rest) = split_cells(&cells, fit);
                    self.draw_row(cursor, &head_part, style);
                    if rest.iter().all(Vec::is_empty) {
                        fresh_page = false;
                        break;
                    }
                    cells = rest;
                }

                cursor.add_page(c.table_top_margin);
                self.draw_row(cursor, &head, RowStyle::Head);
                fresh_page = true;
            }
        }
    }

    fn draw_row(&self, cursor: &mut PageCursor, cells: &[Vec<String>], style: RowStyle) {
        let c = &self.config;
        let (font_size, bold, color, fill) = match style {
            RowStyle::Head => (c.head_font_size, true, c.head_text_color, Some(c.head_fill)),
            RowStyle::Body => (c.body_font_size, false, c.table_text_color, None),
            RowStyle::Alternate => (
                c.body_font_size,
                false,
                c.table_text_color,
                Some(c.alternate_fill),
            ),
        };
        let line_height = c.line_height(font_size);
        let height = self.row_height(cells, font_size);
        let top = cursor.y;
        let mut x = c.margin_left;

        for (i, lines) in cells.iter().enumerate() {
            let width = self.column_width(i);
            cursor.push(Element::Rect(RectBlock {
                x,
                y: top,
                width,
                height,
                fill,
                stroke: Some(c.grid_color),
                line_width: c.grid_line_width,
            }));

            for (k, line) in lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
                let baseline =
                    top + c.cell_padding + (k as f32 + BASELINE_RATIO) * line_height;
                cursor.push(Element::Text(TextRun {
                    text: line.clone(),
                    x: x + c.cell_padding,
                    y: baseline,
                    font_size,
                    bold,
                    color,
                    align: Align::Left,
                }));
            }

            x += width;
        }

        cursor.y = top + height;
    }

    // =========================================================================
    // Detail Blocks
    // =========================================================================

    fn layout_details(&self, cursor: &mut PageCursor, records: &[PointRecord]) {
        let c = &self.config;

        cursor.y += c.details_gap;
        cursor.break_if_past(c.table_continuation_threshold, c.continuation_top);
        cursor.push(text(
            &c.details_heading,
            c.margin_left,
            cursor.y,
            c.details_heading_font_size,
            c.muted_color,
        ));
        cursor.y += c.details_heading_advance;

        for (i, record) in records.iter().enumerate() {
            cursor.break_if_past(c.table_continuation_threshold, c.continuation_top);
            cursor.push(text(
                &detail_title(i + 1, record),
                c.margin_left,
                cursor.y,
                c.point_title_font_size,
                c.heading_color,
            ));
            cursor.y += c.point_title_advance;

            for paragraph in detail_paragraphs(record) {
                cursor.break_if_past(c.detail_block_threshold, c.continuation_top);

                for line in wrap_text(&paragraph, c.detail_wrap_width, c.detail_font_size, false) {
                    cursor.break_if_past(c.content_bottom, c.continuation_top);
                    cursor.push(text(
                        &line,
                        c.detail_indent_x,
                        cursor.y,
                        c.detail_font_size,
                        c.body_color,
                    ));
                    cursor.y += c.detail_line_advance;
                }
            }

            cursor.y += c.block_gap;
        }
    }
}

/// Cut every cell after its first `lines` lines
fn split_cells(cells: &[Vec<String>], lines: usize) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    cells
        .iter()
        .map(|cell| {
            let at = lines.min(cell.len());
            (cell[..at].to_vec(), cell[at..].to_vec())
        })
        .unzip()
}

// =============================================================================
// Footer Finalization
// =============================================================================

/// Second pass: stamp "Page i of N" and the attribution line on every page
pub fn finalize_footers(pages: &mut [Page], config: &LayoutConfig) {
    let total = pages.len();

    for page in pages.iter_mut() {
        page.elements.push(centered(
            &format!("Page {} of {}", page.number, total),
            config.center_x,
            config.footer_page_y,
            config.footer_font_size,
            config.footer_color,
        ));
        page.elements.push(centered(
            &config.attribution,
            config.center_x,
            config.footer_attribution_y,
            config.footer_font_size,
            config.footer_color,
        ));
    }
}

fn text(content: &str, x: Mm, y: Mm, font_size: Pt, color: Rgb) -> Element {
    Element::Text(TextRun {
        text: content.to_string(),
        x,
        y,
        font_size,
        bold: false,
        color,
        align: Align::Left,
    })
}

fn centered(content: &str, x: Mm, y: Mm, font_size: Pt, color: Rgb) -> Element {
    Element::Text(TextRun {
        text: content.to_string(),
        x,
        y,
        font_size,
        bold: false,
        color,
        align: Align::Center,
    })
}
