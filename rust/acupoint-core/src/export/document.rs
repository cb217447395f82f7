//! Layout model produced by the composer
//!
//! Pages hold positioned text runs and rectangles. The PDF renderer and the JS side both
//! consume this model, so every type here serializes.

use serde::{Deserialize, Serialize};

use crate::export::config::{Mm, Pt, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// One line of text; `y` is the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub x: Mm,
    pub y: Mm,
    pub font_size: Pt,
    pub bold: bool,
    pub color: Rgb,
    pub align: Align,
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectBlock {
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub line_width: Mm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    Text(TextRun),
    Rect(RectBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rect(_) => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectBlock> {
        self.elements.iter().filter_map(|e| match e {
            Element::Rect(r) => Some(r),
            Element::Text(_) => None,
        })
    }

    /// First text run whose content starts with `prefix`
    pub fn find_text(&self, prefix: &str) -> Option<&TextRun> {
        self.texts().find(|t| t.text.starts_with(prefix))
    }
}

/// A composed, paginated prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDocument {
    pub title: String,
    pub file_name: String,
    pub page_width: Mm,
    pub page_height: Mm,
    pub pages: Vec<Page>,
}

impl PrescriptionDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text run across all pages, in page order
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    /// (page number, run) of the first text starting with `prefix`
    pub fn find_text(&self, prefix: &str) -> Option<(usize, &TextRun)> {
        self.pages
            .iter()
            .find_map(|p| p.find_text(prefix).map(|t| (p.number, t)))
    }
}

/// Final export output: file name plus PDF bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
