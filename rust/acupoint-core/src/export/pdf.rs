//! PDF rendering of a composed prescription
//!
//! Maps the layout model onto `printpdf` pages using the built-in Helvetica fonts. The
//! layout model is top-left based; PDF user space is bottom-left, so y is flipped here.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm as PdfMm, PdfDocument, PdfLayerReference, Rect,
    Rgb as PdfRgb,
};
use std::io::BufWriter;

use crate::error::AcupointError;
use crate::export::config::{Mm, Rgb, MM_PER_PT};
use crate::export::document::{Align, Element, PrescriptionDocument, RectBlock, TextRun};
use crate::export::metrics::text_width;

const LAYER_NAME: &str = "Layer 1";

/// Characters outside Latin-1 that WinAnsiEncoding (0x80..=0x9F) still prints
const WIN_ANSI_EXTRAS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render `document` to PDF bytes
pub fn render_pdf(document: &PrescriptionDocument) -> Result<Vec<u8>, AcupointError> {
    let width = PdfMm(document.page_width);
    let height = PdfMm(document.page_height);

    let (doc, first_page, first_layer) =
        PdfDocument::new(&document.title, width, height, LAYER_NAME);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AcupointError::Render(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AcupointError::Render(format!("font error: {e}")))?,
    };

    for (i, page) in document.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };

        for element in &page.elements {
            match element {
                Element::Rect(rect) => draw_rect(&layer, rect, document.page_height),
                Element::Text(run) => draw_text(&layer, run, &fonts, document.page_height),
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| AcupointError::Render(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| AcupointError::Render(format!("buffer error: {e}")))
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.unit();
    Color::Rgb(PdfRgb::new(r, g, b, None))
}

fn draw_rect(layer: &PdfLayerReference, block: &RectBlock, page_height: Mm) {
    let mode = match (block.fill, block.stroke) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };

    if let Some(fill) = block.fill {
        layer.set_fill_color(pdf_color(fill));
    }
    if let Some(stroke) = block.stroke {
        layer.set_outline_color(pdf_color(stroke));
        // Outline thickness is in points
        layer.set_outline_thickness(block.line_width / MM_PER_PT);
    }

    let bottom = page_height - (block.y + block.height);
    let top = page_height - block.y;
    let rect = Rect::new(
        PdfMm(block.x),
        PdfMm(bottom),
        PdfMm(block.x + block.width),
        PdfMm(top),
    )
    .with_mode(mode);

    layer.add_rect(rect);
}

fn draw_text(layer: &PdfLayerReference, run: &TextRun, fonts: &Fonts, page_height: Mm) {
    let font = if run.bold { &fonts.bold } else { &fonts.regular };
    let printed = encodable(&run.text);

    layer.set_fill_color(pdf_color(run.color));
    layer.use_text(
        printed.as_str(),
        run.font_size,
        PdfMm(origin_x(run, &printed)),
        PdfMm(page_height - run.y),
        font,
    );
}

/// Left edge of `run` once its text is reduced to `printed`
fn origin_x(run: &TextRun, printed: &str) -> Mm {
    match run.align {
        Align::Left => run.x,
        Align::Center => run.x - text_width(printed, run.font_size, run.bold) / 2.0,
    }
}

/// Built-in fonts are WinAnsi encoded; anything they cannot show prints as '?'
fn encodable(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c,
            0x09 => ' ',
            _ if WIN_ANSI_EXTRAS.contains(&c) => c,
            _ => '?',
        })
        .collect()
}
