//! Text measurement and wrapping
//!
//! Widths come from the Helvetica and Helvetica-Bold AFM advance tables (1/1000 em), the
//! built-in fonts the PDF is written with. East Asian wide characters count a full em.

use unicode_segmentation::UnicodeSegmentation;

use crate::export::config::{Mm, Pt, MM_PER_PT};

/// Helvetica advance widths for ASCII 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold advance widths for ASCII 0x20..=0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

const DEFAULT_WIDTH: u16 = 556;
const WIDE_WIDTH: u16 = 1000;

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD)
}

/// Typographic punctuation from the WinAnsi range, (regular, bold)
fn punctuation_units(c: char) -> Option<(u16, u16)> {
    let units = match c {
        '\u{2013}' => (556, 556),
        '\u{2014}' | '\u{2026}' | '\u{2030}' => (1000, 1000),
        '\u{2018}' | '\u{2019}' | '\u{201A}' => (222, 278),
        '\u{201C}' | '\u{201D}' | '\u{201E}' => (333, 500),
        '\u{2022}' => (350, 350),
        '\u{2122}' => (1000, 1000),
        _ => return None,
    };
    Some(units)
}

fn char_units(c: char, bold: bool) -> u16 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    match c {
        ' '..='~' => table[(c as usize) - 0x20],
        c if is_wide(c) => WIDE_WIDTH,
        c => match punctuation_units(c) {
            Some((_, bold_units)) if bold => bold_units,
            Some((regular, _)) => regular,
            None => DEFAULT_WIDTH,
        },
    }
}

/// Rendered width of `text` in millimetres
pub fn text_width(text: &str, font_size: Pt, bold: bool) -> Mm {
    let units: u32 = text.chars().map(|c| char_units(c, bold) as u32).sum();
    units as f32 / 1000.0 * font_size * MM_PER_PT
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines are kept. Lines break at word boundaries; a single word wider than
/// the line is split between graphemes. Always returns at least one line.
pub fn wrap_text(text: &str, max_width: Mm, font_size: Pt, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), max_width, font_size, bold, &mut lines);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(text: &str, max_width: Mm, font_size: Pt, bold: bool, lines: &mut Vec<String>) {
    let width_of = |s: &str| text_width(s, font_size, bold);
    let first_line = lines.len();
    let mut current = String::new();

    for segment in tokens(text) {
        let is_space = segment.chars().all(char::is_whitespace);

        if is_space && current.is_empty() {
            continue;
        }

        let candidate = width_of(&current) + width_of(segment);
        if candidate <= max_width {
            current.push_str(segment);
            continue;
        }

        if is_space {
            lines.push(current.trim_end().to_string());
            current.clear();
            continue;
        }

        if !current.trim_end().is_empty() {
            lines.push(current.trim_end().to_string());
            current.clear();
        }

        if width_of(segment) <= max_width {
            current.push_str(segment);
        } else {
            // Over-long word: fill lines grapheme by grapheme
            for grapheme in segment.graphemes(true) {
                if !current.is_empty() && width_of(&current) + width_of(grapheme) > max_width {
                    lines.push(std::mem::take(&mut current));
                }
                current.push_str(grapheme);
            }
        }
    }

    let last = current.trim_end();
    if !last.is_empty() || lines.len() == first_line {
        lines.push(last.to_string());
    }
}

/// Alternating whitespace / non-whitespace runs, cut on Unicode word boundaries so
/// trailing punctuation stays attached to its word
fn tokens(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev_space: Option<bool> = None;

    for (idx, segment) in text.split_word_bound_indices() {
        let space = segment.chars().all(char::is_whitespace);
        if prev_space.is_some_and(|prev| prev != space) {
            runs.push(&text[start..idx]);
            start = idx;
        }
        prev_space = Some(space);
    }

    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}
