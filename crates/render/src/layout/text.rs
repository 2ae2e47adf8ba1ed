use std::borrow::Cow;

use super::canvas::Font;

const ELLIPSIS: char = '\u{2026}';

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 32],
        ELLIPSIS => 1000,
        _ => 556,
    }
}

/// Approximate rendered width of `text` in points.
///
/// Uses Helvetica metrics; bold text is widened by a flat factor.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let scale = match font {
        Font::Regular => 1.0,
        Font::Bold => 1.06,
    };
    units as f32 * size * scale / 1000.0
}

/// Clips `text` so that it fits in `max_width`, appending an ellipsis when cut.
pub fn fit_text(text: &str, font: Font, size: f32, max_width: f32) -> Cow<'_, str> {
    if text_width(text, font, size) <= max_width {
        return Cow::Borrowed(text);
    }
    let ellipsis_width = text_width(&ELLIPSIS.to_string(), font, size);
    let mut out = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let w = text_width(c.encode_utf8(&mut [0; 4]), font, size);
        if width + w + ellipsis_width > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// First 16 characters of a digest followed by an ellipsis.
pub fn truncate_digest(digest: &str) -> String {
    let prefix: String = digest.chars().take(16).collect();
    if prefix.len() == digest.len() {
        return prefix;
    }
    format!("{}{}", prefix, ELLIPSIS)
}

/// Encodes text for the standard-14 fonts (WinAnsiEncoding).
///
/// Characters outside the encoding become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
