//! Second-page layout: stamps and footer.

use super::canvas::{Canvas, Font};
use super::geometry::{Color, PageGeometry, Rect};
use super::text::fit_text;

/// Edge length of a square stamp.
pub const STAMP_SIZE: f32 = 120.0;
/// Horizontal gap between two stamps.
pub const STAMP_GAP: f32 = 40.0;

const FOOTER_HEIGHT: f32 = 46.0;

/// Positions of `count` stamps placed side by side, centered horizontally
/// and vertically on the full page.
pub fn stamp_row_layout(page: &PageGeometry, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let total = count as f32 * STAMP_SIZE + (count as f32 - 1.0) * STAMP_GAP;
    let start_x = (page.width - total) / 2.0;
    let y = (page.height - STAMP_SIZE) / 2.0;
    (0..count)
        .map(|i| Rect::new(start_x + i as f32 * (STAMP_SIZE + STAMP_GAP), y, STAMP_SIZE, STAMP_SIZE))
        .collect()
}

/// Starts the stamps page and paints every registered stamp image.
///
/// `images` holds XObject names already registered on the canvas, in slot
/// order. The page break is unconditional, even when no stamp is present.
pub fn stamps_page(canvas: &mut Canvas, images: &[String]) {
    canvas.new_page();
    let page = *canvas.page();
    let placements = stamp_row_layout(&page, images.len());
    if let Some(first) = placements.first() {
        canvas.text_centered(
            page.width / 2.0,
            first.y - 32.0,
            "Official Stamps",
            Font::Bold,
            12.0,
            Color::ACCENT,
        );
    }
    for (name, rect) in images.iter().zip(placements) {
        canvas.draw_image(name, rect);
    }
}

/// Text shown in the two footer columns.
#[derive(Debug, Clone)]
pub struct FooterContent {
    pub certificate_id: String,
    pub generated_at: String,
    /// e.g. "Document Hash" or "Property Code".
    pub reference_label: String,
    pub reference_value: String,
}

/// Draws the two-column footer at the bottom of the current page.
pub fn footer(canvas: &mut Canvas, content: &FooterContent) {
    let page = *canvas.page();
    let top = page.content_bottom() - FOOTER_HEIGHT;
    let column_width = page.content_width() / 2.0;
    let left = page.content_left();
    let right = left + column_width;

    canvas.hline(left, page.content_right(), top, Color::BORDER, 0.75);

    let lines_left = [
        format!("Certificate ID: {}", content.certificate_id),
        format!("Generated: {}", content.generated_at),
    ];
    let lines_right = [
        format!("{}: {}", content.reference_label, content.reference_value),
        "Verification: Valid".to_string(),
    ];
    for (i, line) in lines_left.iter().enumerate() {
        let text = fit_text(line, Font::Regular, 8.5, column_width - 8.0);
        canvas.text(left, top + 10.0 + i as f32 * 14.0, &text, Font::Regular, 8.5, Color::MUTED);
    }
    for (i, line) in lines_right.iter().enumerate() {
        let text = fit_text(line, Font::Regular, 8.5, column_width - 8.0);
        canvas.text(right + 8.0, top + 10.0 + i as f32 * 14.0, &text, Font::Regular, 8.5, Color::MUTED);
    }
}
