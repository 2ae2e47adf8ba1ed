//! Vector backend: draws the certificate directly with the layout primitives.
//!
//! Needs no external tooling, which makes it the last resort of the fallback
//! chain.

mod portfolio;
mod transaction;

use async_trait::async_trait;
use log::{debug, warn};

use super::traits::RenderBackend;
use crate::errors::RenderError;
use crate::layout::{labeled_box, BoxStyle, Canvas, Color, Cursor, Font, PageGeometry, Rect};
use crate::models::{CertificateDocument, ResolvedStamps};

const BACKEND_ID: &str = "vector";
const HEADER_HEIGHT: f32 = 60.0;
const BOX_HEIGHT: f32 = 52.0;
const BOX_GAP: f32 = 10.0;
const DEFAULT_MAX_IMAGE_PIXELS: u32 = 600;

/// Draws certificates without any external dependency.
#[derive(Debug, Clone)]
pub struct VectorRenderer {
    page: PageGeometry,
    max_image_pixels: u32,
}

impl Default for VectorRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorRenderer {
    pub fn new() -> Self {
        Self {
            page: PageGeometry::a4(),
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }

    /// Lays out every page of `document` without serializing it.
    pub fn compose(&self, document: &CertificateDocument, stamps: &ResolvedStamps) -> Canvas {
        let mut canvas = Canvas::new(self.page, document.title());
        let stamp_names = self.register_stamps(&mut canvas, stamps);
        match document {
            CertificateDocument::Transaction(cert) => {
                transaction::draw(&mut canvas, cert, &stamp_names)
            }
            CertificateDocument::Portfolio(summary) => {
                portfolio::draw(&mut canvas, summary, &stamp_names)
            }
        }
        canvas
    }

    /// Registers the decodable stamps and returns their XObject names in slot
    /// order. Undecodable stamps are skipped.
    fn register_stamps(&self, canvas: &mut Canvas, stamps: &ResolvedStamps) -> Vec<String> {
        let mut names = Vec::new();
        for image in stamps.present() {
            let name = format!("Stamp{}", names.len() + 1);
            match canvas.register_image(&name, &image.bytes, self.max_image_pixels) {
                Ok(()) => names.push(name),
                Err(e) => warn!(
                    "[{}] skipping {} stamp: {}",
                    BACKEND_ID,
                    image.slot.as_str(),
                    e
                ),
            }
        }
        names
    }
}

#[async_trait]
impl RenderBackend for VectorRenderer {
    fn id(&self) -> &'static str {
        BACKEND_ID
    }

    async fn render(
        &self,
        document: &CertificateDocument,
        stamps: &ResolvedStamps,
    ) -> Result<Vec<u8>, RenderError> {
        let canvas = self.compose(document, stamps);
        debug!(
            "[{}] {} laid out on {} pages",
            BACKEND_ID,
            document.certificate_id(),
            canvas.page_count()
        );
        canvas.into_pdf()
    }
}

/// Draws the accent title bar and returns the cursor below it.
pub(crate) fn title_bar(canvas: &mut Canvas, title: &str, certificate_id: &str) -> Cursor {
    let page = *canvas.page();
    let bar = Rect::new(
        page.content_left(),
        page.content_top(),
        page.content_width(),
        HEADER_HEIGHT,
    );
    canvas.fill_rect(bar, Color::ACCENT);
    canvas.text(bar.x + 16.0, bar.y + 12.0, title, Font::Bold, 18.0, Color::WHITE);
    canvas.text(
        bar.x + 16.0,
        bar.y + 38.0,
        &format!("Certificate No. {}", certificate_id),
        Font::Regular,
        9.0,
        Color::ACCENT_LIGHT,
    );
    Cursor::at(bar.bottom()).advance(16.0)
}

/// One labeled box of a [`box_row`].
pub(crate) struct Field<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub style: BoxStyle,
}

impl<'a> Field<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            style: BoxStyle::panel(),
        }
    }

    #[must_use]
    pub fn styled(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }
}

/// Draws `fields` as equal-width labeled boxes spanning `area_x..area_x+width`.
///
/// Returns the cursor below the row, gap included.
pub(crate) fn box_row(canvas: &mut Canvas, cursor: Cursor, x: f32, width: f32, fields: &[Field<'_>]) -> Cursor {
    let row = Rect::new(x, cursor.y(), width, BOX_HEIGHT);
    let mut next = cursor;
    for (rect, field) in row.columns(fields.len(), BOX_GAP).into_iter().zip(fields) {
        next = next.max(labeled_box(canvas, rect, field.label, field.value, &field.style));
    }
    next.advance(BOX_GAP)
}
