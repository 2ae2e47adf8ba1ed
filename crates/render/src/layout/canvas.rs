use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::geometry::{Color, PageGeometry, Rect};
use super::text::{text_width, to_win_ansi};
use crate::errors::RenderError;

/// Standard-14 fonts available on every canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

struct ImageResource {
    name: String,
    stream: Stream,
}

/// Multi-page drawing surface backed by raw PDF content operations.
///
/// Callers work in top-origin coordinates; the canvas flips them into PDF
/// user space when emitting operators.
pub struct Canvas {
    page: PageGeometry,
    pages: Vec<Vec<Operation>>,
    images: Vec<ImageResource>,
    title: String,
}

impl Canvas {
    pub fn new(page: PageGeometry, title: impl Into<String>) -> Self {
        Self {
            page,
            pages: vec![Vec::new()],
            images: Vec::new(),
            title: title.into(),
        }
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Operations emitted on page `index` so far.
    pub fn operations(&self, index: usize) -> &[Operation] {
        self.pages.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Starts a new page; subsequent drawing goes there.
    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // pages always holds at least one page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn flip(&self, y: f32) -> f32 {
        self.page.height - y
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let [r, g, b] = color.unit();
        let y = self.flip(rect.bottom());
        let ops = self.ops();
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        let [r, g, b] = color.unit();
        let y = self.flip(rect.bottom());
        let ops = self.ops();
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Color, line_width: f32) {
        let [r, g, b] = color.unit();
        let py = self.flip(y);
        let ops = self.ops();
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new("m", vec![x1.into(), py.into()]));
        ops.push(Operation::new("l", vec![x2.into(), py.into()]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Draws a single line of text whose top edge sits at `y`.
    pub fn text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        let [r, g, b] = color.unit();
        let baseline = self.flip(y + size * 0.8);
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
        ));
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Draws text horizontally centered on `center_x`.
    pub fn text_centered(
        &mut self,
        center_x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) {
        let width = text_width(text, font, size);
        self.text(center_x - width / 2.0, y, text, font, size, color);
    }

    /// Decodes an image and registers it as an XObject.
    ///
    /// Transparent pixels are composited onto white and the image is
    /// downscaled to at most `max_pixels` on its longer side.
    pub fn register_image(
        &mut self,
        name: &str,
        bytes: &[u8],
        max_pixels: u32,
    ) -> Result<(), RenderError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| RenderError::Pdf(format!("Failed to decode image '{}': {}", name, e)))?;
        let decoded = if decoded.width() > max_pixels || decoded.height() > max_pixels {
            decoded.thumbnail(max_pixels, max_pixels)
        } else {
            decoded
        };
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = a as u32;
            for channel in [r, g, b] {
                let blended = (channel as u32 * alpha + 255 * (255 - alpha)) / 255;
                rgb.push(blended as u8);
            }
        }

        let mut stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            rgb,
        );
        stream.compress()?;
        self.images.retain(|img| img.name != name);
        self.images.push(ImageResource {
            name: name.to_string(),
            stream,
        });
        Ok(())
    }

    /// Paints a registered image scaled into `rect`.
    pub fn draw_image(&mut self, name: &str, rect: Rect) {
        let y = self.flip(rect.bottom());
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Serializes all pages into a PDF byte buffer.
    pub fn into_pdf(self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }

        let mut xobjects = Dictionary::new();
        for image in self.images {
            let image_id = doc.add_object(image.stream);
            xobjects.set(image.name.into_bytes(), image_id);
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        let page_count = self.pages.len();
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page.width.into(),
                    self.page.height.into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&self.title), StringFormat::Literal),
            "Producer" => Object::string_literal("certifolio"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
