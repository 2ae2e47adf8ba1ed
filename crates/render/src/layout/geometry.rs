/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// A4 portrait with 20mm top/bottom and 15mm left/right margins.
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin_top: 20.0 * MM,
            margin_bottom: 20.0 * MM,
            margin_left: 15.0 * MM,
            margin_right: 15.0 * MM,
        }
    }

    pub fn content_left(&self) -> f32 {
        self.margin_left
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_top(&self) -> f32 {
        self.margin_top
    }

    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Axis-aligned rectangle in top-origin page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Shrinks the rectangle by `pad` on every side.
    pub fn inset(&self, pad: f32) -> Rect {
        Rect::new(
            self.x + pad,
            self.y + pad,
            (self.width - 2.0 * pad).max(0.0),
            (self.height - 2.0 * pad).max(0.0),
        )
    }

    /// Splits the rectangle into `count` equal columns separated by `gap`.
    pub fn columns(&self, count: usize, gap: f32) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let width = (self.width - gap * (count as f32 - 1.0)) / count as f32;
        (0..count)
            .map(|i| Rect::new(self.x + i as f32 * (width + gap), self.y, width, self.height))
            .collect()
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const ACCENT: Color = Color::rgb(0x1E, 0x3A, 0x8A);
    pub const ACCENT_LIGHT: Color = Color::rgb(0xEF, 0xF4, 0xFF);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const TEXT: Color = Color::rgb(0x1F, 0x29, 0x37);
    pub const MUTED: Color = Color::rgb(0x6B, 0x72, 0x80);
    pub const PANEL: Color = Color::rgb(0xF9, 0xFA, 0xFB);
    pub const BAND: Color = Color::rgb(0xF3, 0xF4, 0xF6);
    pub const BORDER: Color = Color::rgb(0xD1, 0xD5, 0xDB);
    pub const SUCCESS: Color = Color::rgb(0x05, 0x96, 0x69);
    pub const PENDING: Color = Color::rgb(0xD9, 0x77, 0x06);

    /// Components scaled to the 0..=1 range used by PDF color operators.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}
