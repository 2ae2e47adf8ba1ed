use serde::Serialize;

/// Remote references to the two stamp images printed on the second page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StampRefs {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Position of a stamp on the stamps page, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StampSlot {
    Primary,
    Secondary,
}

impl StampSlot {
    pub const ALL: [StampSlot; 2] = [StampSlot::Primary, StampSlot::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            StampSlot::Primary => "primary",
            StampSlot::Secondary => "secondary",
        }
    }
}

/// Raw bytes of a fetched stamp image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampImage {
    pub slot: StampSlot,
    pub bytes: Vec<u8>,
    /// Content type reported by the server, if any.
    pub content_type: Option<String>,
}

impl StampImage {
    /// File extension matching the image payload.
    ///
    /// Sniffs the magic bytes first and falls back to the reported content type.
    pub fn extension(&self) -> &'static str {
        if self.bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return "jpg";
        }
        if self.bytes.starts_with(b"\x89PNG") {
            return "png";
        }
        match self.content_type.as_deref() {
            Some(ct) if ct.contains("jpeg") || ct.contains("jpg") => "jpg",
            _ => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension() {
            "jpg" => "image/jpeg",
            _ => "image/png",
        }
    }
}

/// Stamps that were fetched successfully, in slot order.
///
/// A slot is absent when the model had no reference for it or the fetch failed.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStamps {
    pub primary: Option<StampImage>,
    pub secondary: Option<StampImage>,
    /// Slots that had a reference but could not be fetched.
    pub omitted: Vec<StampSlot>,
}

impl ResolvedStamps {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: StampSlot) -> Option<&StampImage> {
        match slot {
            StampSlot::Primary => self.primary.as_ref(),
            StampSlot::Secondary => self.secondary.as_ref(),
        }
    }

    pub fn set(&mut self, image: StampImage) {
        match image.slot {
            StampSlot::Primary => self.primary = Some(image),
            StampSlot::Secondary => self.secondary = Some(image),
        }
    }

    /// Present stamps, left to right.
    pub fn present(&self) -> Vec<&StampImage> {
        StampSlot::ALL.iter().filter_map(|s| self.get(*s)).collect()
    }
}
