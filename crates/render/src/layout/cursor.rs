/// Running vertical position on the current page, measured from the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f32,
}

impl Cursor {
    pub fn at(y: f32) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Cursor moved down by `dy`.
    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self { y: self.y + dy }
    }

    /// The lower of the two positions.
    #[must_use]
    pub fn max(self, other: Cursor) -> Self {
        Self {
            y: self.y.max(other.y),
        }
    }
}
