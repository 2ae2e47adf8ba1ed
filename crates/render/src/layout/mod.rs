//! Coordinate-driven drawing helpers for the vector backend.
//!
//! Nothing here reflows. Every primitive draws at the position it is given and
//! returns the [`Cursor`] where the next section should start, so the running
//! vertical position is threaded explicitly through the drawing calls.

mod canvas;
mod cursor;
mod geometry;
mod pagination;
mod primitives;
mod text;

pub use canvas::{Canvas, Font};
pub use cursor::Cursor;
pub use geometry::{Color, PageGeometry, Rect, MM};
pub use pagination::{footer, stamp_row_layout, stamps_page, FooterContent, STAMP_GAP, STAMP_SIZE};
pub use primitives::{
    banded_table, highlight_box, labeled_box, section_heading, summary_tile, BoxStyle,
    TableColumn, LABEL_INSET, ROW_HEIGHT, TILE_HEIGHT, VALUE_OFFSET,
};
pub use text::{fit_text, text_width, to_win_ansi, truncate_digest};
