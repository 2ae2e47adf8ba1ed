use super::canvas::{Canvas, Font};
use super::cursor::Cursor;
use super::geometry::{Color, Rect};
use super::text::fit_text;

/// Inset of a labeled box's label from its top-left corner.
pub const LABEL_INSET: f32 = 12.0;
/// Distance from a labeled box's top edge to its value line.
pub const VALUE_OFFSET: f32 = 35.0;
/// Constant height of every banded table row, header included.
pub const ROW_HEIGHT: f32 = 22.0;
/// Height reserved by one summary tile.
pub const TILE_HEIGHT: f32 = 44.0;

const LABEL_SIZE: f32 = 8.5;
const VALUE_SIZE: f32 = 12.0;
const CELL_PADDING: f32 = 6.0;
const CELL_SIZE: f32 = 9.0;

/// Optional styling for [`labeled_box`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxStyle {
    pub fill: Option<Color>,
    pub border: Option<Color>,
    /// Overrides the default value color, e.g. to highlight a status.
    pub value_color: Option<Color>,
}

impl BoxStyle {
    pub fn panel() -> Self {
        Self {
            fill: Some(Color::PANEL),
            border: Some(Color::BORDER),
            value_color: None,
        }
    }

    #[must_use]
    pub fn with_value_color(mut self, color: Color) -> Self {
        self.value_color = Some(color);
        self
    }
}

/// Draws a box with a small label above a larger value.
///
/// Returns the cursor at the bottom edge of the box.
pub fn labeled_box(
    canvas: &mut Canvas,
    rect: Rect,
    label: &str,
    value: &str,
    style: &BoxStyle,
) -> Cursor {
    if let Some(fill) = style.fill {
        canvas.fill_rect(rect, fill);
    }
    if let Some(border) = style.border {
        canvas.stroke_rect(rect, border, 0.5);
    }
    let inner = rect.width - 2.0 * LABEL_INSET;
    canvas.text(
        rect.x + LABEL_INSET,
        rect.y + LABEL_INSET,
        &fit_text(&label.to_uppercase(), Font::Regular, LABEL_SIZE, inner),
        Font::Regular,
        LABEL_SIZE,
        Color::MUTED,
    );
    canvas.text(
        rect.x + LABEL_INSET,
        rect.y + VALUE_OFFSET,
        &fit_text(value, Font::Bold, VALUE_SIZE, inner),
        Font::Bold,
        VALUE_SIZE,
        style.value_color.unwrap_or(Color::TEXT),
    );
    Cursor::at(rect.bottom())
}

/// Draws a centered label above a large bold value inside a fixed-width column.
pub fn summary_tile(canvas: &mut Canvas, x: f32, y: f32, width: f32, label: &str, value: &str) -> Cursor {
    let center = x + width / 2.0;
    let label = fit_text(label, Font::Regular, LABEL_SIZE + 0.5, width);
    canvas.text_centered(center, y, &label, Font::Regular, LABEL_SIZE + 0.5, Color::MUTED);
    let value = fit_text(value, Font::Bold, 16.0, width);
    canvas.text_centered(center, y + 16.0, &value, Font::Bold, 16.0, Color::ACCENT);
    Cursor::at(y + TILE_HEIGHT)
}

/// Draws a bold section title with a rule underneath.
pub fn section_heading(canvas: &mut Canvas, cursor: Cursor, title: &str) -> Cursor {
    let page = *canvas.page();
    canvas.text(page.content_left(), cursor.y(), title, Font::Bold, 12.0, Color::ACCENT);
    canvas.hline(
        page.content_left(),
        page.content_right(),
        cursor.y() + 17.0,
        Color::BORDER,
        0.75,
    );
    cursor.advance(24.0)
}

/// Draws a tinted, bordered box of fixed `height` with a title.
///
/// The height is chosen by the caller from the content it knows it will
/// place inside. Returns the inner area below the title.
pub fn highlight_box(canvas: &mut Canvas, cursor: Cursor, height: f32, title: &str) -> Rect {
    let page = *canvas.page();
    let outer = Rect::new(page.content_left(), cursor.y(), page.content_width(), height);
    canvas.fill_rect(outer, Color::ACCENT_LIGHT);
    canvas.stroke_rect(outer, Color::ACCENT, 1.0);
    canvas.text(outer.x + 16.0, outer.y + 14.0, title, Font::Bold, 13.0, Color::ACCENT);
    Rect::new(
        outer.x + 16.0,
        outer.y + 38.0,
        outer.width - 32.0,
        (height - 38.0 - 12.0).max(0.0),
    )
}

/// A fixed-width table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub title: String,
    pub width: f32,
}

impl TableColumn {
    pub fn new(title: impl Into<String>, width: f32) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

fn draw_row<S: AsRef<str>>(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    columns: &[TableColumn],
    cells: &[S],
    font: Font,
    color: Color,
) {
    let mut cell_x = x;
    for (column, cell) in columns.iter().zip(cells) {
        let text = fit_text(cell.as_ref(), font, CELL_SIZE, column.width - 2.0 * CELL_PADDING);
        canvas.text(
            cell_x + CELL_PADDING,
            y + (ROW_HEIGHT - CELL_SIZE) / 2.0,
            &text,
            font,
            CELL_SIZE,
            color,
        );
        cell_x += column.width;
    }
}

fn draw_header(canvas: &mut Canvas, x: f32, y: f32, columns: &[TableColumn]) {
    let width: f32 = columns.iter().map(|c| c.width).sum();
    canvas.fill_rect(Rect::new(x, y, width, ROW_HEIGHT), Color::ACCENT);
    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    draw_row(canvas, x, y, columns, &titles, Font::Bold, Color::WHITE);
}

/// Draws a table with an accent header row and shaded even body rows.
///
/// Rows that would cross the bottom margin continue on a new page under a
/// repeated header. Returns the cursor below the last row.
pub fn banded_table<R, S>(
    canvas: &mut Canvas,
    cursor: Cursor,
    columns: &[TableColumn],
    rows: &[R],
) -> Cursor
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let page = *canvas.page();
    let x = page.content_left();
    let width: f32 = columns.iter().map(|c| c.width).sum();

    let mut y = cursor.y();
    draw_header(canvas, x, y, columns);
    y += ROW_HEIGHT;

    for (index, row) in rows.iter().enumerate() {
        if y + ROW_HEIGHT > page.content_bottom() {
            canvas.new_page();
            y = page.content_top();
            draw_header(canvas, x, y, columns);
            y += ROW_HEIGHT;
        }
        if index % 2 == 0 {
            canvas.fill_rect(Rect::new(x, y, width, ROW_HEIGHT), Color::BAND);
        }
        draw_row(canvas, x, y, columns, row.as_ref(), Font::Regular, Color::TEXT);
        y += ROW_HEIGHT;
    }
    Cursor::at(y)
}
