use super::{box_row, title_bar, Field};
use crate::layout::{
    banded_table, footer, highlight_box, section_heading, stamps_page, summary_tile, Canvas,
    Color, Cursor, FooterContent, Font, TableColumn, TILE_HEIGHT,
};
use crate::models::PortfolioSummary;

const SUMMARY_HEIGHT: f32 = 150.0;
const SECTION_GAP: f32 = 8.0;
const TILE_GAP: f32 = 12.0;
/// Share of the content width taken by each history column.
const COLUMN_SHARES: [(&str, f32); 5] = [
    ("Date", 0.18),
    ("Transaction", 0.27),
    ("Tokens", 0.16),
    ("Amount", 0.21),
    ("Status", 0.18),
];

pub(super) fn draw(canvas: &mut Canvas, summary: &PortfolioSummary, stamp_names: &[String]) {
    let page = *canvas.page();
    let left = page.content_left();
    let width = page.content_width();

    let mut cursor = title_bar(canvas, "PORTFOLIO SUMMARY", &summary.certificate_id);

    cursor = section_heading(canvas, cursor, "Investor & Property");
    let roi = format!("{}%", summary.expected_roi);
    for pair in [
        [
            Field::new("Investor Name", &summary.investor_name),
            Field::new("Investor ID", &summary.investor_code),
        ],
        [
            Field::new("Property", &summary.property_name),
            Field::new("Property Code", &summary.property_code),
        ],
        [
            Field::new("Location", &summary.property_location),
            Field::new("Expected ROI", &roi),
        ],
    ] {
        cursor = box_row(canvas, cursor, left, width, &pair);
    }

    cursor = cursor.advance(SECTION_GAP);
    let inner = highlight_box(canvas, cursor, SUMMARY_HEIGHT, "Portfolio Summary");
    let ownership = format!("{}%", summary.ownership_percentage);
    let tiles = [
        ("Total Tokens Owned", summary.total_tokens.as_str()),
        ("Total Invested", summary.total_invested.as_str()),
        ("Average Token Price", summary.average_price.as_str()),
        ("Ownership", ownership.as_str()),
    ];
    let columns = inner.columns(2, TILE_GAP);
    for (index, (label, value)) in tiles.iter().enumerate() {
        let column = columns[index % 2];
        let y = inner.y + (index / 2) as f32 * (TILE_HEIGHT + TILE_GAP);
        summary_tile(canvas, column.x, y, column.width, label, value);
    }
    cursor = cursor.advance(SUMMARY_HEIGHT + 16.0);

    cursor = section_heading(canvas, cursor, "Transaction History");
    let columns: Vec<TableColumn> = COLUMN_SHARES
        .iter()
        .map(|(title, share)| TableColumn::new(*title, width * share))
        .collect();
    let rows: Vec<[&str; 5]> = summary.transactions.iter().map(|row| row.cells()).collect();
    let end = banded_table(canvas, cursor, &columns, &rows);
    if rows.is_empty() {
        canvas.text(
            left + 6.0,
            end.y() + 8.0,
            "No completed transactions.",
            Font::Regular,
            9.0,
            Color::MUTED,
        );
    }

    stamps_page(canvas, stamp_names);
    footer(
        canvas,
        &FooterContent {
            certificate_id: summary.certificate_id.clone(),
            generated_at: summary.generated_at.clone(),
            reference_label: "Property Code".to_string(),
            reference_value: summary.property_code.clone(),
        },
    );
}
