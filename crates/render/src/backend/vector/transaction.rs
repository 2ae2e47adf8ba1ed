use super::{box_row, title_bar, Field};
use crate::layout::{
    footer, highlight_box, section_heading, stamps_page, truncate_digest, BoxStyle, Canvas,
    Color, Cursor, FooterContent,
};
use crate::models::TransactionCertificate;

const DETAILS_HEIGHT: f32 = 120.0;
const SECTION_GAP: f32 = 8.0;

pub(super) fn draw(canvas: &mut Canvas, cert: &TransactionCertificate, stamp_names: &[String]) {
    let page = *canvas.page();
    let left = page.content_left();
    let width = page.content_width();

    let mut cursor = title_bar(canvas, "TRANSACTION CERTIFICATE", &cert.certificate_id);

    cursor = section_heading(canvas, cursor, "Transaction Information");
    let status_color = if cert.is_completed() {
        Color::SUCCESS
    } else {
        Color::PENDING
    };
    cursor = box_row(
        canvas,
        cursor,
        left,
        width,
        &[
            Field::new("Transaction ID", &cert.transaction_code),
            Field::new("Date", &cert.transaction_date),
        ],
    );
    cursor = box_row(
        canvas,
        cursor,
        left,
        width,
        &[
            Field::new("Type", &cert.transaction_type),
            Field::new("Status", &cert.status)
                .styled(BoxStyle::panel().with_value_color(status_color)),
        ],
    );

    cursor = section_heading(canvas, cursor.advance(SECTION_GAP), "Investor & Property");
    cursor = box_row(
        canvas,
        cursor,
        left,
        width,
        &[
            Field::new("Investor Name", &cert.investor_name),
            Field::new("Investor ID", &cert.investor_code),
        ],
    );
    cursor = box_row(
        canvas,
        cursor,
        left,
        width,
        &[
            Field::new("Property", &cert.property_name),
            Field::new("Property Code", &cert.property_code),
        ],
    );

    let inner = highlight_box(
        canvas,
        cursor.advance(SECTION_GAP),
        DETAILS_HEIGHT,
        "Investment Details",
    );
    let white = BoxStyle {
        fill: Some(Color::WHITE),
        border: Some(Color::BORDER),
        value_color: Some(Color::ACCENT),
    };
    box_row(
        canvas,
        Cursor::at(inner.y),
        inner.x,
        inner.width,
        &[
            Field::new("Tokens Purchased", &cert.tokens_purchased).styled(white),
            Field::new("Token Price", &cert.token_price).styled(white),
            Field::new("Total Amount", &cert.total_amount).styled(white),
        ],
    );
    cursor = cursor.advance(SECTION_GAP + DETAILS_HEIGHT + 16.0);

    if let Some(hash) = cert.blockchain_hash.as_deref() {
        cursor = section_heading(canvas, cursor, "Blockchain Verification");
        let network = cert.blockchain_network.as_deref().unwrap_or("N/A");
        box_row(
            canvas,
            cursor,
            left,
            width,
            &[
                Field::new("Transaction Hash", hash),
                Field::new("Network", network),
            ],
        );
    }

    stamps_page(canvas, stamp_names);
    footer(
        canvas,
        &FooterContent {
            certificate_id: cert.certificate_id.clone(),
            generated_at: cert.generated_at.clone(),
            reference_label: "Document Hash".to_string(),
            reference_value: truncate_digest(&cert.integrity_hash),
        },
    );
}
