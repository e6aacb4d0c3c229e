// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{common::error::AppError, models::invoice::Invoice};

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: String,
    company_name: String,
}

impl DocumentService {
    pub fn new(fonts_dir: String, company_name: String) -> Self {
        Self { fonts_dir, company_name }
    }

    /// Gera o PDF da fatura fora do executor assíncrono.
    pub async fn invoice_pdf(&self, invoice: Invoice) -> Result<Vec<u8>, AppError> {
        let fonts_dir = self.fonts_dir.clone();
        let company_name = self.company_name.clone();
        tokio::task::spawn_blocking(move || render_invoice(&fonts_dir, &company_name, &invoice))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task do PDF: {}", e))?
    }
}

pub fn render_invoice(fonts_dir: &str, company_name: &str, invoice: &Invoice) -> Result<Vec<u8>, AppError> {
    // Fonte Roboto (Roboto-Regular.ttf, Roboto-Bold.ttf, ...) na pasta configurada
    let font_family = genpdf::fonts::from_files(fonts_dir, "Roboto", None)
        .map_err(|_| AppError::FontNotFound(fonts_dir.to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Invoice {}", invoice.invoice_number));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(elements::Paragraph::new(company_name).styled(style::Style::new().bold().with_font_size(18)));
    doc.push(elements::Break::new(1.5));

    doc.push(
        elements::Paragraph::new(format!("INVOICE {}", invoice.invoice_number))
            .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Paragraph::new(format!("Status: {:?}", invoice.status).to_uppercase()));
    doc.push(elements::Paragraph::new(format!("Issue date: {}", invoice.issue_date.format("%m/%d/%Y"))));
    doc.push(elements::Paragraph::new(format!("Due date: {}", invoice.due_date.format("%m/%d/%Y"))));
    if let Some(paid) = invoice.paid_date {
        doc.push(elements::Paragraph::new(format!("Paid on: {}", paid.format("%m/%d/%Y"))));
    }
    doc.push(elements::Paragraph::new(format!("Bill to: {}", invoice.customer_name)));
    doc.push(elements::Break::new(2));

    // --- ITENS ---
    // Pesos das colunas: Descrição (4), Qtd (1), Unitário (2), Total (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Description").styled(bold))
        .element(elements::Paragraph::new("Qty").styled(bold))
        .element(elements::Paragraph::new("Unit price").styled(bold))
        .element(elements::Paragraph::new("Total").styled(bold))
        .push()
        .map_err(render_error)?;

    for item in &invoice.line_items {
        table
            .row()
            .element(elements::Paragraph::new(item.description.as_str()))
            .element(elements::Paragraph::new(item.quantity.normalize().to_string()))
            .element(elements::Paragraph::new(format!("${:.2}", item.unit_price)))
            .element(elements::Paragraph::new(format!("${:.2}", item.total)))
            .push()
            .map_err(render_error)?;
    }

    doc.push(table);
    doc.push(elements::Break::new(1.5));

    // --- TOTAIS ---
    let totals = [
        ("Subtotal", invoice.subtotal),
        ("Tax", invoice.tax),
        ("Total", invoice.total),
        ("Paid", invoice.paid_amount),
    ];
    for (label, value) in totals {
        let mut line = elements::Paragraph::new(format!("{label}: ${value:.2}"));
        line.set_alignment(genpdf::Alignment::Right);
        doc.push(line);
    }
    let mut balance = elements::Paragraph::new(format!("BALANCE DUE: ${:.2}", invoice.balance_due));
    balance.set_alignment(genpdf::Alignment::Right);
    doc.push(balance.styled(style::Style::new().bold().with_font_size(12)));

    if let Some(notes) = &invoice.notes {
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(notes.as_str()).styled(style::Style::new().italic().with_font_size(9)));
    }

    // --- QR CODE (número + saldo) ---
    doc.push(elements::Break::new(2));
    let code = QrCode::new(qr_payload(invoice).as_bytes()).map_err(render_error)?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let pdf_image = elements::Image::from_dynamic_image(image::DynamicImage::ImageLuma8(image_buffer))
        .map_err(render_error)?
        .with_scale(genpdf::Scale::new(0.5, 0.5));
    doc.push(pdf_image);

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(render_error)?;
    Ok(buffer)
}

pub fn qr_payload(invoice: &Invoice) -> String {
    format!("{}|{:.2}", invoice.invoice_number, invoice.balance_due)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::CreateInvoicePayload;

    fn invoice() -> Invoice {
        serde_json::from_value::<CreateInvoicePayload>(serde_json::json!({
            "customer_id": "cust-1",
            "customer_name": "John Anderson",
            "invoice_number": "INV-2025-004",
            "subtotal": 150.0,
            "tax": 12.0,
            "total": 162.0,
            "issue_date": "2025-01-15",
            "due_date": "2025-02-14"
        }))
        .unwrap()
        .into_invoice()
    }

    #[test]
    fn test_qr_payload_has_number_and_balance() {
        assert_eq!(qr_payload(&invoice()), "INV-2025-004|162.00");
    }

    #[test]
    fn test_missing_fonts_is_reported() {
        let err = render_invoice("./pasta-que-nao-existe", "PoolPro", &invoice()).unwrap_err();
        assert!(matches!(err, AppError::FontNotFound(dir) if dir == "./pasta-que-nao-existe"));
    }
}
