//! Validated invoice to PDF bytes.

use crate::config::CompanyProfile;
use crate::format::{format_date, sanitize_file_name};
use crate::layout::LayoutConfig;
use crate::models::{InvoiceTotals, LineItem, NormalizedInvoice};
use crate::render::{draw_invoice, InvoiceDocument, PdfCanvas, RenderError};
use chrono::{NaiveDate, Utc};

/// A finished document ready to send.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub totals: InvoiceTotals,
    pub file_name: String,
}

/// `invoice-<id>.pdf`, where `id` is the sanitized invoice number or the
/// current epoch milliseconds.
pub fn invoice_file_name(invoice_number: &str) -> String {
    let base = if invoice_number.is_empty() {
        Utc::now().timestamp_millis().to_string()
    } else {
        invoice_number.to_string()
    };
    format!("invoice-{}.pdf", sanitize_file_name(&base))
}

/// Totals are always recomputed here from the validated items.
pub fn render_invoice(
    layout: &LayoutConfig,
    company: &CompanyProfile,
    invoice: &NormalizedInvoice,
    today: NaiveDate,
) -> Result<RenderedInvoice, RenderError> {
    let totals = InvoiceTotals::compute(invoice.items.iter().map(LineItem::amount), layout.tax_rate);
    let date = format_date(invoice.date.as_deref(), &invoice.locale, today);
    let doc = InvoiceDocument {
        layout,
        company,
        invoice,
        totals: &totals,
        date: &date,
    };

    let title = format!("Invoice for {}", invoice.customer_name);
    let mut canvas = PdfCanvas::new(&title, &layout.geometry)?;
    let pages = draw_invoice(&mut canvas, &doc);
    debug_assert_eq!(pages, canvas.page_count());
    let bytes = canvas.finish()?;

    Ok(RenderedInvoice {
        bytes,
        pages,
        totals,
        file_name: invoice_file_name(&invoice.invoice_number),
    })
}
