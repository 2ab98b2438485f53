//! Domain models for invoice-service.

mod invoice;
mod line_item;
mod totals;

pub use invoice::{InvoiceRequest, NormalizedInvoice};
pub use line_item::{ItemKind, LineItem};
pub use totals::{round2, InvoiceTotals};
