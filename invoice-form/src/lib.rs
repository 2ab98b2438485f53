//! invoice-form: the client side of invoice generation.
//!
//! [`InvoiceForm`] models the entry form (editable rows with live totals) and
//! [`FormClient`] posts it to `invoice-service` and saves the returned PDF.
pub mod client;
pub mod form;

pub use client::{DownloadedInvoice, FormClient, SubmitError};
pub use form::{FormError, InvoiceForm, InvoicePayload, Row, RowId, RowInput, TotalsDisplay};
