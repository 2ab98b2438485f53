pub mod metrics;
pub mod renderer;
pub mod validation;

pub use metrics::{get_metrics, init_metrics, record_invoice_generated, record_validation_failure};
pub use renderer::{invoice_file_name, render_invoice, RenderedInvoice};
pub use validation::{validate, Validation};
