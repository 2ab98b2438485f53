pub mod generate;
pub mod health;
pub mod layouts;

pub use generate::{generate_invoice, generate_invoice_with_layout};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use layouts::list_layouts;
