//! Text formatting for rendered invoices: money, dates and file names.

mod currency;
mod date;
mod filename;

pub use currency::{currency_symbol, format_currency, format_percent};
pub use date::{format_date, parse_date};
pub use filename::sanitize_file_name;
