//! invoice-service: turns invoice line items into downloadable PDFs.
pub mod config;
pub mod format;
pub mod handlers;
pub mod layout;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
