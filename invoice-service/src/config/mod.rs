use crate::layout::LayoutRegistry;
use serde::Deserialize;
use service_core::config::{self as core_config, load_settings};
use service_core::error::AppError;

/// Settings for the invoice renderer.
///
/// Read from `configuration.{yaml,toml,json}` and `APP__` variables, e.g.
/// `APP__DEFAULT_LAYOUT=itemized` or `APP__COMPANY__EMAIL=billing@acme.test`.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    #[serde(default)]
    pub company: CompanyProfile,
    /// Preset used by `POST /generate`.
    #[serde(default = "default_layout")]
    pub default_layout: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Seller details printed in the header band and footer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub email: String,
    pub website: String,
    pub payment_terms: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Auto Invoice Generator Co.".to_string(),
            address_line1: "123 Business Road".to_string(),
            address_line2: "Metropolis, Country".to_string(),
            email: "support@example.com".to_string(),
            website: "www.example.com".to_string(),
            payment_terms: "Payment is due upon receipt.".to_string(),
        }
    }
}

fn default_layout() -> String {
    "standard".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        InvoiceConfig {
            common: core_config::Config::default(),
            company: CompanyProfile::default(),
            default_layout: default_layout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl InvoiceConfig {
    pub fn load() -> Result<Self, AppError> {
        load_settings()
    }

    /// Built-in presets with the configured default.
    pub fn layouts(&self) -> Result<LayoutRegistry, AppError> {
        LayoutRegistry::builtin(&self.default_layout).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "Unknown default layout: {}",
                self.default_layout
            ))
        })
    }
}
