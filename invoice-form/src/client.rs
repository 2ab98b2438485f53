use crate::form::{FormError, InvoiceForm};
use chrono::Utc;
use invoice_service::format::sanitize_file_name;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use service_core::observability::{extract_request_id, inject_trace_headers};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

const GENERIC_FAILURE: &str = "Failed to generate PDF";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Caught before anything was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The server answered with an error. `message` is what the user sees.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Failed to reach invoice server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to save invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// Error bodies the server sends: a list for validation, a single string
/// otherwise.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    errors: Option<Vec<String>>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> String {
        match (self.errors, self.error) {
            (Some(errors), _) if !errors.is_empty() => errors.join("\n"),
            (_, Some(error)) if !error.is_empty() => error,
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadedInvoice {
    pub path: PathBuf,
    pub size: usize,
    /// From the response headers, when present.
    pub pages: Option<usize>,
    pub total: Option<String>,
    pub request_id: Option<String>,
}

/// Submits forms to an invoice server.
pub struct FormClient {
    client: Client,
    server: String,
}

impl FormClient {
    pub fn new(server: &str) -> Self {
        Self {
            client: Client::new(),
            server: server.trim_end_matches('/').to_string(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn generate_url(&self, layout: Option<&str>) -> String {
        match layout.map(str::trim).filter(|l| !l.is_empty()) {
            Some(layout) => format!("{}/generate/{}", self.server, layout),
            None => format!("{}/generate", self.server),
        }
    }

    /// Post the form and save the PDF as `invoice-<stamp>.pdf` in
    /// `download_dir`.
    pub async fn submit(
        &self,
        form: &InvoiceForm,
        download_dir: &Path,
    ) -> Result<DownloadedInvoice, SubmitError> {
        let payload = form.build_payload()?;
        let url = self.generate_url(form.layout.as_deref());

        let request_id = Uuid::new_v4().to_string();
        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, Some(&request_id));

        tracing::debug!(%url, %request_id, items = payload.items.len(), "Submitting invoice");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                e
            })?;

        let status = response.status();
        let request_id = extract_request_id(response.headers());
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            let message = body.into_message();
            tracing::warn!(%status, ?request_id, %message, "Invoice server rejected submission");
            return Err(SubmitError::Rejected { status, message });
        }

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let pages = header("x-invoice-pages").and_then(|p| p.parse().ok());
        let total = header("x-invoice-total");

        let bytes = response.bytes().await?;

        let stamp = payload
            .invoice_number
            .clone()
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());
        let path = download_dir.join(format!("invoice-{}.pdf", sanitize_file_name(&stamp)));

        tokio::fs::create_dir_all(download_dir).await?;
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(path = %path.display(), size = bytes.len(), ?pages, "Invoice saved");

        Ok(DownloadedInvoice {
            path,
            size: bytes.len(),
            pages,
            total,
            request_id,
        })
    }
}
