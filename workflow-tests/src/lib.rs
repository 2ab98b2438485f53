//! Workflow tests: drive `invoice-form` against `invoice-service`.
//!
//! By default each context starts its own in-process server on a random port.
//! Set `INVOICE_SERVICE_URL` to run the same tests against a deployed server:
//!
//! ```bash
//! INVOICE_SERVICE_URL=http://localhost:3000 cargo test -p workflow-tests
//! ```

use anyhow::{anyhow, Result};
use invoice_form::FormClient;
use invoice_service::config::InvoiceConfig;
use invoice_service::startup::Application;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug,invoice_form=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Base URL of an externally started server, if one was given.
pub fn external_server() -> Option<String> {
    std::env::var("INVOICE_SERVICE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Poll `{server}/health` until it answers 200 OK.
pub async fn wait_for_service(server: &str, timeout: Duration) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", server.trim_end_matches('/'));
    let start = std::time::Instant::now();

    loop {
        let status = match client.get(&url).timeout(Duration::from_secs(2)).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            Ok(resp) => format!("status: {}", resp.status()),
            Err(e) => format!("error: {}", e),
        };

        if start.elapsed() > timeout {
            return Err(anyhow!("Timeout waiting for {} ({})", url, status));
        }

        tracing::debug!("Waiting for invoice-service: {}", status);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Start an invoice server on a random port and return its base URL.
pub async fn spawn_invoice_service(mut config: InvoiceConfig) -> Result<String> {
    config.common.port = 0;
    let app = Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build invoice-service: {}", e))?;
    let server = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    Ok(server)
}

/// A server to talk to, a form client pointed at it, and a scratch download
/// directory that is removed on drop.
pub struct WorkflowTestContext {
    pub server: String,
    pub client: FormClient,
    download_dir: TempDir,
}

impl WorkflowTestContext {
    pub async fn new() -> Result<Self> {
        Self::with_config(InvoiceConfig::default()).await
    }

    /// `config` only applies to the in-process server.
    pub async fn with_config(config: InvoiceConfig) -> Result<Self> {
        init_tracing();

        let server = match external_server() {
            Some(url) => url,
            None => spawn_invoice_service(config).await?,
        };
        wait_for_service(&server, Duration::from_secs(10)).await?;

        Ok(Self {
            client: FormClient::new(&server),
            server,
            download_dir: tempfile::tempdir()?,
        })
    }

    pub fn download_dir(&self) -> &Path {
        self.download_dir.path()
    }
}
