use crate::layout::LayoutConfig;
use crate::models::InvoiceRequest;
use crate::render::RenderError;
use crate::services::{
    record_invoice_generated, record_validation_failure, render_invoice, validate, RenderedInvoice,
};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Local;
use serde_json::Value;
use service_core::error::AppError;
use service_core::middleware::RequestId;
use std::sync::Arc;
use std::time::Instant;

pub const SUBTOTAL_HEADER: &str = "x-invoice-subtotal";
pub const TAX_HEADER: &str = "x-invoice-tax";
pub const TOTAL_HEADER: &str = "x-invoice-total";
pub const PAGES_HEADER: &str = "x-invoice-pages";

fn body_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!(rejection.body_text()))
    } else {
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    }
}

/// Run a PDF render on the blocking pool. A failed render and a panicked
/// task both surface as [`AppError::RenderError`].
async fn render_off_thread<F>(render: F) -> Result<RenderedInvoice, AppError>
where
    F: FnOnce() -> Result<RenderedInvoice, RenderError> + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| AppError::RenderError(anyhow::Error::new(e).context("render task failed")))?
        .map_err(|e| AppError::RenderError(anyhow::Error::new(e)))
}

/// `POST /generate`: render with the configured default layout.
pub async fn generate_invoice(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let layout = state.layouts.default_layout();
    generate(state, layout, request_id, payload).await
}

/// `POST /generate/:layout`
pub async fn generate_invoice_with_layout(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let layout = state
        .layouts
        .get(&name)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Unknown layout: {}", name)))?;
    generate(state, layout, request_id, payload).await
}

async fn generate(
    state: AppState,
    layout: Arc<LayoutConfig>,
    request_id: RequestId,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id.0, error = %rejection.body_text(), "Rejected request body");
        body_error(rejection)
    })?;
    let request = InvoiceRequest::from_body(body);

    let validation = validate(&request, &layout);
    if !validation.is_valid() {
        tracing::warn!(
            request_id = %request_id.0,
            layout = %layout.name,
            errors = ?validation.errors,
            "Invoice request failed validation"
        );
        record_validation_failure(&layout.name, validation.errors.len());
    }
    let invoice = validation.into_result()?;

    let layout_name = layout.name.clone();
    let item_count = invoice.items.len();
    let config = state.config.clone();
    let started = Instant::now();

    let rendered = render_off_thread(move || {
        render_invoice(&layout, &config.company, &invoice, Local::now().date_naive())
    })
    .await?;

    let elapsed = started.elapsed();
    record_invoice_generated(&layout_name, rendered.pages, elapsed);
    tracing::info!(
        request_id = %request_id.0,
        layout = %layout_name,
        items = item_count,
        pages = rendered.pages,
        bytes = rendered.bytes.len(),
        total = rendered.totals.total,
        elapsed_ms = elapsed.as_millis() as u64,
        "Invoice rendered"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", rendered.file_name),
        ),
        (
            HeaderName::from_static(SUBTOTAL_HEADER),
            format!("{:.2}", rendered.totals.subtotal),
        ),
        (
            HeaderName::from_static(TAX_HEADER),
            format!("{:.2}", rendered.totals.tax),
        ),
        (
            HeaderName::from_static(TOTAL_HEADER),
            format!("{:.2}", rendered.totals.total),
        ),
        (HeaderName::from_static(PAGES_HEADER), rendered.pages.to_string()),
    ];

    Ok((StatusCode::OK, headers, rendered.bytes).into_response())
}
