use crate::config::InvoiceConfig;
use crate::handlers;
use crate::layout::LayoutRegistry;
use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, RequestId,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<InvoiceConfig>,
    pub layouts: Arc<LayoutRegistry>,
}

pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
}

/// Routes and middleware, without binding a listener.
pub fn router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .route("/generate", post(handlers::generate_invoice))
        .route("/generate/:layout", post(handlers::generate_invoice_with_layout))
        .route("/layouts", get(handlers::list_layouts))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route_layer(from_fn(metrics_middleware))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(trace)
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl Application {
    async fn bind(config: InvoiceConfig) -> Result<(TcpListener, u16, Router), AppError> {
        let layouts = config.layouts().map_err(|e| {
            tracing::error!("Invalid layout configuration: {}", e);
            e
        })?;
        tracing::info!(
            default_layout = %layouts.default_layout().name,
            layouts = ?layouts.names().collect::<Vec<_>>(),
            "Layouts loaded"
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState {
            config: Arc::new(config),
            layouts: Arc::new(layouts),
        };

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok((listener, port, router(state)))
    }

    pub async fn build(config: InvoiceConfig) -> Result<Self, AppError> {
        let (listener, port, app) = Self::bind(config).await?;
        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    /// Like [`Application::build`], but the server drains in-flight requests
    /// and stops once `signal` resolves.
    pub async fn build_with_shutdown<F>(config: InvoiceConfig, signal: F) -> Result<Self, AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (listener, port, app) = Self::bind(config).await?;
        let server = axum::serve(listener, app).with_graceful_shutdown(signal);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
