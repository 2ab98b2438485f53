use crate::layout::LayoutSummary;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `GET /layouts`: presets accepted by `POST /generate/:layout`.
pub async fn list_layouts(State(state): State<AppState>) -> Json<Vec<LayoutSummary>> {
    Json(state.layouts.summaries())
}
