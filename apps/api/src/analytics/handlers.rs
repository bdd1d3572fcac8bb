use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::analytics::export::ExportDocument;
use crate::analytics::kpi::{compute_kpis, KpiSummary};
use crate::analytics::reports::{build_report, Report, ReportKind};
use crate::errors::AppError;
use crate::state::AppState;

fn parse_kind(kind: &str) -> Result<ReportKind, AppError> {
    kind.parse::<ReportKind>().map_err(AppError::NotFound)
}

/// GET /api/v1/analytics/kpis
pub async fn handle_kpis(State(state): State<AppState>) -> Json<KpiSummary> {
    let data = state.store.snapshot().await;
    Json(compute_kpis(&data.resources, &data.projects))
}

/// GET /api/v1/analytics/reports/:kind
pub async fn handle_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Report>, AppError> {
    let kind = parse_kind(&kind)?;
    let data = state.store.snapshot().await;
    Ok(Json(build_report(kind, &data.resources, &data.projects)))
}

/// GET /api/v1/analytics/export/:kind
///
/// Same report as above, wrapped in an `ExportDocument` and served as a
/// pretty-printed attachment named `<label>_<YYYY-MM-DD>.json`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    let data = state.store.snapshot().await;
    let report = build_report(kind, &data.resources, &data.projects);

    let doc = ExportDocument::new(kind, report, Utc::now());
    let body = doc
        .to_pretty_json()
        .map_err(|e| AppError::Internal(e.into()))?;
    let disposition = format!("attachment; filename=\"{}\"", doc.filename());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
