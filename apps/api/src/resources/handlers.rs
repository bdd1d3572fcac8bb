use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::{NewResource, Resource};
use crate::resources::filter::{ResourceFilter, ResourceQuery};
use crate::resources::import::{parse_resource_csv, ImportMode, ImportReport, SAMPLE_CSV};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResourceListResponse {
    pub count: usize,
    pub resources: Vec<Resource>,
}

#[derive(Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub mode: ImportMode,
}

/// GET /api/v1/resources
pub async fn handle_list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ResourceListResponse>, AppError> {
    let filter = ResourceFilter::try_from(query)?;
    let resources = state.store.list_resources(&filter).await;
    Ok(Json(ResourceListResponse {
        count: resources.len(),
        resources,
    }))
}

/// GET /api/v1/resources/:id
pub async fn handle_get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resource>, AppError> {
    Ok(Json(state.store.get_resource(&id).await?))
}

/// POST /api/v1/resources
pub async fn handle_add_resource(
    State(state): State<AppState>,
    Json(req): Json<NewResource>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let resource = state.store.add_resource(req).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// POST /api/v1/resources/import?mode=append|replace
///
/// Body is the raw CSV text and must be UTF-8.
pub async fn handle_import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<Json<ImportReport>, AppError> {
    let text = std::str::from_utf8(&body)
        .map_err(|e| AppError::Import(format!("CSV body is not valid UTF-8: {e}")))?;
    let parsed = {
        let mut rng = rand::thread_rng();
        parse_resource_csv(text, Utc::now().date_naive(), &mut rng)?
    };

    let rows = parsed.row_reports();
    let defaulted_rows = rows.iter().filter(|r| !r.defaulted_fields.is_empty()).count();
    if defaulted_rows > 0 {
        info!("CSV import: {defaulted_rows} of {} rows used fallback values", rows.len());
    }

    let resources = state.store.import_resources(parsed.rows, query.mode).await;

    Ok(Json(ImportReport {
        mode: query.mode,
        imported_count: resources.len(),
        resources,
        rows,
        skipped: parsed.skipped,
    }))
}

/// GET /api/v1/resources/import/sample
pub async fn handle_import_sample() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sample_employee_data.csv\"",
            ),
        ],
        SAMPLE_CSV,
    )
}
