use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::{NewProject, Project};
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn handle_list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.store.list_projects().await)
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(state.store.get_project(&id).await?))
}

/// POST /api/v1/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
    Json(req): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = state.store.add_project(req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}
