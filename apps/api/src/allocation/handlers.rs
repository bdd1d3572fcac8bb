//! Axum route handlers for recommendations and allocation.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::allocation::recommender::{recommend, RankedResource};
use crate::allocation::scoring::MatchScore;
use crate::errors::AppError;
use crate::models::{Project, ResourceStatus};
use crate::resources::filter::ResourceFilter;
use crate::state::AppState;
use crate::store::AllocationEvent;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub project: Option<Project>,
    pub scorer_backend: &'static str,
    pub candidates: Vec<RankedResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateRequest {
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub project_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateResponse {
    #[serde(flatten)]
    pub allocation: AllocationEvent,
    pub match_score: MatchScore,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/recommendations?project_id=...
///
/// Ranks every Available resource against the project. Without `project_id`
/// the candidates come back unranked with the neutral placeholder score.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let project = match query.project_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => Some(state.store.get_project(&id).await?),
        None => None,
    };

    let pool = state
        .store
        .list_resources(&ResourceFilter {
            status: Some(ResourceStatus::Available),
            ..Default::default()
        })
        .await;

    let candidates = recommend(project.as_ref(), &pool, state.match_scorer.as_ref());

    Ok(Json(RecommendationResponse {
        project,
        scorer_backend: state.match_scorer.backend(),
        candidates,
    }))
}

/// POST /api/v1/allocations
///
/// Assigns one Available resource to one project. Both selections are required.
pub async fn handle_allocate(
    State(state): State<AppState>,
    Json(req): Json<AllocateRequest>,
) -> Result<Json<AllocateResponse>, AppError> {
    if req.resource_id.trim().is_empty() || req.project_id.trim().is_empty() {
        return Err(AppError::Validation(
            "Please select both a resource and a project".to_string(),
        ));
    }

    let allocation = state
        .store
        .allocate(req.resource_id.trim(), req.project_id.trim())
        .await?;
    let match_score = state
        .match_scorer
        .score(&allocation.resource, &allocation.project);

    Ok(Json(AllocateResponse {
        allocation,
        match_score,
    }))
}
