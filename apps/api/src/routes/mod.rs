pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::allocation::handlers as allocation;
use crate::analytics::handlers as analytics;
use crate::projects::handlers as projects;
use crate::resources::handlers as resources;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resource pool
        .route(
            "/api/v1/resources",
            get(resources::handle_list_resources).post(resources::handle_add_resource),
        )
        .route("/api/v1/resources/import", post(resources::handle_import))
        .route(
            "/api/v1/resources/import/sample",
            get(resources::handle_import_sample),
        )
        .route("/api/v1/resources/:id", get(resources::handle_get_resource))
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::handle_list_projects).post(projects::handle_add_project),
        )
        .route("/api/v1/projects/:id", get(projects::handle_get_project))
        // Allocation
        .route(
            "/api/v1/recommendations",
            get(allocation::handle_recommendations),
        )
        .route("/api/v1/allocations", post(allocation::handle_allocate))
        // Analytics
        .route("/api/v1/analytics/kpis", get(analytics::handle_kpis))
        .route(
            "/api/v1/analytics/reports/:kind",
            get(analytics::handle_report),
        )
        .route(
            "/api/v1/analytics/export/:kind",
            get(analytics::handle_export),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::allocation::scoring::WeightedMatchScorer;
    use crate::config::Config;
    use crate::models::{ExperienceLevel, ResourceStatus};
    use crate::store::InMemoryStore;
    use crate::test_support::{make_project, make_resource};

    fn app() -> Router {
        let mut busy = make_resource("RES-003", &["React", "AWS"], 95, ExperienceLevel::Lead);
        busy.status = ResourceStatus::OnLeave;
        let resources = vec![
            make_resource("RES-001", &["React", "TypeScript"], 70, ExperienceLevel::Senior),
            make_resource("RES-002", &["Python"], 60, ExperienceLevel::Junior),
            busy,
        ];
        let projects = vec![make_project(&["React", "TypeScript", "AWS", "Docker"])];

        build_router(AppState {
            store: Arc::new(InMemoryStore::new(resources, projects)),
            match_scorer: Arc::new(WeightedMatchScorer::default()),
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                seed_resource_count: 0,
                refresh_interval: None,
                request_timeout: Duration::from_secs(5),
            },
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = send(app, request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(&app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_resources_with_search_and_status() {
        let app = app();
        let (status, body) = get_json(&app, "/api/v1/resources?search=REACT&status=Available").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["resources"][0]["id"], "RES-001");

        let (_, all) = get_json(&app, "/api/v1/resources?department=&status=").await;
        assert_eq!(all["count"], 3);
    }

    #[tokio::test]
    async fn test_unknown_status_filter_is_rejected() {
        let (status, body) = get_json(&app(), "/api/v1/resources?status=Retired").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_recommendations_rank_available_resources_only() {
        let (status, body) = get_json(&app(), "/api/v1/recommendations?project_id=project-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scorerBackend"], "weighted");

        let candidates = body["candidates"].as_array().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["resource"]["id"], "RES-001");
        assert_eq!(candidates[0]["totalScore"], 49);
        assert_eq!(candidates[0]["recommendationLevel"], "medium");
        assert!(candidates
            .iter()
            .all(|c| c["resource"]["status"] == "Available"));
    }

    #[tokio::test]
    async fn test_recommendations_without_project_are_placeholders() {
        let (_, body) = get_json(&app(), "/api/v1/recommendations").await;
        assert!(body["project"].is_null());
        let candidates = body["candidates"].as_array().unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c["totalScore"] == 50));
    }

    #[tokio::test]
    async fn test_allocate_end_to_end() {
        let app = app();
        let (status, body) = post_json(
            &app,
            "/api/v1/allocations",
            json!({ "resourceId": "RES-001", "projectId": "project-1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matchScore"]["totalScore"], 49);

        let (_, resource) = get_json(&app, "/api/v1/resources/RES-001").await;
        assert_eq!(resource["status"], "Assigned");
        assert_eq!(resource["currentProjectId"], "project-1");

        let (_, project) = get_json(&app, "/api/v1/projects/project-1").await;
        assert_eq!(project["assignedResources"], json!(["RES-001"]));

        // The same resource cannot be booked twice.
        let (status, body) = post_json(
            &app,
            "/api/v1/allocations",
            json!({ "resourceId": "RES-001", "projectId": "project-1" }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_allocate_requires_both_selections() {
        let (status, body) = post_json(
            &app(),
            "/api/v1/allocations",
            json!({ "resourceId": "RES-001", "projectId": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Please select both a resource and a project"
        );
    }

    #[tokio::test]
    async fn test_allocate_unknown_resource_is_not_found() {
        let (status, _) = post_json(
            &app(),
            "/api/v1/allocations",
            json!({ "resourceId": "RES-999", "projectId": "project-1" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_resource_and_project() {
        let app = app();
        let (status, resource) = post_json(
            &app,
            "/api/v1/resources",
            json!({ "name": "Casey Jones", "email": "casey.jones@company.com", "role": "QA Engineer" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resource["role"], "QA Engineer");
        assert_eq!(resource["status"], "Available");

        let (status, project) = post_json(
            &app,
            "/api/v1/projects",
            json!({
                "name": "Data Lake",
                "clientName": "Acme",
                "engineeringManager": "Drew Lopez",
                "startDate": "2024-11-01",
                "requiredSkills": ["Python"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(project["status"], "Active");

        let (status, _) = post_json(&app, "/api/v1/resources", json!({ "email": "x@company.com" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_missing_utilization_falls_back() {
        let app = app();
        let csv = "name,email,utilizationRate,skills\nRowan Lopez,rowan@company.com,,Go;Rust\n";
        let request = Request::post("/api/v1/resources/import")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(csv))
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["importedCount"], 1);
        assert_eq!(body["mode"], "append");
        let utilization = body["resources"][0]["utilizationRate"].as_i64().unwrap();
        assert!((60..100).contains(&utilization));
        assert!(body["rows"][0]["defaultedFields"]
            .as_array()
            .unwrap()
            .contains(&json!("utilizationRate")));

        let (_, all) = get_json(&app, "/api/v1/resources").await;
        assert_eq!(all["count"], 4);
    }

    #[tokio::test]
    async fn test_import_replace_mode() {
        let app = app();
        let request = Request::post("/api/v1/resources/import?mode=replace")
            .body(Body::from("name\nRowan Lopez\n"))
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::OK);

        let (_, all) = get_json(&app, "/api/v1/resources").await;
        assert_eq!(all["count"], 1);
    }

    #[tokio::test]
    async fn test_import_without_header_is_rejected() {
        let request = Request::post("/api/v1/resources/import")
            .body(Body::empty())
            .unwrap();
        let response = send(&app(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "IMPORT_ERROR");
    }

    #[tokio::test]
    async fn test_import_rejects_non_utf8_body() {
        let request = Request::post("/api/v1/resources/import")
            .body(Body::from(vec![b'n', b'a', b'm', b'e', b'\n', 0xff, 0xfe, b'\n']))
            .unwrap();
        let response = send(&app(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "IMPORT_ERROR");
    }

    #[tokio::test]
    async fn test_kpis() {
        let (status, body) = get_json(&app(), "/api/v1/analytics/kpis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalResources"], 3);
        assert_eq!(body["available"], 2);
        assert_eq!(body["onLeave"], 1);
        assert_eq!(body["totalProjects"], 1);
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let (status, _) = get_json(&app(), "/api/v1/analytics/reports/charts").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_sets_attachment_filename() {
        let response = send(
            &app(),
            Request::get("/api/v1/analytics/export/overview")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"analytics_report_"));
        assert!(disposition.ends_with(".json\""));

        let body = body_json(response).await;
        assert_eq!(body["label"], "analytics_report");
        assert_eq!(body["report"]["kind"], "overview");
        assert_eq!(body["report"]["data"]["kpis"]["totalResources"], 3);
    }
}
