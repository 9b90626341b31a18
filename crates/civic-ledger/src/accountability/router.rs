use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::citizen::{validate_submission, CitizenReportSubmission};
use super::domain::ProjectStatus;
use super::filters::{
    unique_counties, unique_parties, unique_positions, unique_project_categories, LeaderFilter,
    ProjectFilter,
};
use super::report::{
    leader_scorecard, project_card, AccountabilityDashboard, ComparisonMetric, LeaderSelection,
};
use crate::dataset::Dataset;

/// Read-only endpoints over a loaded dataset, plus citizen report intake.
pub fn accountability_router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/api/v1/leaders", get(list_leaders_handler))
        .route("/api/v1/leaders/compare", post(compare_handler))
        .route("/api/v1/leaders/:leader_id", get(leader_handler))
        .route("/api/v1/projects", get(list_projects_handler))
        .route(
            "/api/v1/projects/:project_id/reports",
            post(submit_report_handler),
        )
        .route("/api/v1/filters", get(filters_handler))
        .route("/api/v1/accountability/dashboard", get(dashboard_handler))
        .with_state(dataset)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    #[serde(default)]
    pub(crate) leader_ids: Vec<String>,
    pub(crate) metric: String,
}

pub(crate) async fn list_leaders_handler(
    State(dataset): State<Arc<Dataset>>,
    Query(filter): Query<LeaderFilter>,
) -> Response {
    let today = Utc::now().date_naive();
    let scorecards: Vec<_> = filter
        .apply(&dataset.leaders)
        .into_iter()
        .map(|leader| leader_scorecard(leader, today))
        .collect();
    (StatusCode::OK, axum::Json(scorecards)).into_response()
}

pub(crate) async fn leader_handler(
    State(dataset): State<Arc<Dataset>>,
    Path(leader_id): Path<String>,
) -> Response {
    match dataset.leader(&leader_id) {
        Some(leader) => {
            let payload = json!({
                "scorecard": leader_scorecard(leader, Utc::now().date_naive()),
                "leader": leader,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => not_found("leader", &leader_id),
    }
}

pub(crate) async fn list_projects_handler(
    State(dataset): State<Arc<Dataset>>,
    Query(filter): Query<ProjectFilter>,
) -> Response {
    let today = Utc::now().date_naive();
    let cards: Vec<_> = filter
        .apply(&dataset.projects)
        .into_iter()
        .map(|project| project_card(project, today))
        .collect();
    (StatusCode::OK, axum::Json(cards)).into_response()
}

pub(crate) async fn filters_handler(State(dataset): State<Arc<Dataset>>) -> Response {
    let statuses: Vec<_> = ProjectStatus::ordered()
        .into_iter()
        .filter(|status| *status != ProjectStatus::Unknown)
        .map(|status| json!({ "key": status.key(), "label": status.label() }))
        .collect();
    let metrics: Vec<_> = ComparisonMetric::ordered()
        .into_iter()
        .map(|metric| json!({ "key": metric.key(), "label": metric.label() }))
        .collect();

    let payload = json!({
        "positions": unique_positions(&dataset.leaders),
        "counties": unique_counties(&dataset.leaders),
        "parties": unique_parties(&dataset.leaders),
        "project_categories": unique_project_categories(&dataset.projects),
        "project_statuses": statuses,
        "comparison_metrics": metrics,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn dashboard_handler(State(dataset): State<Arc<Dataset>>) -> Response {
    let dashboard = AccountabilityDashboard::build(&dataset.leaders, &dataset.projects);
    (StatusCode::OK, axum::Json(dashboard)).into_response()
}

pub(crate) async fn compare_handler(
    State(dataset): State<Arc<Dataset>>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response {
    let selection = LeaderSelection::from_ids(&request.leader_ids);
    let label = request
        .metric
        .parse::<ComparisonMetric>()
        .map(ComparisonMetric::label)
        .ok();
    let points = selection.compare(&dataset.leaders, &request.metric);

    let payload = json!({
        "metric": request.metric,
        "label": label,
        "leader_ids": selection.ids(),
        "points": points,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_report_handler(
    State(dataset): State<Arc<Dataset>>,
    Path(project_id): Path<String>,
    axum::Json(submission): axum::Json<CitizenReportSubmission>,
) -> Response {
    if dataset.project(&project_id).is_none() {
        return not_found("project", &project_id);
    }

    match validate_submission(&project_id, submission, Utc::now()) {
        Ok(report) => {
            tracing::info!(
                project_id = %project_id,
                report_id = %report.id,
                "citizen report accepted"
            );
            (StatusCode::ACCEPTED, axum::Json(report)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

fn not_found(kind: &str, id: &str) -> Response {
    let payload = json!({
        "error": format!("{kind} '{id}' not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}
