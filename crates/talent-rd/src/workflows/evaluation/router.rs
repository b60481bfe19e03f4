use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::competency::EmployeeId;

use super::domain::{EvaluationCategory, EvaluationId, EvaluationStatus};
use super::repository::{EvaluationRepository, RepositoryError};
use super::service::{EvaluationService, EvaluationServiceError, ScoreInput};

/// Router builder exposing the evaluation lifecycle over HTTP.
pub fn evaluation_router<R>(service: Arc<EvaluationService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(open_handler::<R>))
        .route("/api/v1/evaluations/:evaluation_id", get(get_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id/scores",
            put(scores_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/status",
            post(status_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/history",
            get(history_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenEvaluationRequest {
    pub(crate) employee_id: String,
    pub(crate) year: i32,
    pub(crate) evaluator: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordScoresRequest {
    pub(crate) scores: BTreeMap<EvaluationCategory, ScoreInput>,
    pub(crate) performer: String,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionRequest {
    pub(crate) status: EvaluationStatus,
    pub(crate) performer: String,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

fn error_response(error: EvaluationServiceError) -> Response {
    let status = match &error {
        EvaluationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EvaluationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EvaluationServiceError::AlreadyExists { .. }
        | EvaluationServiceError::IllegalTransition { .. }
        | EvaluationServiceError::NotEditable { .. } => StatusCode::CONFLICT,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn open_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    axum::Json(request): axum::Json<OpenEvaluationRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.open(
        EmployeeId(request.employee_id),
        request.year,
        request.evaluator,
    ) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.get(&EvaluationId(evaluation_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scores_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
    axum::Json(request): axum::Json<RecordScoresRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.record_scores(
        &EvaluationId(evaluation_id),
        request.scores,
        request.performer,
        request.comment,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.transition(
        &EvaluationId(evaluation_id),
        request.status,
        request.performer,
        request.comment,
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.history(&EvaluationId(evaluation_id)) {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}
