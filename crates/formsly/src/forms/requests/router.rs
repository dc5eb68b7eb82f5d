use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DuplicateRecord, Form, RequestId, RequestStatus};
use super::repository::{NotificationPublisher, RepositoryError, RequestRepository};
use super::service::{FormRequestService, RequestServiceError};

/// Submission payload: the completed form plus any duplicated-section
/// records carried over from prior edits.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSubmission {
    pub form: Form,
    #[serde(default)]
    pub duplicates: Vec<DuplicateRecord>,
}

/// Router builder exposing HTTP endpoints for intake and status tracking.
pub fn request_router<R, N>(service: Arc<FormRequestService<R, N>>) -> Router
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/requests", post(submit_handler::<R, N>))
        .route("/api/v1/requests/:request_id", get(status_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<FormRequestService<R, N>>>,
    axum::Json(submission): axum::Json<RequestSubmission>,
) -> Response
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(&submission.form, &submission.duplicates) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(RequestServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "errors": error.messages(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RequestServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "request already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<FormRequestService<R, N>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = RequestId(request_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RequestServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "request_id": id.0,
                "status": RequestStatus::Pending.label(),
                "summary": "pending review",
                "score": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
