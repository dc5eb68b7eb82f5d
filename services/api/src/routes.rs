use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use formsly::forms::requests::{
    expand, request_router, DuplicateRecord, FieldResponse, NotificationPublisher,
    FormRequestService, RequestRepository, Section,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Payload for the expansion summary endpoint: the form's base sections plus
/// any duplicate records from prior submissions.
#[derive(Debug, Deserialize)]
pub(crate) struct FormSummaryRequest {
    pub(crate) sections: Vec<Section>,
    #[serde(default)]
    pub(crate) duplicates: Vec<DuplicateRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormSummaryResponse {
    pub(crate) instance_count: usize,
    pub(crate) instances: Vec<SectionSummaryView>,
}

/// Positional view of one expanded section instance. Columns and values are
/// index-aligned; downstream CSV/PDF consumers rely on this order.
#[derive(Debug, Serialize)]
pub(crate) struct SectionSummaryView {
    pub(crate) section_id: String,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duplicate_group: Option<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<Option<FieldResponse>>,
}

pub(crate) fn with_request_routes<R, N>(
    service: Arc<FormRequestService<R, N>>,
) -> axum::Router
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    request_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/forms/summary",
            axum::routing::post(form_summary_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn form_summary_endpoint(
    Json(payload): Json<FormSummaryRequest>,
) -> Json<FormSummaryResponse> {
    let FormSummaryRequest {
        sections,
        duplicates,
    } = payload;

    let instances = expand(&sections, &duplicates);
    let views: Vec<SectionSummaryView> = instances
        .iter()
        .map(|instance| {
            let mut fields: Vec<_> = instance
                .fields
                .iter()
                .filter(|field| !field.kind.is_marker())
                .collect();
            fields.sort_by_key(|field| field.order);

            SectionSummaryView {
                section_id: instance.section_id.0.clone(),
                name: instance.name.clone(),
                duplicate_group: instance
                    .duplicate_group
                    .as_ref()
                    .map(|group| group.0.clone()),
                columns: fields.iter().map(|field| field.label.clone()).collect(),
                values: fields.iter().map(|field| field.response.clone()).collect(),
            }
        })
        .collect();

    Json(FormSummaryResponse {
        instance_count: views.len(),
        instances: views,
    })
}
