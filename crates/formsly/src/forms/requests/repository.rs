use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FormId, RequestId, RequestStatus, ResponseEntry, Signer};
use super::scoring::AssessmentOutcome;

/// Repository record containing the bound responses, routing metadata, and
/// workflow status for one submitted request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request_id: RequestId,
    pub form_id: FormId,
    pub form_name: String,
    pub responses: Vec<ResponseEntry>,
    pub status: RequestStatus,
    pub signers: Vec<Signer>,
    pub assessment: Option<AssessmentOutcome>,
}

impl RequestRecord {
    pub fn assessment_summary(&self) -> String {
        match &self.assessment {
            Some(outcome) => format!("scored {}/{}", outcome.score, outcome.eligible),
            None => "pending review".to_string(),
        }
    }

    pub fn status_view(&self) -> RequestStatusView {
        RequestStatusView {
            request_id: self.request_id.clone(),
            form_name: self.form_name.clone(),
            status: self.status.label(),
            summary: self.assessment_summary(),
            score: self.assessment.as_ref().map(|outcome| outcome.score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RequestRepository: Send + Sync {
    fn insert(&self, record: RequestRecord) -> Result<RequestRecord, RepositoryError>;
    fn update(&self, record: RequestRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<RequestRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e-mail adapters and the
/// like); the engine only cares about the payload shape.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError>;
}

/// Notification payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNotification {
    pub template: String,
    pub request_id: RequestId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a request's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct RequestStatusView {
    pub request_id: RequestId,
    pub form_name: String,
    pub status: &'static str,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}
