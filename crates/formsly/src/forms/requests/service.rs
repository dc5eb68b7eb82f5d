use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::binder::{bind, ValidationError};
use super::domain::{DuplicateRecord, Form, RequestId, RequestStatus};
use super::expansion::expand;
use super::repository::{
    NotificationError, NotificationPublisher, RepositoryError, RequestNotification, RequestRecord,
    RequestRepository,
};
use super::scoring::{score, AssessmentConfig, AssessmentOutcome};

/// Service composing the form engine, repository, and notification hooks.
pub struct FormRequestService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    config: AssessmentConfig,
}

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RequestId(format!("req-{id:06}"))
}

/// Map a numeric score through the caller-supplied pass threshold. Policy
/// lives here, not in the evaluator, so different forms can use different
/// thresholds.
pub(crate) fn decide_status(outcome: &AssessmentOutcome, passing_score: u32) -> RequestStatus {
    if outcome.score >= passing_score {
        RequestStatus::Approved
    } else {
        RequestStatus::Rejected
    }
}

impl<R, N> FormRequestService<R, N>
where
    R: RequestRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: AssessmentConfig) -> Self {
        Self {
            repository,
            notifications,
            config,
        }
    }

    /// Submit a completed form, returning the repository-backed record.
    ///
    /// Expands duplicated sections, binds the response tree (collecting every
    /// required-field error at once), persists a pending record, and notifies
    /// the primary signer.
    pub fn submit(
        &self,
        form: &Form,
        duplicates: &[DuplicateRecord],
    ) -> Result<RequestRecord, RequestServiceError> {
        let instances = expand(&form.sections, duplicates);
        let responses = bind(&instances)?;

        let record = RequestRecord {
            request_id: next_request_id(),
            form_id: form.id.clone(),
            form_name: form.name.clone(),
            responses,
            status: RequestStatus::Pending,
            signers: form.signers.clone(),
            assessment: None,
        };

        let stored = self.repository.insert(record)?;

        if let Some(signer) = form.primary_signer() {
            let mut details = BTreeMap::new();
            details.insert("form".to_string(), form.name.clone());
            details.insert("signer".to_string(), signer.signer_id.0.clone());
            self.notifications.publish(RequestNotification {
                template: "request_submitted".to_string(),
                request_id: stored.request_id.clone(),
                details,
            })?;
        }

        Ok(stored)
    }

    /// Score a pending request against the answer key carried by the form and
    /// persist the resulting status.
    pub fn assess(
        &self,
        request_id: &RequestId,
        answer_key: &Form,
    ) -> Result<AssessmentOutcome, RequestServiceError> {
        let mut record = self
            .repository
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        let outcome = score(&answer_key.sections, &record.responses);

        record.status = decide_status(&outcome, self.config.passing_score);
        record.assessment = Some(outcome.clone());
        self.repository.update(record.clone())?;

        if record.status == RequestStatus::Approved {
            let mut details = BTreeMap::new();
            details.insert("form".to_string(), record.form_name.clone());
            details.insert("score".to_string(), outcome.score.to_string());
            self.notifications.publish(RequestNotification {
                template: "request_approved".to_string(),
                request_id: record.request_id.clone(),
                details,
            })?;
        }

        Ok(outcome)
    }

    /// Cancel a request that has not yet been acted on.
    pub fn cancel(&self, request_id: &RequestId) -> Result<RequestRecord, RequestServiceError> {
        let mut record = self
            .repository
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.status != RequestStatus::Pending {
            return Err(RequestServiceError::InvalidTransition(record.status));
        }

        record.status = RequestStatus::Canceled;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch a request and current status for API responses.
    pub fn get(&self, request_id: &RequestId) -> Result<RequestRecord, RequestServiceError> {
        let record = self
            .repository
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the request service.
#[derive(Debug, thiserror::Error)]
pub enum RequestServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error("request cannot be canceled from status {}", .0.label())]
    InvalidTransition(RequestStatus),
}
