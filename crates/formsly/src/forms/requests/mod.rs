//! Dynamic form request intake: binding, duplication expansion, and scoring.
//!
//! The engine modules (`controls`, `binder`, `expansion`, `scoring`) are pure
//! functions over the domain model; persistence and notification effects live
//! behind the repository traits and are composed by the service facade.

pub mod binder;
pub mod controls;
pub mod domain;
pub mod expansion;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod templates;

#[cfg(test)]
mod tests;

pub use binder::{bind, MissingField, ValidationError};
pub use controls::{coerce_response, resolve_control, Coercion, ControlKind};
pub use domain::{
    DuplicateGroupId, DuplicateRecord, Field, FieldId, FieldKind, FieldResponse, Form, FormId,
    RequestId, RequestStatus, ResponseEntry, Section, SectionId, SectionInstance, Signer,
    SignerAction, SignerId,
};
pub use expansion::expand;
pub use repository::{
    NotificationError, NotificationPublisher, RepositoryError, RequestNotification, RequestRecord,
    RequestRepository, RequestStatusView,
};
pub use router::{request_router, RequestSubmission};
pub use scoring::{score, AnswerCheck, AssessmentConfig, AssessmentOutcome};
pub use service::{FormRequestService, RequestServiceError};
