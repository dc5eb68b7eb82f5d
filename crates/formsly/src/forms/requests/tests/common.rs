use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::forms::requests::domain::{
    DuplicateGroupId, DuplicateRecord, FieldId, FieldResponse, Form, RequestId, RequestStatus,
    SectionId,
};
use crate::forms::requests::repository::{
    NotificationError, NotificationPublisher, RepositoryError, RequestNotification, RequestRecord,
    RequestRepository,
};
use crate::forms::requests::scoring::AssessmentConfig;
use crate::forms::requests::{request_router, templates, FormRequestService};

pub(super) fn set_response(form: &mut Form, field_id: &str, value: FieldResponse) {
    let field = form
        .sections
        .iter_mut()
        .flat_map(|section| section.fields.iter_mut())
        .find(|field| field.id.0 == field_id)
        .expect("fixture field exists");
    field.response = Some(value);
}

pub(super) fn completed_ticket() -> Form {
    let mut form = templates::general_ticket_form();
    set_response(
        &mut form,
        "ticket-title",
        FieldResponse::Text("Broken projector".to_string()),
    );
    set_response(
        &mut form,
        "ticket-description",
        FieldResponse::Text("Conference room projector no longer powers on.".to_string()),
    );
    form
}

pub(super) fn line_item_record(group: &str, name: &str, quantity: f64, unit: &str) -> DuplicateRecord {
    let mut responses = BTreeMap::new();
    responses.insert(
        FieldId("item-name".to_string()),
        FieldResponse::Text(name.to_string()),
    );
    responses.insert(
        FieldId("item-quantity".to_string()),
        FieldResponse::Number(quantity),
    );
    responses.insert(
        FieldId("item-unit".to_string()),
        FieldResponse::Selection(unit.to_string()),
    );
    DuplicateRecord {
        duplicate_group: DuplicateGroupId(group.to_string()),
        section_id: SectionId("line-item".to_string()),
        responses,
    }
}

pub(super) fn completed_item_request() -> (Form, Vec<DuplicateRecord>) {
    let mut form = templates::item_request_form();
    set_response(
        &mut form,
        "requester-name",
        FieldResponse::Text("Dana Reyes".to_string()),
    );
    set_response(
        &mut form,
        "requester-email",
        FieldResponse::Text("dana.reyes@example.com".to_string()),
    );
    set_response(
        &mut form,
        "needed-by",
        FieldResponse::Date(NaiveDate::from_ymd_opt(2026, 9, 15).expect("valid date")),
    );

    let duplicates = vec![
        line_item_record("dup-1", "Laptop stand", 2.0, "piece"),
        line_item_record("dup-2", "Printer paper", 5.0, "box"),
    ];
    (form, duplicates)
}

/// Technical assessment with the first `correct` answers matching the key
/// and the remainder deliberately wrong.
pub(super) fn assessment_with_correct(correct: usize) -> Form {
    let mut form = templates::technical_assessment_form();
    let section = &mut form.sections[0];
    for (index, field) in section.fields.iter_mut().enumerate() {
        let answer = match &field.correct_response {
            Some(FieldResponse::Selection(answer)) => answer.clone(),
            other => panic!("assessment field carries a selection key, got {other:?}"),
        };
        let chosen = if index < correct {
            answer
        } else {
            field
                .options
                .iter()
                .find(|option| **option != answer)
                .expect("a wrong option exists")
                .clone()
        };
        field.response = Some(FieldResponse::Selection(chosen));
    }
    form
}

pub(super) fn build_service() -> (
    FormRequestService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = FormRequestService::new(
        repository.clone(),
        notifications.clone(),
        AssessmentConfig::default(),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RequestId, RequestRecord>>>,
}

impl RequestRepository for MemoryRepository {
    fn insert(&self, record: RequestRecord) -> Result<RequestRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.request_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.request_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RequestRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.request_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == RequestStatus::Pending)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<RequestNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<RequestNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl RequestRepository for ConflictRepository {
    fn insert(&self, _record: RequestRecord) -> Result<RequestRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: RequestRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RequestRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) fn request_router_with_service(
    service: FormRequestService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    request_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
