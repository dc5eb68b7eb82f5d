//! Integration specifications for form request intake and status tracking.
//!
//! Scenarios drive the public service facade and HTTP router end to end so
//! binding, expansion, and routing behavior is validated without reaching
//! into private modules.

mod common {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use formsly::forms::requests::{
        AssessmentConfig, DuplicateGroupId, DuplicateRecord, FieldId, FieldResponse, Form,
        FormRequestService, NotificationError, NotificationPublisher, RepositoryError, RequestId,
        RequestNotification, RequestRecord, RequestRepository, RequestStatus, SectionId,
        templates,
    };

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
            line_item("dup-1", "Laptop stand", 2.0, "piece"),
            line_item("dup-2", "Printer paper", 5.0, "box"),
        ];
        (form, duplicates)
    }

    pub(super) fn line_item(group: &str, name: &str, quantity: f64, unit: &str) -> DuplicateRecord {
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

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<RequestId, RequestRecord>>>,
    }

    impl RequestRepository for MemoryRepository {
        fn insert(&self, record: RequestRecord) -> Result<RequestRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.request_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.request_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: RequestRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.request_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn pending(&self, _limit: usize) -> Result<Vec<RequestRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
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
            self.events.lock().expect("lock").clone()
        }
    }

    impl NotificationPublisher for MemoryNotifications {
        fn publish(&self, notification: RequestNotification) -> Result<(), NotificationError> {
            self.events.lock().expect("lock").push(notification);
            Ok(())
        }
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
}

mod intake {
    use super::common::*;
    use formsly::forms::requests::{
        templates, RequestRepository, RequestServiceError, RequestStatus,
    };

    #[test]
    fn complete_submission_is_stored_pending_with_a_signer_notification() {
        let (service, repository, notifications) = build_service();

        let record = service
            .submit(&completed_ticket(), &[])
            .expect("submission succeeds");

        let stored = repository
            .fetch(&record.request_id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.status, RequestStatus::Pending);
        assert_eq!(stored.responses.len(), 2);

        let events = notifications.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].template, "request_submitted");
    }

    #[test]
    fn empty_general_ticket_reports_both_required_fields() {
        let (service, _, notifications) = build_service();

        match service.submit(&templates::general_ticket_form(), &[]) {
            Err(RequestServiceError::Validation(error)) => {
                assert_eq!(
                    error.messages(),
                    vec![
                        "Title is required".to_string(),
                        "Description is required".to_string(),
                    ],
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }

        assert!(notifications.events().is_empty());
    }

    #[test]
    fn duplicated_line_items_bind_in_creation_order() {
        let (service, _, _) = build_service();
        let (form, duplicates) = completed_item_request();

        let record = service.submit(&form, &duplicates).expect("submission succeeds");

        let groups: Vec<Option<&str>> = record
            .responses
            .iter()
            .map(|entry| entry.duplicate_group.as_ref().map(|group| group.0.as_str()))
            .collect();
        assert_eq!(groups[..3], [None, None, None]);
        assert_eq!(groups[3..6], [Some("dup-1"); 3]);
        assert_eq!(groups[6..], [Some("dup-2"); 3]);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use formsly::forms::requests::request_router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn post_requests_returns_tracking_id() {
        let (service, _, _) = build_service();
        let router = request_router(Arc::new(service));

        let payload = json!({ "form": completed_ticket() });
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/requests")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&payload).expect("serialize")))
            .expect("request");

        let response = router.clone().oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(payload.get("request_id").is_some());
        assert_eq!(payload.get("status").and_then(Value::as_str), Some("PENDING"));
    }

    #[tokio::test]
    async fn get_request_returns_status_snapshot() {
        let (service, _, _) = build_service();
        let router = request_router(Arc::new(service));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/requests/req-abc123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("request_id"), Some(&json!("req-abc123")));
        assert_eq!(payload.get("summary"), Some(&json!("pending review")));
    }
}
