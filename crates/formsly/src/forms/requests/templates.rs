//! Built-in Formsly system forms used by demos, fixtures, and the summary
//! endpoint. User-authored forms arrive through the fetch collaborator with
//! the same shape.

use super::domain::{
    Field, FieldId, FieldKind, FieldResponse, Form, FormId, Section, SectionId, Signer,
    SignerAction, SignerId,
};

pub fn general_ticket_form() -> Form {
    Form {
        id: FormId("form-general-ticket".to_string()),
        name: "General Ticket".to_string(),
        description: "Raise a general-category ticket for the operations team.".to_string(),
        sections: vec![Section {
            id: SectionId("ticket-details".to_string()),
            name: "Ticket Details".to_string(),
            is_duplicatable: false,
            fields: vec![
                required_field("ticket-title", "Title", FieldKind::Text, 1),
                required_field("ticket-description", "Description", FieldKind::TextArea, 2),
            ],
        }],
        signers: vec![Signer {
            signer_id: SignerId("ops-manager".to_string()),
            action: SignerAction::Approve,
            is_primary: true,
            order: 1,
        }],
        is_formsly_form: true,
    }
}

pub fn item_request_form() -> Form {
    Form {
        id: FormId("form-item-request".to_string()),
        name: "Item Request".to_string(),
        description: "Request one or more items for purchase.".to_string(),
        sections: vec![
            Section {
                id: SectionId("requester".to_string()),
                name: "Requester".to_string(),
                is_duplicatable: false,
                fields: vec![
                    required_field("requester-name", "Requester Name", FieldKind::Text, 1),
                    required_field("requester-email", "Requester Email", FieldKind::Email, 2),
                    required_field("needed-by", "Needed By", FieldKind::Date, 3),
                ],
            },
            Section {
                id: SectionId("line-item".to_string()),
                name: "Line Item".to_string(),
                is_duplicatable: true,
                fields: vec![
                    required_field("item-name", "General Name", FieldKind::Text, 1),
                    required_field("item-quantity", "Quantity", FieldKind::Number, 2),
                    select_field(
                        "item-unit",
                        "Unit of Measurement",
                        3,
                        &["piece", "box", "pack", "litre", "kilogram"],
                    ),
                ],
            },
        ],
        signers: vec![
            Signer {
                signer_id: SignerId("purchasing-lead".to_string()),
                action: SignerAction::Approve,
                is_primary: true,
                order: 1,
            },
            Signer {
                signer_id: SignerId("finance-reviewer".to_string()),
                action: SignerAction::Note,
                is_primary: false,
                order: 2,
            },
        ],
        is_formsly_form: true,
    }
}

pub fn technical_assessment_form() -> Form {
    let answer_key: [(&str, &str, &[&str]); 10] = [
        ("q1", "Which keyword declares an immutable binding?", &["let", "var", "const", "static"]),
        ("q2", "What does a version control branch isolate?", &["builds", "changes", "releases", "users"]),
        ("q3", "Which HTTP status indicates a validation failure?", &["200", "301", "404", "422"]),
        ("q4", "What structure backs a FIFO queue?", &["stack", "heap", "linked list", "tree"]),
        ("q5", "Which format is used for the request payloads here?", &["XML", "JSON", "CSV", "YAML"]),
        ("q6", "What does a primary key guarantee?", &["ordering", "uniqueness", "indexing", "caching"]),
        ("q7", "Which operation is idempotent?", &["POST", "PATCH", "PUT", "CONNECT"]),
        ("q8", "What does TLS provide?", &["compression", "encryption", "routing", "caching"]),
        ("q9", "Which join keeps unmatched left rows?", &["inner", "left outer", "cross", "full"]),
        ("q10", "What is the complexity of binary search?", &["O(1)", "O(log n)", "O(n)", "O(n log n)"]),
    ];
    let correct = [
        "let", "changes", "422", "linked list", "JSON", "uniqueness", "PUT", "encryption",
        "left outer", "O(log n)",
    ];

    let fields = answer_key
        .iter()
        .zip(correct.iter())
        .enumerate()
        .map(|(index, ((id, label, options), answer))| {
            let mut field = select_field(id, label, index as u32 + 1, options);
            field.correct_response = Some(FieldResponse::Selection(answer.to_string()));
            field
        })
        .collect();

    Form {
        id: FormId("form-technical-assessment".to_string()),
        name: "Technical Assessment".to_string(),
        description: "Applicant technical assessment scored against an answer key.".to_string(),
        sections: vec![Section {
            id: SectionId("assessment".to_string()),
            name: "Assessment".to_string(),
            is_duplicatable: false,
            fields,
        }],
        signers: vec![Signer {
            signer_id: SignerId("hiring-manager".to_string()),
            action: SignerAction::Approve,
            is_primary: true,
            order: 1,
        }],
        is_formsly_form: true,
    }
}

fn required_field(id: &str, label: &str, kind: FieldKind, order: u32) -> Field {
    Field {
        id: FieldId(id.to_string()),
        label: label.to_string(),
        kind,
        is_required: true,
        is_read_only: false,
        order,
        options: Vec::new(),
        response: None,
        correct_response: None,
    }
}

fn select_field(id: &str, label: &str, order: u32, options: &[&str]) -> Field {
    Field {
        id: FieldId(id.to_string()),
        label: label.to_string(),
        kind: FieldKind::Select,
        is_required: true,
        is_read_only: false,
        order,
        options: options.iter().map(|option| option.to_string()).collect(),
        response: None,
        correct_response: None,
    }
}
