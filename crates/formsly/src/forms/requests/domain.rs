use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a single form field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub String);

/// Identifier wrapper for a form section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

/// Identifier wrapper for a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub String);

/// Identifier wrapper for a submitted request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Identifier linking all instances of one duplicated section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuplicateGroupId(pub String);

/// Identifier wrapper for a signer in an approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerId(pub String);

/// Closed set of field kinds the engine knows how to render and bind.
///
/// `SectionBreak` and `RepeatableSectionBreak` are layout markers: they never
/// carry a response and never participate in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    DateRange,
    Time,
    Email,
    Select,
    MultiSelect,
    Slider,
    SectionBreak,
    RepeatableSectionBreak,
}

impl FieldKind {
    pub const fn is_marker(self) -> bool {
        matches!(self, FieldKind::SectionBreak | FieldKind::RepeatableSectionBreak)
    }
}

/// Typed response value for a field, serialized losslessly so that a stored
/// entry deserializes back to the exact value that was bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldResponse {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateRange { start: NaiveDate, end: NaiveDate },
    Time(NaiveTime),
    Selection(String),
    Selections(Vec<String>),
    Slider(i64),
}

impl FieldResponse {
    /// Whether the value counts as "no answer" for required-field validation.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldResponse::Text(value) | FieldResponse::Selection(value) => value.is_empty(),
            FieldResponse::Selections(values) => values.is_empty(),
            _ => false,
        }
    }
}

/// A single form field, carrying its current response when one has been set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    pub is_required: bool,
    pub is_read_only: bool,
    /// Unique within the section; the only significant ordering.
    pub order: u32,
    /// Selectable values; meaningful only for select and multi-select kinds.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<FieldResponse>,
    /// Answer key entry; present only on assessment-style fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_response: Option<FieldResponse>,
}

/// An ordered group of fields; duplicatable sections may repeat at submission
/// time, once per duplicate group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub is_duplicatable: bool,
    pub fields: Vec<Field>,
}

/// One rendered occurrence of a section after duplication expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInstance {
    pub section_id: SectionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_group: Option<DuplicateGroupId>,
    pub fields: Vec<Field>,
}

impl SectionInstance {
    pub fn base(section: &Section) -> Self {
        Self {
            section_id: section.id.clone(),
            name: section.name.clone(),
            duplicate_group: None,
            fields: section.fields.clone(),
        }
    }
}

/// Action a signer takes on a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerAction {
    Approve,
    Note,
}

impl SignerAction {
    pub const fn label(self) -> &'static str {
        match self {
            SignerAction::Approve => "Approved",
            SignerAction::Note => "Noted",
        }
    }
}

/// One party in the signer/approver chain attached to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub signer_id: SignerId,
    pub action: SignerAction,
    pub is_primary: bool,
    pub order: u32,
}

/// A form definition as produced by the authoring flow. Fetched read-only by
/// the engine; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub name: String,
    pub description: String,
    pub sections: Vec<Section>,
    pub signers: Vec<Signer>,
    /// Built-in Formsly system form vs. user-authored form.
    pub is_formsly_form: bool,
}

impl Form {
    pub fn primary_signer(&self) -> Option<&Signer> {
        self.signers.iter().find(|signer| signer.is_primary)
    }
}

/// One flattened entry of a bound response tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub field_id: FieldId,
    pub section_id: SectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_group: Option<DuplicateGroupId>,
    pub value: FieldResponse,
}

/// Prior-submission record of one duplicated section instance. Treated as
/// untrusted input: a record pointing at an unknown section is skipped, not
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub duplicate_group: DuplicateGroupId,
    pub section_id: SectionId,
    #[serde(default)]
    pub responses: BTreeMap<FieldId, FieldResponse>,
}

/// High level status tracked throughout the request approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Canceled => "CANCELED",
        }
    }
}
