use serde::{Deserialize, Serialize};

use super::domain::{FieldId, ResponseEntry, SectionInstance};

/// One required field left without an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    pub field_id: FieldId,
    pub label: String,
}

impl MissingField {
    /// The inline message shown next to the field, verbatim.
    pub fn message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// Binding failure carrying every offending field so callers can surface all
/// inline errors at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} required field(s) missing a response", .missing.len())]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

impl ValidationError {
    pub fn messages(&self) -> Vec<String> {
        self.missing.iter().map(MissingField::message).collect()
    }
}

/// Flatten fully-populated section instances into an ordered response tree.
///
/// Output order is section instance order (section order, then duplicate
/// insertion order, by construction of the expansion), then field `order`
/// within each instance. Binding the same input twice yields byte-identical
/// trees.
pub fn bind(instances: &[SectionInstance]) -> Result<Vec<ResponseEntry>, ValidationError> {
    let mut entries = Vec::new();
    let mut missing = Vec::new();

    for instance in instances {
        let mut fields: Vec<_> = instance
            .fields
            .iter()
            .filter(|field| !field.kind.is_marker())
            .collect();
        fields.sort_by_key(|field| field.order);

        for field in fields {
            match &field.response {
                Some(value) if !value.is_empty() => entries.push(ResponseEntry {
                    field_id: field.id.clone(),
                    section_id: instance.section_id.clone(),
                    duplicate_group: instance.duplicate_group.clone(),
                    value: value.clone(),
                }),
                _ if field.is_required => missing.push(MissingField {
                    field_id: field.id.clone(),
                    label: field.label.clone(),
                }),
                _ => {}
            }
        }
    }

    if missing.is_empty() {
        Ok(entries)
    } else {
        Err(ValidationError { missing })
    }
}
