use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FieldId, FieldResponse, ResponseEntry, Section};

/// Pass-threshold policy applied by the caller, never by the evaluator
/// itself, so different forms can use different thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub passing_score: u32,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self { passing_score: 6 }
    }
}

/// Per-field comparison against the answer key, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCheck {
    pub field_id: FieldId,
    pub label: String,
    pub matched: bool,
}

/// Evaluation output: the numeric score and the per-field trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub score: u32,
    pub eligible: u32,
    pub checks: Vec<AnswerCheck>,
}

/// Compare a bound response tree against the answer key carried by the form
/// sections.
///
/// Only fields with a `correct_response` participate; each contributes at
/// most one point even if the tree holds several entries for its id (the
/// first entry wins). Zero eligible fields yields score 0.
pub fn score(sections: &[Section], tree: &[ResponseEntry]) -> AssessmentOutcome {
    let mut first_answers: BTreeMap<&FieldId, &FieldResponse> = BTreeMap::new();
    for entry in tree {
        first_answers.entry(&entry.field_id).or_insert(&entry.value);
    }

    let mut checks = Vec::new();
    let mut total = 0u32;

    for section in sections {
        for field in &section.fields {
            let Some(expected) = &field.correct_response else {
                continue;
            };
            let matched = first_answers
                .get(&field.id)
                .map(|answer| *answer == expected)
                .unwrap_or(false);
            if matched {
                total += 1;
            }
            checks.push(AnswerCheck {
                field_id: field.id.clone(),
                label: field.label.clone(),
                matched,
            });
        }
    }

    AssessmentOutcome {
        score: total,
        eligible: checks.len() as u32,
        checks,
    }
}
