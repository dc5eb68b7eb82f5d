use tracing::warn;

use super::domain::{DuplicateRecord, Section, SectionInstance};

/// Flatten base sections plus prior duplicate records into the ordered list
/// of section instances used for rendering and read-only summaries.
///
/// Non-duplicatable sections emit exactly once with their own responses.
/// Duplicatable sections emit one instance per matching record, in the
/// records' original creation order; zero matching records means zero
/// instances. Field order within an instance is never changed: summary
/// tables and PDF exports index into it positionally.
pub fn expand(sections: &[Section], duplicates: &[DuplicateRecord]) -> Vec<SectionInstance> {
    let mut matched = vec![false; duplicates.len()];
    let mut instances = Vec::new();

    for section in sections {
        if !section.is_duplicatable {
            instances.push(SectionInstance::base(section));
            continue;
        }

        for (index, record) in duplicates.iter().enumerate() {
            if record.section_id != section.id {
                continue;
            }
            matched[index] = true;

            let fields = section
                .fields
                .iter()
                .map(|field| {
                    let mut field = field.clone();
                    field.response = record.responses.get(&field.id).cloned();
                    field
                })
                .collect();

            instances.push(SectionInstance {
                section_id: section.id.clone(),
                name: section.name.clone(),
                duplicate_group: Some(record.duplicate_group.clone()),
                fields,
            });
        }
    }

    // Duplicate records come from prior submissions and are untrusted; a
    // record pointing at an unknown or non-duplicatable section must not
    // block rendering.
    for (index, record) in duplicates.iter().enumerate() {
        if !matched[index] {
            warn!(
                duplicate_group = %record.duplicate_group.0,
                section_id = %record.section_id.0,
                "skipping duplicate record with no matching duplicatable section"
            );
        }
    }

    instances
}
