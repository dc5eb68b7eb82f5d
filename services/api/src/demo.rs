use crate::infra::{
    default_assessment_config, InMemoryNotificationPublisher, InMemoryRequestRepository,
};
use clap::Args;
use formsly::error::AppError;
use formsly::forms::requests::{
    bind, coerce_response, expand, templates, Coercion, DuplicateGroupId, DuplicateRecord, Field,
    FieldResponse, Form, FormRequestService, RequestServiceError, SectionInstance,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of duplicated line items in the item-request portion
    #[arg(long, default_value_t = 2)]
    pub(crate) line_items: usize,
    /// Skip the assessment scoring portion of the demo
    #[arg(long)]
    pub(crate) skip_assessment: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FormSummaryArgs {
    /// Template name: general_ticket, item_request, or technical_assessment
    #[arg(long, default_value = "item_request")]
    pub(crate) template: String,
    /// Number of synthetic duplicate records to expand
    #[arg(long, default_value_t = 0)]
    pub(crate) line_items: usize,
}

pub(crate) fn run_form_summary(args: FormSummaryArgs) -> Result<(), AppError> {
    let FormSummaryArgs {
        template,
        line_items,
    } = args;

    let form = resolve_template(&template)?;
    let duplicates = synthetic_line_items(&form, line_items);
    let instances = expand(&form.sections, &duplicates);

    println!("{}", form_header(&form));
    render_instances(&instances);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        line_items,
        skip_assessment,
    } = args;

    let repository = Arc::new(InMemoryRequestRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let service = FormRequestService::new(
        repository,
        notifications.clone(),
        default_assessment_config(),
    );

    println!("Formsly request demo");

    // 1. An empty ticket surfaces every required-field message at once.
    let empty_ticket = templates::general_ticket_form();
    match service.submit(&empty_ticket, &[]) {
        Err(RequestServiceError::Validation(error)) => {
            println!("\nEmpty {} submission rejected:", empty_ticket.name);
            for message in error.messages() {
                println!("  - {message}");
            }
        }
        other => println!("unexpected submission result: {other:?}"),
    }

    // 2. Raw UI values coerce onto typed responses before resubmission.
    let mut ticket = templates::general_ticket_form();
    apply_raw(&mut ticket, "ticket-title", json!("Broken projector"));
    apply_raw(
        &mut ticket,
        "ticket-description",
        json!("Conference room projector no longer powers on."),
    );
    let record = service.submit(&ticket, &[])?;
    println!(
        "\nSubmitted {} as {} ({})",
        ticket.name,
        record.request_id.0,
        record.status.label()
    );

    // 3. Duplicated line items expand in creation order.
    let item_form = templates::item_request_form();
    let mut filled = item_form.clone();
    apply_raw(&mut filled, "requester-name", json!("Dana Reyes"));
    apply_raw(&mut filled, "requester-email", json!("dana.reyes@example.com"));
    apply_raw(&mut filled, "needed-by", json!("2026-09-15"));
    let duplicates = synthetic_line_items(&filled, line_items);

    let instances = expand(&filled.sections, &duplicates);
    println!("\n{} expansion ({} instances)", filled.name, instances.len());
    render_instances(&instances);

    let tree = bind(&instances).map_err(RequestServiceError::from)?;
    println!("Bound {} response entries", tree.len());

    if skip_assessment {
        return Ok(());
    }

    // 4. Assessment scoring with the caller-applied pass threshold.
    let assessment = answered_assessment(6);
    let record = service.submit(&assessment, &[])?;
    let outcome = service.assess(&record.request_id, &assessment)?;
    let stored = service.get(&record.request_id)?;
    println!(
        "\n{}: scored {}/{} -> {}",
        assessment.name,
        outcome.score,
        outcome.eligible,
        stored.status.label()
    );

    let approvals = notifications
        .events()
        .iter()
        .filter(|event| event.template == "request_approved")
        .count();
    println!("Approval notifications sent: {approvals}");

    Ok(())
}

fn form_header(form: &Form) -> String {
    format!("{}: {}", form.name, form.description)
}

fn resolve_template(name: &str) -> Result<Form, AppError> {
    match name {
        "general_ticket" => Ok(templates::general_ticket_form()),
        "item_request" => Ok(templates::item_request_form()),
        "technical_assessment" => Ok(templates::technical_assessment_form()),
        other => Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unknown template '{other}'"),
        ))),
    }
}

fn apply_raw(form: &mut Form, field_id: &str, raw: Value) {
    let field = form
        .sections
        .iter_mut()
        .flat_map(|section| section.fields.iter_mut())
        .find(|field| field.id.0 == field_id)
        .expect("template field exists");
    field.response = match coerce_response(field, &raw) {
        Coercion::Value(value) => Some(value),
        Coercion::Empty => None,
        Coercion::Rejected { reason } => {
            println!("  value for '{}' rejected: {reason}", field.label);
            None
        }
    };
}

fn synthetic_line_items(form: &Form, count: usize) -> Vec<DuplicateRecord> {
    let Some(section) = form.sections.iter().find(|section| section.is_duplicatable) else {
        return Vec::new();
    };

    (0..count)
        .map(|index| {
            let mut responses = BTreeMap::new();
            for field in &section.fields {
                let value = sample_value(field, index);
                responses.insert(field.id.clone(), value);
            }
            DuplicateRecord {
                duplicate_group: DuplicateGroupId(format!("dup-{}", index + 1)),
                section_id: section.id.clone(),
                responses,
            }
        })
        .collect()
}

fn sample_value(field: &Field, index: usize) -> FieldResponse {
    use formsly::forms::requests::FieldKind;

    match field.kind {
        FieldKind::Number => FieldResponse::Number((index + 1) as f64),
        FieldKind::Select => FieldResponse::Selection(
            field
                .options
                .get(index % field.options.len().max(1))
                .cloned()
                .unwrap_or_default(),
        ),
        _ => FieldResponse::Text(format!("{} #{}", field.label, index + 1)),
    }
}

fn answered_assessment(correct: usize) -> Form {
    let mut form = templates::technical_assessment_form();
    for (index, field) in form.sections[0].fields.iter_mut().enumerate() {
        let Some(FieldResponse::Selection(answer)) = field.correct_response.clone() else {
            continue;
        };
        let chosen = if index < correct {
            answer
        } else {
            field
                .options
                .iter()
                .find(|option| **option != answer)
                .cloned()
                .unwrap_or(answer)
        };
        field.response = Some(FieldResponse::Selection(chosen));
    }
    form
}

fn render_instances(instances: &[SectionInstance]) {
    for instance in instances {
        let suffix = instance
            .duplicate_group
            .as_ref()
            .map(|group| format!(" [{}]", group.0))
            .unwrap_or_default();
        println!("  {}{}", instance.name, suffix);
        let mut fields: Vec<_> = instance
            .fields
            .iter()
            .filter(|field| !field.kind.is_marker())
            .collect();
        fields.sort_by_key(|field| field.order);
        for field in fields {
            let rendered = field
                .response
                .as_ref()
                .map(render_value)
                .unwrap_or_else(|| "-".to_string());
            println!("    {:<20} {}", field.label, rendered);
        }
    }
}

fn render_value(value: &FieldResponse) -> String {
    match value {
        FieldResponse::Text(text) | FieldResponse::Selection(text) => text.clone(),
        FieldResponse::Number(number) => number.to_string(),
        FieldResponse::Date(date) => date.to_string(),
        FieldResponse::DateRange { start, end } => format!("{start} to {end}"),
        FieldResponse::Time(time) => time.to_string(),
        FieldResponse::Selections(values) => values.join(", "),
        FieldResponse::Slider(position) => position.to_string(),
    }
}
