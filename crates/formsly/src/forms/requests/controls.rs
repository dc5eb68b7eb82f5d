use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use super::domain::{Field, FieldKind, FieldResponse};

/// The typed control that renders a field. Exactly one control is active per
/// field; dispatch is a single exhaustive match over the field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    TextInput,
    TextArea,
    NumberInput,
    DatePicker,
    DateRangePicker,
    TimePicker,
    EmailInput,
    Dropdown,
    MultiSelectList,
    SliderInput,
    SectionHeader,
    RepeatableSectionHeader,
}

pub fn resolve_control(kind: FieldKind) -> ControlKind {
    match kind {
        FieldKind::Text => ControlKind::TextInput,
        FieldKind::TextArea => ControlKind::TextArea,
        FieldKind::Number => ControlKind::NumberInput,
        FieldKind::Date => ControlKind::DatePicker,
        FieldKind::DateRange => ControlKind::DateRangePicker,
        FieldKind::Time => ControlKind::TimePicker,
        FieldKind::Email => ControlKind::EmailInput,
        FieldKind::Select => ControlKind::Dropdown,
        FieldKind::MultiSelect => ControlKind::MultiSelectList,
        FieldKind::Slider => ControlKind::SliderInput,
        FieldKind::SectionBreak => ControlKind::SectionHeader,
        FieldKind::RepeatableSectionBreak => ControlKind::RepeatableSectionHeader,
    }
}

/// Outcome of coercing a raw UI value onto a field's declared kind.
///
/// A `Rejected` value is treated as empty by callers; the field-level
/// required-message surfaces instead of a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    Value(FieldResponse),
    Empty,
    Rejected { reason: String },
}

/// Map a raw user interaction onto the stored typed response for a field.
/// Pure with respect to its inputs; no network or storage effects.
pub fn coerce_response(field: &Field, raw: &Value) -> Coercion {
    if raw.is_null() {
        return Coercion::Empty;
    }

    match field.kind {
        FieldKind::Text | FieldKind::TextArea => match raw.as_str() {
            Some("") => Coercion::Empty,
            Some(text) => Coercion::Value(FieldResponse::Text(text.to_string())),
            None => rejected("expected a text value"),
        },
        FieldKind::Email => match raw.as_str() {
            Some("") => Coercion::Empty,
            Some(text) if text.contains('@') => {
                Coercion::Value(FieldResponse::Text(text.to_string()))
            }
            Some(text) => rejected(&format!("'{text}' is not a valid email address")),
            None => rejected("expected a text value"),
        },
        FieldKind::Number => match raw {
            Value::Number(number) => match number.as_f64() {
                Some(value) => Coercion::Value(FieldResponse::Number(value)),
                None => rejected("numeric value out of range"),
            },
            Value::String(text) if text.trim().is_empty() => Coercion::Empty,
            Value::String(text) => match text.trim().parse::<f64>() {
                Ok(value) => Coercion::Value(FieldResponse::Number(value)),
                Err(_) => rejected(&format!("'{text}' is not numeric")),
            },
            _ => rejected("expected a numeric value"),
        },
        FieldKind::Date => match raw.as_str() {
            Some("") => Coercion::Empty,
            Some(text) => match parse_date(text) {
                Some(date) => Coercion::Value(FieldResponse::Date(date)),
                None => rejected(&format!("'{text}' is not an ISO 8601 date")),
            },
            None => rejected("expected an ISO 8601 date string"),
        },
        FieldKind::DateRange => {
            let (start, end) = match (raw.get("start"), raw.get("end")) {
                (Some(Value::String(start)), Some(Value::String(end))) => (start, end),
                _ => return rejected("expected an object with 'start' and 'end' dates"),
            };
            match (parse_date(start), parse_date(end)) {
                (Some(start), Some(end)) if start <= end => {
                    Coercion::Value(FieldResponse::DateRange { start, end })
                }
                (Some(_), Some(_)) => rejected("range end precedes range start"),
                _ => rejected("range bounds are not ISO 8601 dates"),
            }
        }
        FieldKind::Time => match raw.as_str() {
            Some("") => Coercion::Empty,
            Some(text) => match parse_time(text) {
                Some(time) => Coercion::Value(FieldResponse::Time(time)),
                None => rejected(&format!("'{text}' is not a valid time")),
            },
            None => rejected("expected a time string"),
        },
        FieldKind::Select => match raw.as_str() {
            Some("") => Coercion::Empty,
            Some(choice) if field.options.iter().any(|option| option == choice) => {
                Coercion::Value(FieldResponse::Selection(choice.to_string()))
            }
            Some(choice) => rejected(&format!("'{choice}' is not among the configured options")),
            None => rejected("expected an option value"),
        },
        FieldKind::MultiSelect => match raw.as_array() {
            Some(values) if values.is_empty() => Coercion::Empty,
            Some(values) => {
                let mut choices = Vec::with_capacity(values.len());
                for value in values {
                    match value.as_str() {
                        Some(choice) if field.options.iter().any(|option| option == choice) => {
                            choices.push(choice.to_string());
                        }
                        Some(choice) => {
                            return rejected(&format!(
                                "'{choice}' is not among the configured options"
                            ));
                        }
                        None => return rejected("expected a list of option values"),
                    }
                }
                Coercion::Value(FieldResponse::Selections(choices))
            }
            None => rejected("expected a list of option values"),
        },
        FieldKind::Slider => match raw.as_i64() {
            Some(value) => Coercion::Value(FieldResponse::Slider(value)),
            None => rejected("expected an integer slider position"),
        },
        // Markers never carry a response.
        FieldKind::SectionBreak | FieldKind::RepeatableSectionBreak => Coercion::Empty,
    }
}

fn rejected(reason: &str) -> Coercion {
    Coercion::Rejected {
        reason: reason.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}
