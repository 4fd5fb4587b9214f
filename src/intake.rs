//! Downstream parsing of composed intake messages
//!
//! Consumers of the sink receive plain text. These helpers recognise a wizard
//! summary and pull the structured fields back out of it.
//!
//! Personal values are read by position: each runs up to the line of the
//! field that follows it, so free text cannot stand in for a later field.
//! The text format still loses a few distinctions:
//!
//! - a value typed as exactly "Not provided" (or "None provided" for the
//!   additional information) reads back as `None`
//! - a value that itself contains the line following it (for example
//!   `"\n- Height: "` inside the age) is cut there
//! - trailing whitespace of the additional information is trimmed away by
//!   the composer

use crate::compose::{INTAKE_HEADER, NONE_PROVIDED, NOT_PROVIDED};
use crate::selection::PersonalField;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SYMPTOMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)I'm experiencing the following symptoms:\s*(.+?)(?:\n\n|$)")
        .expect("symptoms pattern is valid")
});

const PERSONAL_HEADING: &str = "\n\nPersonal information:\n";
const ADDITIONAL_HEADING: &str = "\n\nAdditional information:\n";

/// Structured view of a composed wizard message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeSummary {
    pub symptoms: Vec<String>,
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub last_period: Option<String>,
    pub additional_info: Option<String>,
}

impl IntakeSummary {
    pub fn personal(&self, field: PersonalField) -> Option<&str> {
        let value = match field {
            PersonalField::Age => &self.age,
            PersonalField::Height => &self.height,
            PersonalField::Weight => &self.weight,
            PersonalField::LastPeriod => &self.last_period,
        };
        value.as_deref()
    }

    fn set_personal(&mut self, field: PersonalField, value: Option<String>) {
        let slot = match field {
            PersonalField::Age => &mut self.age,
            PersonalField::Height => &mut self.height,
            PersonalField::Weight => &mut self.weight,
            PersonalField::LastPeriod => &mut self.last_period,
        };
        *slot = value;
    }
}

/// Whether `message` was produced by the wizard composer
pub fn is_intake_message(message: &str) -> bool {
    message.contains(INTAKE_HEADER)
}

/// Parse a composed wizard message. Returns `None` for any other text.
pub fn parse(message: &str) -> Option<IntakeSummary> {
    if !is_intake_message(message) {
        return None;
    }

    let mut summary = IntakeSummary::default();

    if let Some(captures) = SYMPTOMS.captures(message) {
        summary.symptoms = captures[1]
            .split(',')
            .map(str::trim)
            .filter(|symptom| !symptom.is_empty())
            .map(str::to_string)
            .collect();
    }

    let additional = match message.split_once(PERSONAL_HEADING) {
        Some((_, block)) => read_personal(block, &mut summary),
        None => message
            .split_once(ADDITIONAL_HEADING)
            .map(|(_, additional)| additional),
    };
    summary.additional_info = additional.and_then(|text| provided(text, NONE_PROVIDED));

    Some(summary)
}

fn line_prefix(field: PersonalField) -> String {
    format!("- {}: ", field.label())
}

/// Fill the personal fields from the block after the personal heading, in
/// `PersonalField::ALL` order. Returns the additional information text.
fn read_personal<'a>(block: &'a str, summary: &mut IntakeSummary) -> Option<&'a str> {
    let mut rest = block.strip_prefix(line_prefix(PersonalField::Age).as_str())?;
    let mut fields = PersonalField::ALL.into_iter().peekable();

    while let Some(field) = fields.next() {
        let delimiter = match fields.peek() {
            Some(next) => format!("\n{}", line_prefix(*next)),
            None => ADDITIONAL_HEADING.to_string(),
        };
        let Some((value, remainder)) = rest.split_once(delimiter.as_str()) else {
            // Truncated message: the rest belongs to this field
            summary.set_personal(field, provided(rest, NOT_PROVIDED));
            return None;
        };
        summary.set_personal(field, provided(value, NOT_PROVIDED));
        rest = remainder;
    }

    Some(rest)
}

/// Values are kept verbatim; only the exact placeholder maps to `None`
fn provided(raw: &str, placeholder: &str) -> Option<String> {
    match raw {
        "" => None,
        value if value == placeholder => None,
        value => Some(value.to_string()),
    }
}
