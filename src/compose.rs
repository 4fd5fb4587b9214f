//! Outbound message composition
//!
//! Pure functions from accumulated selections to the single message handed
//! to the message sink.

use crate::selection::Selections;
use std::fmt::Write;

/// First line of every composed wizard message
pub const INTAKE_HEADER: &str = "I'm experiencing the following symptoms:";

pub(crate) const NOT_PROVIDED: &str = "Not provided";
pub(crate) const NONE_PROVIDED: &str = "None provided";

/// Compose the wizard summary message.
///
/// Symptoms appear in catalog order. Empty personal fields render as
/// "Not provided", empty additional info as "None provided".
pub fn compose(selections: &Selections) -> String {
    let symptoms = selections
        .symptoms()
        .map(|symptom| symptom.qualified_name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut message = format!("{INTAKE_HEADER}\n{symptoms}\n\nPersonal information:\n");
    for (field, value) in selections.personal().entries() {
        // Writing to a String cannot fail
        let _ = writeln!(
            message,
            "- {}: {}",
            field.label(),
            value.unwrap_or(NOT_PROVIDED)
        );
    }

    let additional = match selections.additional_info() {
        "" => NONE_PROVIDED,
        text => text,
    };
    let _ = write!(message, "\nAdditional information:\n{additional}");

    message.trim().to_string()
}

/// Compose the single-shot picker message
pub fn compose_quick_pick(symptom: &str) -> String {
    format!("I'm experiencing {symptom}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BodyArea, Symptom};
    use crate::selection::PersonalField;

    fn select(selections: &mut Selections, area: BodyArea, label: &str) {
        if !selections.is_area_selected(area) {
            selections.toggle_area(area);
        }
        selections
            .toggle_symptom(Symptom::new(area, label).unwrap())
            .unwrap();
    }

    #[test]
    fn test_compose_minimal_intake() {
        let mut selections = Selections::new();
        select(&mut selections, BodyArea::Pelvic, "Pain");
        selections.set_personal_info(PersonalField::Age, "34");

        let expected = "I'm experiencing the following symptoms:\n\
                        Pelvic Pain\n\
                        \n\
                        Personal information:\n\
                        - Age: 34\n\
                        - Height: Not provided\n\
                        - Weight: Not provided\n\
                        - Last period date: Not provided\n\
                        \n\
                        Additional information:\n\
                        None provided";
        assert_eq!(compose(&selections), expected);
    }

    #[test]
    fn test_compose_full_intake() {
        let mut selections = Selections::new();
        select(&mut selections, BodyArea::General, "Fatigue");
        select(&mut selections, BodyArea::Vaginal, "Itching");
        select(&mut selections, BodyArea::Vaginal, "Discharge");
        selections.set_personal_info(PersonalField::Age, "29");
        selections.set_personal_info(PersonalField::Height, "165 cm");
        selections.set_personal_info(PersonalField::Weight, "58 kg");
        selections.set_personal_info(PersonalField::LastPeriod, "02/10/2026");
        selections.set_additional_info("Started after a course of antibiotics.");

        let message = compose(&selections);
        let lines: Vec<_> = message.lines().collect();
        assert_eq!(lines[0], INTAKE_HEADER);
        // Catalog order, not selection order
        assert_eq!(lines[1], "Vaginal Discharge, Vaginal Itching, General Fatigue");
        assert_eq!(lines[4], "- Age: 29");
        assert_eq!(lines[5], "- Height: 165 cm");
        assert_eq!(lines[6], "- Weight: 58 kg");
        assert_eq!(lines[7], "- Last period date: 02/10/2026");
        assert_eq!(lines[10], "Started after a course of antibiotics.");
    }

    #[test]
    fn test_empty_field_renders_like_missing_field() {
        let mut explicit_empty = Selections::new();
        select(&mut explicit_empty, BodyArea::Breast, "Lumps");
        explicit_empty.set_personal_info(PersonalField::Height, "");
        explicit_empty.set_additional_info("");

        let mut untouched = Selections::new();
        select(&mut untouched, BodyArea::Breast, "Lumps");

        assert_eq!(compose(&explicit_empty), compose(&untouched));
    }

    #[test]
    fn test_compose_trims_trailing_whitespace() {
        let mut selections = Selections::new();
        select(&mut selections, BodyArea::Urinary, "Urgency");
        selections.set_additional_info("worse at night\n\n  ");
        assert!(compose(&selections).ends_with("worse at night"));
    }

    #[test]
    fn test_compose_quick_pick() {
        assert_eq!(
            compose_quick_pick("Pelvic pain"),
            "I'm experiencing Pelvic pain"
        );
    }
}
