//! Events that can occur in a wizard session

use serde::{Deserialize, Serialize};

/// User interactions forwarded by the presentation layer.
///
/// Names arrive as raw strings and are checked against the catalog during
/// the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    // Selection events
    ToggleArea {
        area: String,
    },
    ToggleSymptom {
        area: String,
        label: String,
    },
    SetPersonalInfo {
        field: String,
        value: String,
    },
    SetAdditionalInfo {
        text: String,
    },

    // Navigation events
    Advance,
    Retreat,
    Submit,

    /// Single-shot picker: select and submit in one step
    PickSymptom {
        symptom: String,
    },

    /// Discard everything and return to the first step
    Reset,
}

impl Event {
    pub fn toggle_area(area: impl Into<String>) -> Self {
        Event::ToggleArea { area: area.into() }
    }

    pub fn toggle_symptom(area: impl Into<String>, label: impl Into<String>) -> Self {
        Event::ToggleSymptom {
            area: area.into(),
            label: label.into(),
        }
    }

    pub fn set_personal_info(field: impl Into<String>, value: impl Into<String>) -> Self {
        Event::SetPersonalInfo {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn set_additional_info(text: impl Into<String>) -> Self {
        Event::SetAdditionalInfo { text: text.into() }
    }

    pub fn pick_symptom(symptom: impl Into<String>) -> Self {
        Event::PickSymptom {
            symptom: symptom.into(),
        }
    }

    /// Short name for logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ToggleArea { .. } => "toggle_area",
            Event::ToggleSymptom { .. } => "toggle_symptom",
            Event::SetPersonalInfo { .. } => "set_personal_info",
            Event::SetAdditionalInfo { .. } => "set_additional_info",
            Event::Advance => "advance",
            Event::Retreat => "retreat",
            Event::Submit => "submit",
            Event::PickSymptom { .. } => "pick_symptom",
            Event::Reset => "reset",
        }
    }

    /// Whether the event only edits selections (no step change)
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Event::ToggleArea { .. }
                | Event::ToggleSymptom { .. }
                | Event::SetPersonalInfo { .. }
                | Event::SetAdditionalInfo { .. }
        )
    }
}
