//! Render data for the presentation layer
//!
//! Everything a UI needs to draw the active step, derived from the catalog and
//! the current wizard state. Nothing here mutates state.

use crate::catalog::{BodyArea, Symptom, QUICK_PICKS};
use crate::compose::NOT_PROVIDED;
use crate::selection::{PersonalField, PersonalInfo, Selections};
use crate::state_machine::{can_advance, can_retreat, can_submit, Flow, Phase, Step, WizardState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaOption {
    pub area: BodyArea,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Symptoms offered for one selected area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomGroup {
    pub area: BodyArea,
    pub options: Vec<SymptomOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub label: &'static str,
    pub value: String,
}

/// Summary shown on the review step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub areas: Vec<BodyArea>,
    pub symptoms: Vec<String>,
    pub personal: Vec<ReviewLine>,
    /// Omitted when the user left it empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Everything needed to render the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub flow: Flow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    pub step_number: usize,
    pub step_count: usize,
    pub title: &'static str,
    pub completed: bool,
    /// One entry per step; filled up to and including the current one
    pub progress: Vec<bool>,
    pub areas: Vec<AreaOption>,
    pub symptom_groups: Vec<SymptomGroup>,
    pub personal_info: PersonalInfo,
    pub additional_info: String,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_picks: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepView {
    pub fn from_state(state: &WizardState) -> Self {
        let selections = &state.selections;
        let step = state.current_step();
        let step_number = state.step_number();
        let step_count = state.flow.step_count();

        let (completed, message) = match &state.phase {
            Phase::Completed { message } => (true, Some(message.clone())),
            Phase::Active { .. } => (false, None),
        };

        Self {
            flow: state.flow,
            step,
            step_number,
            step_count,
            title: step.map_or("Submitted", Step::title),
            completed,
            progress: (0..step_count).map(|index| index < step_number).collect(),
            areas: BodyArea::ALL
                .into_iter()
                .map(|area| AreaOption {
                    area,
                    selected: selections.is_area_selected(area),
                })
                .collect(),
            symptom_groups: symptom_groups(selections),
            personal_info: selections.personal().clone(),
            additional_info: selections.additional_info().to_string(),
            can_advance: can_advance(state),
            can_retreat: can_retreat(state),
            can_submit: can_submit(state),
            review: (step == Some(Step::Review)).then(|| review(selections)),
            quick_picks: if state.flow == Flow::QuickPick && !completed {
                QUICK_PICKS.to_vec()
            } else {
                Vec::new()
            },
            message,
        }
    }
}

/// Catalog symptoms for each selected area, in catalog order
pub fn symptom_groups(selections: &Selections) -> Vec<SymptomGroup> {
    selections
        .areas()
        .map(|area| SymptomGroup {
            area,
            options: area
                .symptoms()
                .iter()
                .copied()
                .map(|label| SymptomOption {
                    label,
                    selected: Symptom::new(area, label)
                        .is_ok_and(|symptom| selections.is_symptom_selected(&symptom)),
                })
                .collect(),
        })
        .collect()
}

fn review(selections: &Selections) -> ReviewView {
    ReviewView {
        areas: selections.areas().collect(),
        symptoms: selections.symptoms().map(|s| s.qualified_name()).collect(),
        personal: selections
            .personal()
            .entries()
            .map(|(field, value)| ReviewLine {
                label: review_label(field),
                value: value.unwrap_or(NOT_PROVIDED).to_string(),
            })
            .collect(),
        additional_info: Some(selections.additional_info())
            .filter(|text| !text.is_empty())
            .map(str::to_string),
    }
}

fn review_label(field: PersonalField) -> &'static str {
    match field {
        PersonalField::LastPeriod => "Last period",
        other => other.label(),
    }
}
