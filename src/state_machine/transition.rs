//! Pure state transition function
//!
//! Given the same state and event this always produces the same result. Nothing
//! here talks to the message sink; delivery is requested through effects.

use super::{Effect, Event, Flow, Phase, Step, WizardState};
use crate::catalog::{self, BodyArea, Symptom};
use crate::compose::{compose, compose_quick_pick};
use crate::error::InvalidArgument;
use crate::selection::{PersonalField, Selections};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: WizardState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: WizardState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A navigation request the current state does not allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalTransition {
    #[error("cannot leave {step}: {requirement}")]
    NotReady {
        step: Step,
        requirement: &'static str,
    },
    #[error("{step} is the final step, submit instead")]
    AtFinalStep { step: Step },
    #[error("{step} is the first step")]
    AtFirstStep { step: Step },
    #[error("submit is only available on the final step (currently on {step})")]
    NotAtFinalStep { step: Step },
    #[error("session already completed")]
    SessionCompleted,
    #[error("{event} is not available in the {flow} flow")]
    UnavailableInFlow { event: &'static str, flow: Flow },
}

/// Errors that can occur during transition. The state is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("illegal transition: {0}")]
    IllegalTransition(#[from] IllegalTransition),
}

/// Readiness guard for leaving `step` forward
pub fn readiness(step: Step, selections: &Selections) -> Result<(), IllegalTransition> {
    match step {
        Step::AreaSelection if selections.area_count() == 0 => Err(IllegalTransition::NotReady {
            step,
            requirement: "select at least one body area",
        }),
        Step::SymptomSelection if selections.symptom_count() == 0 => {
            Err(IllegalTransition::NotReady {
                step,
                requirement: "select at least one symptom",
            })
        }
        _ => Ok(()),
    }
}

/// Whether `Event::Advance` would succeed
pub fn can_advance(state: &WizardState) -> bool {
    state.current_step().is_some_and(|step| {
        state.flow.next(step).is_some() && readiness(step, &state.selections).is_ok()
    })
}

/// Whether `Event::Retreat` would succeed
pub fn can_retreat(state: &WizardState) -> bool {
    state
        .current_step()
        .is_some_and(|step| state.flow.previous(step).is_some())
}

/// Whether `Event::Submit` would succeed
pub fn can_submit(state: &WizardState) -> bool {
    state.flow == Flow::Wizard
        && state.current_step().is_some_and(|step| {
            state.flow.is_final(step) && flow_ready(state.flow, &state.selections).is_ok()
        })
}

/// Every guard before the final step must still hold at submission; edits are
/// accepted on any step, so an earlier guard can have been undone since.
fn flow_ready(flow: Flow, selections: &Selections) -> Result<(), IllegalTransition> {
    flow.steps()
        .iter()
        .try_for_each(|step| readiness(*step, selections))
}

/// Pure transition function
pub fn transition(state: &WizardState, event: Event) -> Result<TransitionResult, TransitionError> {
    let step = match (&state.phase, &event) {
        // Reset is available from any phase
        (_, Event::Reset) => {
            let fresh = WizardState::new(state.flow);
            let to = state.flow.first_step();
            return Ok(TransitionResult::new(fresh)
                .with_effect(Effect::step_change(state.current_step(), to)));
        }
        (Phase::Completed { .. }, _) => return Err(IllegalTransition::SessionCompleted.into()),
        (Phase::Active { step }, _) => *step,
    };

    match (state.flow, event) {
        // ============================================================
        // Selection edits (wizard only, any step)
        // ============================================================
        (Flow::Wizard, Event::ToggleArea { area }) => {
            let area: BodyArea = area.parse()?;
            let mut next = state.clone();
            next.selections.toggle_area(area);
            Ok(TransitionResult::new(next))
        }

        (Flow::Wizard, Event::ToggleSymptom { area, label }) => {
            let symptom = Symptom::parse(&area, &label)?;
            let mut next = state.clone();
            next.selections.toggle_symptom(symptom)?;
            Ok(TransitionResult::new(next))
        }

        (Flow::Wizard, Event::SetPersonalInfo { field, value }) => {
            let field: PersonalField = field.parse()?;
            let mut next = state.clone();
            next.selections.set_personal_info(field, value);
            Ok(TransitionResult::new(next))
        }

        (Flow::Wizard, Event::SetAdditionalInfo { text }) => {
            let mut next = state.clone();
            next.selections.set_additional_info(text);
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Navigation
        // ============================================================
        (flow, Event::Advance) => {
            let Some(to) = flow.next(step) else {
                return Err(IllegalTransition::AtFinalStep { step }.into());
            };
            readiness(step, &state.selections)?;
            Ok(TransitionResult::new(with_phase(state, Phase::Active { step: to }))
                .with_effect(Effect::step_change(Some(step), to)))
        }

        // Retreat never discards selections
        (flow, Event::Retreat) => {
            let Some(to) = flow.previous(step) else {
                return Err(IllegalTransition::AtFirstStep { step }.into());
            };
            Ok(TransitionResult::new(with_phase(state, Phase::Active { step: to }))
                .with_effect(Effect::step_change(Some(step), to)))
        }

        // ============================================================
        // Submission
        // ============================================================
        (Flow::Wizard, Event::Submit) => {
            if !Flow::Wizard.is_final(step) {
                return Err(IllegalTransition::NotAtFinalStep { step }.into());
            }
            flow_ready(Flow::Wizard, &state.selections)?;
            let message = compose(&state.selections);
            Ok(TransitionResult::new(with_phase(
                state,
                Phase::Completed {
                    message: message.clone(),
                },
            ))
            .with_effect(Effect::deliver(message)))
        }

        (Flow::QuickPick, Event::PickSymptom { symptom }) => {
            let label = catalog::quick_pick(&symptom)?;
            let message = compose_quick_pick(label);
            Ok(TransitionResult::new(with_phase(
                state,
                Phase::Completed {
                    message: message.clone(),
                },
            ))
            .with_effect(Effect::deliver(message)))
        }

        // ============================================================
        // Events belonging to the other flow
        // ============================================================
        (flow, event) => Err(IllegalTransition::UnavailableInFlow {
            event: event.kind(),
            flow,
        }
        .into()),
    }
}

fn with_phase(state: &WizardState, phase: Phase) -> WizardState {
    WizardState {
        flow: state.flow,
        phase,
        selections: state.selections.clone(),
    }
}
