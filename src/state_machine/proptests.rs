//! Property-based tests for the step machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::catalog::{BodyArea, Symptom};
use crate::compose::compose;
use crate::selection::{PersonalField, Selections};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_area() -> impl Strategy<Value = BodyArea> {
    proptest::sample::select(BodyArea::ALL.to_vec())
}

fn arb_symptom() -> impl Strategy<Value = Symptom> {
    arb_area().prop_flat_map(|area| {
        (0..area.symptoms().len())
            .prop_map(move |index| Symptom::new(area, area.symptoms()[index]).unwrap())
    })
}

fn arb_field() -> impl Strategy<Value = PersonalField> {
    proptest::sample::select(PersonalField::ALL.to_vec())
}

fn arb_area_name() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => arb_area().prop_map(|area| area.name().to_string()),
        1 => Just("Knee".to_string()),
    ]
}

fn arb_edit_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_area_name().prop_map(Event::toggle_area),
        arb_symptom().prop_map(|s| Event::toggle_symptom(s.area().name(), s.label())),
        (arb_field(), "[a-zA-Z0-9 /]{0,12}")
            .prop_map(|(field, value)| Event::set_personal_info(field.key(), value)),
        "[a-zA-Z ]{0,30}".prop_map(Event::set_additional_info),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        6 => arb_edit_event(),
        3 => Just(Event::Advance),
        2 => Just(Event::Retreat),
        1 => Just(Event::Submit),
        1 => Just(Event::Reset),
    ]
}

/// Drive a fresh wizard through `events`, ignoring rejected ones
fn run(events: Vec<Event>) -> WizardState {
    let mut state = WizardState::new(Flow::Wizard);
    for event in events {
        if let Ok(result) = transition(&state, event) {
            state = result.new_state;
        }
    }
    state
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn symptoms_belong_to_selected_areas(selections: &Selections) -> bool {
    selections
        .symptoms()
        .all(|symptom| selections.is_area_selected(symptom.area()))
}

fn is_valid_state(state: &WizardState) -> bool {
    let step_in_flow = match state.current_step() {
        Some(step) => state.flow.position(step).is_some(),
        None => true,
    };
    step_in_flow && symptoms_belong_to_selected_areas(&state.selections)
}

fn effects_are_valid(effects: &[Effect], new_state: &WizardState) -> bool {
    let delivers = effects
        .iter()
        .filter(|e| matches!(e, Effect::Deliver { .. }))
        .count();
    // Deliver appears exactly when the session completes
    match (&new_state.phase, delivers) {
        (Phase::Completed { message }, 1) => effects
            .iter()
            .any(|e| matches!(e, Effect::Deliver { message: m } if m == message)),
        (Phase::Active { .. }, 0) => true,
        _ => false,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: valid state and matching effects after any accepted transition
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = WizardState::new(Flow::Wizard);

        for event in events {
            match transition(&state, event) {
                Ok(result) => {
                    state = result.new_state;
                    prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
                    prop_assert!(
                        effects_are_valid(&result.effects, &state),
                        "Invalid effects for state {:?}: {:?}",
                        state,
                        result.effects
                    );
                }
                Err(_) => { /* Rejected events leave the state as it was */ }
            }
        }
    }

    // Invariant 2: deselecting an area leaves none of its symptoms behind
    #[test]
    fn prop_area_removal_cascades(
        events in proptest::collection::vec(arb_edit_event(), 0..40),
        area in arb_area(),
    ) {
        let mut state = run(events);
        if !state.selections.is_area_selected(area) {
            state = transition(&state, Event::toggle_area(area.name())).unwrap().new_state;
        }
        let result = transition(&state, Event::toggle_area(area.name())).unwrap();
        prop_assert!(!result.new_state.selections.is_area_selected(area));
        prop_assert!(result.new_state.selections.symptoms().all(|s| s.area() != area));
    }

    // Invariant 3: double toggle is the identity, for areas and symptoms
    #[test]
    fn prop_double_toggle_is_identity(
        events in proptest::collection::vec(arb_edit_event(), 0..30),
        area in arb_area(),
        symptom in arb_symptom(),
    ) {
        let state = run(events);

        let once = transition(&state, Event::toggle_area(area.name())).unwrap().new_state;
        let twice = transition(&once, Event::toggle_area(area.name())).unwrap().new_state;
        // Re-adding an area cannot restore symptoms the first toggle dropped
        if !state.selections.is_area_selected(area) {
            prop_assert_eq!(&twice, &state);
        } else {
            prop_assert_eq!(twice.selections.area_count(), state.selections.area_count());
        }

        if state.selections.is_area_selected(symptom.area()) {
            let event = Event::toggle_symptom(symptom.area().name(), symptom.label());
            let once = transition(&state, event.clone()).unwrap().new_state;
            let twice = transition(&once, event).unwrap().new_state;
            prop_assert_eq!(&twice, &state);
        }
    }

    // Invariant 4: advance is rejected unless the current step's guard holds
    #[test]
    fn prop_advance_respects_guard(events in proptest::collection::vec(arb_event(), 0..40)) {
        let state = run(events);
        if let Some(step) = state.current_step() {
            let guard = readiness(step, &state.selections);
            match transition(&state, Event::Advance) {
                Ok(result) => {
                    prop_assert!(guard.is_ok());
                    prop_assert_eq!(result.new_state.step_number(), state.step_number() + 1);
                }
                Err(_) => {
                    prop_assert!(guard.is_err() || state.flow.is_final(step));
                }
            }
        }
    }

    // Invariant 5: advance then retreat round-trips everything
    #[test]
    fn prop_retreat_undoes_advance(events in proptest::collection::vec(arb_event(), 0..40)) {
        let state = run(events);
        if let Ok(advanced) = transition(&state, Event::Advance) {
            let back = transition(&advanced.new_state, Event::Retreat).unwrap().new_state;
            prop_assert_eq!(back, state);
        }
    }

    // Invariant 6: composition depends on contents, not on how they were reached
    #[test]
    fn prop_compose_is_order_independent(
        symptoms in proptest::collection::vec(arb_symptom(), 1..8),
        age in "[0-9]{0,2}",
        notes in "[a-z ]{0,20}",
    ) {
        let build = |ordered: &[Symptom]| {
            let mut selections = Selections::new();
            for symptom in ordered {
                if !selections.is_area_selected(symptom.area()) {
                    selections.toggle_area(symptom.area());
                }
                if !selections.is_symptom_selected(symptom) {
                    selections.toggle_symptom(*symptom).unwrap();
                }
            }
            selections.set_additional_info(notes.clone());
            selections.set_personal_info(PersonalField::Age, age.clone());
            selections
        };

        let forward = build(&symptoms);
        let reversed: Vec<_> = symptoms.iter().rev().copied().collect();
        let backward = build(&reversed);

        prop_assert_eq!(compose(&forward), compose(&backward));
    }
}

#[test]
fn test_guard_examples() {
    let empty = WizardState::new(Flow::Wizard);
    assert!(transition(&empty, Event::Advance).is_err());
    assert_eq!(empty.step_number(), 1);

    let pelvic = transition(&empty, Event::toggle_area("Pelvic"))
        .unwrap()
        .new_state;
    let advanced = transition(&pelvic, Event::Advance).unwrap().new_state;
    assert_eq!(advanced.step_number(), 2);
}
