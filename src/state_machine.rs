//! Intake step machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! session feeds events in and executes the effects that come back.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Flow, Phase, Step, WizardState};
pub use transition::{
    can_advance, can_retreat, can_submit, readiness, transition, IllegalTransition,
    TransitionError, TransitionResult,
};
