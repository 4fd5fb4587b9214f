//! Effects produced by state transitions

use super::state::Step;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the composed message to the message sink
    Deliver { message: String },

    /// The active step changed
    NotifyStepChange { from: Option<Step>, to: Step },
}

impl Effect {
    pub fn deliver(message: impl Into<String>) -> Self {
        Effect::Deliver {
            message: message.into(),
        }
    }

    pub fn step_change(from: Option<Step>, to: Step) -> Self {
        Effect::NotifyStepChange { from, to }
    }
}
