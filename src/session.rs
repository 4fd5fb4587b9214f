//! Wizard session runner
//!
//! Owns one `WizardState`, feeds events through the pure transition function
//! and executes the resulting effects against the message sink.

use crate::error::WizardError;
use crate::sink::MessageSink;
use crate::state_machine::{transition, Effect, Event, Flow, WizardState};
use crate::view::StepView;

/// One user's intake session
pub struct WizardSession<S: MessageSink> {
    id: String,
    state: WizardState,
    sink: S,
}

impl<S: MessageSink> WizardSession<S> {
    pub fn new(flow: Flow, sink: S) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), flow, sink)
    }

    pub fn with_id(id: impl Into<String>, flow: Flow, sink: S) -> Self {
        Self {
            id: id.into(),
            state: WizardState::new(flow),
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn view(&self) -> StepView {
        StepView::from_state(&self.state)
    }

    /// Apply one event.
    ///
    /// On error the state is unchanged. A failed delivery leaves the session on
    /// its final step so the submission can be retried.
    pub fn handle(&mut self, event: Event) -> Result<(), WizardError> {
        let kind = event.kind();
        let result = transition(&self.state, event).inspect_err(|e| {
            tracing::debug!(session_id = %self.id, event = kind, error = %e, "Event rejected");
        })?;

        for effect in &result.effects {
            self.execute_effect(effect)?;
        }

        self.state = result.new_state;
        Ok(())
    }

    fn execute_effect(&self, effect: &Effect) -> Result<(), WizardError> {
        match effect {
            Effect::Deliver { message } => {
                self.sink.deliver(message).inspect_err(|e| {
                    tracing::warn!(session_id = %self.id, error = %e, "Delivery failed");
                })?;
                tracing::info!(
                    session_id = %self.id,
                    flow = %self.state.flow,
                    bytes = message.len(),
                    "Intake message delivered"
                );
            }
            Effect::NotifyStepChange { from, to } => {
                tracing::debug!(
                    session_id = %self.id,
                    from = ?from,
                    to = %to,
                    "Step changed"
                );
            }
        }
        Ok(())
    }

    pub fn toggle_area(&mut self, area: &str) -> Result<(), WizardError> {
        self.handle(Event::toggle_area(area))
    }

    pub fn toggle_symptom(&mut self, area: &str, label: &str) -> Result<(), WizardError> {
        self.handle(Event::toggle_symptom(area, label))
    }

    pub fn set_personal_info(&mut self, field: &str, value: &str) -> Result<(), WizardError> {
        self.handle(Event::set_personal_info(field, value))
    }

    pub fn set_additional_info(&mut self, text: &str) -> Result<(), WizardError> {
        self.handle(Event::set_additional_info(text))
    }

    pub fn advance(&mut self) -> Result<(), WizardError> {
        self.handle(Event::Advance)
    }

    pub fn retreat(&mut self) -> Result<(), WizardError> {
        self.handle(Event::Retreat)
    }

    pub fn submit(&mut self) -> Result<(), WizardError> {
        self.handle(Event::Submit)
    }

    pub fn pick_symptom(&mut self, symptom: &str) -> Result<(), WizardError> {
        self.handle(Event::pick_symptom(symptom))
    }

    /// Discard all input and return to the first step
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.handle(Event::Reset)
    }
}
