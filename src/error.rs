//! Error types shared across the wizard

use crate::catalog::BodyArea;
use crate::sink::DeliveryError;
use crate::state_machine::TransitionError;
use thiserror::Error;

/// Caller passed a value outside the catalog or the fixed field set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("unknown body area: {0:?}")]
    UnknownArea(String),
    #[error("unknown symptom {label:?} for the {area} area")]
    UnknownSymptom { area: BodyArea, label: String },
    #[error("unknown personal info field: {0:?}")]
    UnknownField(String),
    #[error("unknown quick-pick symptom: {0:?}")]
    UnknownQuickPick(String),
    #[error("the {0} area is not selected")]
    AreaNotSelected(BodyArea),
}

/// Errors surfaced by a wizard session
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The sink rejected the composed message; the session is still at review
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl WizardError {
    /// Whether retrying the same event may succeed without user changes
    pub fn is_retryable(&self) -> bool {
        matches!(self, WizardError::Delivery(_))
    }
}
