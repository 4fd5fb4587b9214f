//! Wizard state types

use crate::selection::Selections;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Steps and Flows
// ============================================================================

/// A screen of the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AreaSelection,
    SymptomSelection,
    PersonalInfo,
    Review,
    /// The single screen of the single-shot picker
    QuickPick,
}

impl Step {
    pub fn title(self) -> &'static str {
        match self {
            Step::AreaSelection => {
                "Step 1: Select the body areas where you're experiencing symptoms"
            }
            Step::SymptomSelection => "Step 2: Select specific symptoms you're experiencing",
            Step::PersonalInfo => "Step 3: Personal Information",
            Step::Review => "Review Your Information",
            Step::QuickPick => "Select a symptom you're experiencing",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::AreaSelection => "area selection",
            Step::SymptomSelection => "symptom selection",
            Step::PersonalInfo => "personal info",
            Step::Review => "review",
            Step::QuickPick => "quick pick",
        };
        f.write_str(name)
    }
}

/// Which step sequence a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Four-step wizard that accumulates selections before submitting
    #[default]
    Wizard,
    /// One step; picking a symptom submits immediately
    QuickPick,
}

impl Flow {
    /// Steps in order; the last one is where submission happens
    pub fn steps(self) -> &'static [Step] {
        match self {
            Flow::Wizard => &[
                Step::AreaSelection,
                Step::SymptomSelection,
                Step::PersonalInfo,
                Step::Review,
            ],
            Flow::QuickPick => &[Step::QuickPick],
        }
    }

    pub fn step_count(self) -> usize {
        self.steps().len()
    }

    pub fn first_step(self) -> Step {
        self.steps()[0]
    }

    /// 1-based position of `step` in this flow
    pub fn position(self, step: Step) -> Option<usize> {
        self.steps()
            .iter()
            .position(|candidate| *candidate == step)
            .map(|index| index + 1)
    }

    pub fn next(self, step: Step) -> Option<Step> {
        let position = self.position(step)?;
        self.steps().get(position).copied()
    }

    pub fn previous(self, step: Step) -> Option<Step> {
        let position = self.position(step)?;
        position
            .checked_sub(2)
            .and_then(|index| self.steps().get(index).copied())
    }

    pub fn is_final(self, step: Step) -> bool {
        self.steps().last() == Some(&step)
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Wizard => f.write_str("wizard"),
            Flow::QuickPick => f.write_str("quick pick"),
        }
    }
}

// ============================================================================
// Wizard State
// ============================================================================

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    /// Collecting input on a step
    Active { step: Step },

    /// Message composed and handed to the sink; no further transitions
    Completed { message: String },
}

/// Complete state of one wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub flow: Flow,
    pub phase: Phase,
    pub selections: Selections,
}

impl WizardState {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            phase: Phase::Active {
                step: flow.first_step(),
            },
            selections: Selections::new(),
        }
    }

    /// Active step, or `None` once completed
    pub fn current_step(&self) -> Option<Step> {
        match self.phase {
            Phase::Active { step } => Some(step),
            Phase::Completed { .. } => None,
        }
    }

    /// 1-based step number; a completed session reports the step count
    pub fn step_number(&self) -> usize {
        self.current_step()
            .and_then(|step| self.flow.position(step))
            .unwrap_or_else(|| self.flow.step_count())
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(Flow::default())
    }
}
