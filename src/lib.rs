//! Intake Wizard - guided symptom intake
//!
//! A pure wizard state machine that collects body areas, symptoms and
//! personal details, composes them into a single plain-text message and
//! hands it to a message sink. The `api` module hosts sessions over HTTP.

// Library surface: every fallible op returns a documented error enum
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod delivery;
pub mod error;
pub mod intake;
pub mod selection;
pub mod session;
pub mod sessions;
pub mod sink;
pub mod state_machine;
pub mod view;

pub use catalog::{BodyArea, Symptom};
pub use error::{InvalidArgument, WizardError};
pub use selection::{PersonalField, PersonalInfo, Selections};
pub use session::WizardSession;
pub use sink::{DeliveryError, MessageSink};
pub use state_machine::{Effect, Event, Flow, Phase, Step, WizardState};
pub use view::StepView;
