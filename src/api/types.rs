//! API request and response types

use crate::catalog::BodyArea;
use crate::state_machine::Flow;
use crate::view::StepView;
use serde::{Deserialize, Serialize};

/// Request to start a wizard session
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub flow: Flow,
}

/// Response with a newly created session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub view: StepView,
}

/// One area and its symptom labels
#[derive(Debug, Serialize)]
pub struct CatalogArea {
    pub area: BodyArea,
    pub symptoms: &'static [&'static str],
}

/// The full static catalog
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub areas: Vec<CatalogArea>,
    pub quick_picks: &'static [&'static str],
}

/// Response for version endpoint
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
