//! HTTP request handlers

use super::types::{
    CatalogArea, CatalogResponse, CreateSessionRequest, ErrorResponse, SessionResponse,
    VersionResponse,
};
use super::AppState;
use crate::catalog::{BodyArea, QUICK_PICKS};
use crate::error::WizardError;
use crate::sessions::SessionError;
use crate::state_machine::{Event, TransitionError};
use crate::view::StepView;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Static reference data
        .route("/api/catalog", get(get_catalog))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/:id",
            get(get_session).delete(discard_session),
        )
        // User interactions
        .route("/api/sessions/:id/events", post(send_event))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Catalog
// ============================================================

async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        areas: BodyArea::ALL
            .into_iter()
            .map(|area| CatalogArea {
                area,
                symptoms: area.symptoms(),
            })
            .collect(),
        quick_picks: QUICK_PICKS,
    })
}

// ============================================================
// Sessions
// ============================================================

/// The body is optional; a bare POST starts a wizard-flow session
async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateSessionRequest::default(),
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };

    let (session_id, view) = state.sessions.create(req.flow).await;
    Ok(Json(SessionResponse { session_id, view }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StepView>, AppError> {
    Ok(Json(state.sessions.view(&id).await?))
}

async fn send_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<Event>,
) -> Result<Json<StepView>, AppError> {
    Ok(Json(state.sessions.handle(&id, event).await?))
}

async fn discard_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions.discard(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::NotFound(_) => AppError::NotFound(message),
            SessionError::Wizard(WizardError::Delivery(_)) => AppError::BadGateway(message),
            SessionError::Wizard(WizardError::Transition(err)) => match err {
                TransitionError::InvalidArgument(_) => AppError::BadRequest(message),
                TransitionError::IllegalTransition(_) => AppError::Conflict(message),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
