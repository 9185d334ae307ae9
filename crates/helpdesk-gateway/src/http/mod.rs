//! HTTP surface: axum router, error mapping, and JSON shaping.
//!
//! Handlers stay thin. They extract the caller and arguments, call the
//! workflow coordinator, and shape the result.

pub mod comments;
pub mod extract;
pub mod roles;
pub mod tickets;
pub mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;

use helpdesk_core::error::{ClientCode, HelpdeskError};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/tickets", post(tickets::create).get(tickets::list))
        .route("/tickets/:id", get(tickets::get).delete(tickets::delete))
        .route("/tickets/:id/assign", patch(tickets::assign))
        .route("/tickets/:id/status", patch(tickets::change_status))
        .route("/tickets/:id/history", get(tickets::history))
        .route("/tickets/:id/comments", post(comments::add).get(comments::list))
        .route(
            "/comments/:id",
            get(comments::get)
                .patch(comments::edit)
                .delete(comments::delete),
        )
        .route("/api/roles", get(roles::list))
        .route("/api/roles/:name", get(roles::get))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}

/// Handler error: a core error rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub HelpdeskError);

impl From<HelpdeskError> for ApiError {
    fn from(e: HelpdeskError) -> Self {
        ApiError(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Forbidden => StatusCode::FORBIDDEN,
        ClientCode::InvalidAssignee | ClientCode::InvalidTransition => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ClientCode::Conflict => StatusCode::CONFLICT,
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        if code == ClientCode::Internal {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status_for(code), body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
