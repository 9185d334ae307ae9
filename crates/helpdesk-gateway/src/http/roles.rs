//! Read-only role catalogue. Roles are a closed set, so there is nothing to
//! create or rename.

use axum::{extract::State, Json};

use helpdesk_core::Role;

use super::extract::Id;
use super::ApiResult;
use crate::app_state::AppState;
use crate::context::Caller;

pub async fn list(State(app): State<AppState>, Caller(who): Caller) -> ApiResult<Json<Vec<Role>>> {
    Ok(Json(app.workflow().roles(&who)?.to_vec()))
}

pub async fn get(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(name): Id<String>,
) -> ApiResult<Json<Role>> {
    Ok(Json(app.workflow().role(&who, &name)?))
}
