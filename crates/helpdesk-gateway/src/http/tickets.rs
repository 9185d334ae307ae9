use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use helpdesk_core::{StatusLogEntry, TicketId, TicketPriority, TicketStatus, UserId};

use super::extract::{Body, Id};
use super::views::{ticket_view, TicketView};
use super::ApiResult;
use crate::app_state::AppState;
use crate::context::Caller;
use crate::workflow::CreateTicket;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTicketReq {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignReq {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusReq {
    pub status: TicketStatus,
}

pub async fn create(
    State(app): State<AppState>,
    Caller(who): Caller,
    Body(req): Body<CreateTicketReq>,
) -> ApiResult<(StatusCode, Json<TicketView>)> {
    let wf = app.workflow();
    let ticket = wf
        .create_ticket(
            &who,
            CreateTicket {
                title: req.title,
                description: req.description,
                priority: req.priority,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ticket_view(wf, ticket).await?)))
}

pub async fn list(State(app): State<AppState>, Caller(who): Caller) -> ApiResult<Json<Vec<TicketView>>> {
    let wf = app.workflow();
    let tickets = wf.list_tickets(&who).await?;
    let mut out = Vec::with_capacity(tickets.len());
    for t in tickets {
        out.push(ticket_view(wf, t).await?);
    }
    Ok(Json(out))
}

pub async fn get(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<TicketId>,
) -> ApiResult<Json<TicketView>> {
    let wf = app.workflow();
    let ticket = wf.get_ticket(&who, id).await?;
    Ok(Json(ticket_view(wf, ticket).await?))
}

pub async fn assign(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<TicketId>,
    Body(req): Body<AssignReq>,
) -> ApiResult<Json<TicketView>> {
    let wf = app.workflow();
    let ticket = wf.assign_ticket(&who, id, req.user_id).await?;
    Ok(Json(ticket_view(wf, ticket).await?))
}

pub async fn change_status(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<TicketId>,
    Body(req): Body<StatusReq>,
) -> ApiResult<Json<TicketView>> {
    let wf = app.workflow();
    let ticket = wf.change_status(&who, id, req.status).await?;
    Ok(Json(ticket_view(wf, ticket).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<TicketId>,
) -> ApiResult<StatusCode> {
    app.workflow().delete_ticket(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn history(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<TicketId>,
) -> ApiResult<Json<Vec<StatusLogEntry>>> {
    Ok(Json(app.workflow().status_history(&who, id).await?))
}
