use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use helpdesk_core::{CommentId, TicketId};

use super::extract::{Body, Id};
use super::views::{comment_view, CommentView};
use super::ApiResult;
use crate::app_state::AppState;
use crate::context::Caller;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentReq {
    pub comment: String,
}

pub async fn add(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(ticket_id): Id<TicketId>,
    Body(req): Body<CommentReq>,
) -> ApiResult<(StatusCode, Json<CommentView>)> {
    let wf = app.workflow();
    let comment = wf.add_comment(&who, ticket_id, &req.comment).await?;
    Ok((StatusCode::CREATED, Json(comment_view(wf, comment).await?)))
}

pub async fn list(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(ticket_id): Id<TicketId>,
) -> ApiResult<Json<Vec<CommentView>>> {
    let wf = app.workflow();
    let comments = wf.list_comments(&who, ticket_id).await?;
    let mut out = Vec::with_capacity(comments.len());
    for c in comments {
        out.push(comment_view(wf, c).await?);
    }
    Ok(Json(out))
}

pub async fn get(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<CommentId>,
) -> ApiResult<Json<CommentView>> {
    let wf = app.workflow();
    let comment = wf.get_comment(&who, id).await?;
    Ok(Json(comment_view(wf, comment).await?))
}

pub async fn edit(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<CommentId>,
    Body(req): Body<CommentReq>,
) -> ApiResult<Json<CommentView>> {
    let wf = app.workflow();
    let comment = wf.edit_comment(&who, id, &req.comment).await?;
    Ok(Json(comment_view(wf, comment).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    Caller(who): Caller,
    Id(id): Id<CommentId>,
) -> ApiResult<StatusCode> {
    app.workflow().delete_comment(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
