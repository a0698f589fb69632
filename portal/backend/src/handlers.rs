//! API Handlers

use crate::auth::Session;
use crate::error::ApiError;
use crate::models::*;
use crate::{AppState, SessionKey};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use portal_core::cache::today;
use portal_core::{compose, DispatchState, Dispatcher};
use tokio::task::JoinHandle;
use tracing::info;

pub async fn health() -> &'static str {
    "OK"
}

// Catalog
pub async fn list_capabilities(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let registry = &state.registry;
    let role = session.user.role;
    let visible = registry.visible_capabilities(&session.user, &session.tenant);
    let groups = compose(&visible, &query.q);

    let view = CatalogView {
        tenant: &session.tenant,
        role,
        privileged: registry.policy().is_privileged(role, &session.tenant),
        query: query.q.trim(),
        total: groups.iter().map(|g| g.tiles.len()).sum(),
        groups,
    };
    Json(view).into_response()
}

// Navigation
pub async fn get_navigation(State(state): State<AppState>, session: Session) -> Json<DispatchState> {
    Json(state.dispatcher(&session).state())
}

pub async fn select_capability(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<DispatchState>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let dispatcher = state.dispatcher(&session);

    info!(user = %session.user.id, capability = %request.capability, "navigate");
    settle(&dispatcher, dispatcher.select(&request.capability)).await
}

pub async fn retry(State(state): State<AppState>, session: Session) -> Result<Json<DispatchState>, ApiError> {
    let dispatcher = state.dispatcher(&session);
    settle(&dispatcher, dispatcher.retry()).await
}

pub async fn back(State(state): State<AppState>, session: Session) -> Json<DispatchState> {
    let dispatcher = state.dispatcher(&session);
    dispatcher.back();
    Json(dispatcher.state())
}

/// Wait for the load (if any) and report where the session ended up
async fn settle(dispatcher: &Dispatcher, load: Option<JoinHandle<()>>) -> Result<Json<DispatchState>, ApiError> {
    if let Some(load) = load {
        load.await.map_err(|e| ApiError::Internal(e.to_string()))?;
    }
    Ok(Json(dispatcher.state()))
}

// Overview
pub async fn overview(State(state): State<AppState>, session: Session) -> Json<OverviewSummary> {
    let date = today();
    let summary = state.overview.get_or_insert_with(SessionKey::of(&session), date, || {
        OverviewSummary::build(&state.registry, &session, date)
    });
    Json(summary)
}
