//! `GET /api/stories/new`.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use hn_core::{Item, PagedResult};

use crate::error::AppError;
use crate::extractors::NewestQuery;
use crate::state::AppState;

/// Returns a page of the newest stories, optionally filtered by title.
///
/// If the client disconnects the handler future is dropped, which drops
/// the fan-out and aborts its tasks.
pub async fn get_newest_stories(
    State(state): State<AppState>,
    query: Result<Query<NewestQuery>, QueryRejection>,
) -> Result<Json<PagedResult<Item>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let ctx = state.request_context();

    let page = state
        .aggregator()
        .get_newest(query.offset, query.limit, query.search.as_deref(), &ctx)
        .await?;

    Ok(Json(page))
}
