//! HTTP handlers for the change feed

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::feed::ChangeEvent;
use crate::AppState;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct ChangesQuery {
    pub since_seq: Option<i64>,
    pub limit: Option<i64>,
}

/// Changes recorded after `since_seq`, oldest first.
///
/// Clients poll with the highest sequence number they have seen; a fresh
/// client starts from 0 and replays the whole log.
pub async fn get_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> AppResult<Json<Vec<ChangeEvent>>> {
    let since_seq = query.since_seq.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let changes = state.feed.changes_since(since_seq, limit).await?;
    Ok(Json(changes))
}
