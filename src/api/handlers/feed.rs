// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::models::FeedEntry;
use crate::services::feed::compute_feed;

/// Merged authored + shared recipes from the users the caller follows
pub async fn get_feed(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<FeedEntry>>> {
    let feed = compute_feed(state.store.as_ref(), user.id).await?;
    debug!("Feed for user {} has {} entries", user.id, feed.len());

    state.metrics.record_feed(feed.len());
    Ok(Json(feed))
}
