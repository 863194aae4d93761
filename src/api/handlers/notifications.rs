// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::extract::AppPath;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::services::digest::{digest_for, SharerSummary};
use crate::services::notifications::{mark_read, unread_notifications, DirectShareView};

/// Unread direct shares addressed to the caller
pub async fn get_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<DirectShareView>>> {
    Ok(Json(unread_notifications(state.store.as_ref(), user.id).await?))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(share_id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    mark_read(state.store.as_ref(), share_id, user.id).await?;
    Ok(Json(json!({ "detail": "Notification marked as read." })))
}

/// Direct shares received by the caller, grouped by sender
pub async fn get_shared_recipes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<SharerSummary>>> {
    Ok(Json(digest_for(state.store.as_ref(), user.id).await?))
}

pub async fn mark_shared_read(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(share_id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    mark_read(state.store.as_ref(), share_id, user.id).await?;
    Ok(Json(json!({ "detail": "Marked as read" })))
}
