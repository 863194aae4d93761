// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::extract::{AppJson, AppPath};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::services::notifications::render_direct_shares;
use crate::services::sharing::{create_broadcast_share, create_direct_shares};

#[derive(Debug, Deserialize)]
pub struct DirectShareRequest {
    /// Absent and `null` both count as an empty selection
    #[serde(default)]
    pub receiver_ids: Option<Vec<i32>>,
    pub message: Option<String>,
}

/// Share a recipe with everyone following the caller
pub async fn share_to_followers(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(recipe_id): AppPath<i32>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let recipe = create_broadcast_share(state.store.as_ref(), user.id, recipe_id).await?;
    state.metrics.record_shares("broadcast", 1);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "detail": format!("Recipe '{}' shared to your followers!", recipe.title)
        })),
    ))
}

/// Share a recipe with selected users the caller follows
pub async fn direct_share(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(recipe_id): AppPath<i32>,
    AppJson(request): AppJson<DirectShareRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let outcome = create_direct_shares(
        state.store.as_ref(),
        user.id,
        recipe_id,
        request.receiver_ids.as_deref().unwrap_or_default(),
        request.message.as_deref(),
    )
    .await?;

    let count = outcome.created.len();
    let skipped = outcome.skipped_count();
    state.metrics.record_shares("direct", count);

    let (status, detail) = if count > 0 {
        (
            StatusCode::CREATED,
            format!("Recipe shared with {} follower(s) successfully!", count),
        )
    } else {
        (
            StatusCode::OK,
            "Recipe already shared with the selected follower(s).".to_string(),
        )
    };

    let shares = render_direct_shares(state.store.as_ref(), outcome.created).await?;

    Ok((
        status,
        Json(json!({
            "detail": detail,
            "shares": shares,
            "count": count,
            "skipped": skipped,
        })),
    ))
}
