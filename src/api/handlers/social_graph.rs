// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::extract::AppJson;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::models::{FollowEdge, FollowedUser};
use crate::services::follows::{follow_user, unfollow_user};

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub user_id: Option<i32>,
}

/// Users the caller follows, most recent first
pub async fn get_following(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<FollowedUser>>> {
    let following = state.store.following_details(user.id).await?;
    Ok(Json(following))
}

/// The caller's raw follow edges
pub async fn get_follow_edges(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<FollowEdge>>> {
    let edges = state.store.follow_edges(user.id).await?;
    Ok(Json(edges))
}

pub async fn follow(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<FollowRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (_, target, created) = follow_user(state.store.as_ref(), user.id, request.user_id).await?;

    if created {
        Ok((
            StatusCode::CREATED,
            Json(json!({ "detail": format!("You are now following {}.", target.username) })),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(json!({ "detail": "Already following this user." })),
        ))
    }
}

pub async fn unfollow(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<FollowRequest>,
) -> AppResult<Json<Value>> {
    let target = unfollow_user(state.store.as_ref(), user.id, request.user_id).await?;
    Ok(Json(json!({ "detail": format!("Unfollowed {}.", target.username) })))
}
