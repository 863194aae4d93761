// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{FollowEdge, User};
use crate::store::Store;

/// Start following `target_id`. Returns the edge, the followed user and
/// whether the edge is new.
pub async fn follow_user(
    store: &dyn Store,
    follower_id: i32,
    target_id: Option<i32>,
) -> AppResult<(FollowEdge, User, bool)> {
    let target_id = target_id.ok_or_else(|| AppError::validation("User ID required"))?;
    if target_id == follower_id {
        return Err(AppError::validation("You cannot follow yourself."));
    }

    let target = store
        .user(target_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found."))?;

    let (edge, created) = store.follow(follower_id, target.id).await?;
    if created {
        info!("User {} now follows {}", follower_id, target.id);
    }
    Ok((edge, target, created))
}

/// Stop following `target_id`
pub async fn unfollow_user(
    store: &dyn Store,
    follower_id: i32,
    target_id: Option<i32>,
) -> AppResult<User> {
    let not_found = || AppError::not_found("Follow relationship not found.");

    let target_id = target_id.ok_or_else(not_found)?;
    let target = store.user(target_id).await?.ok_or_else(not_found)?;

    if !store.unfollow(follower_id, target.id).await? {
        return Err(not_found());
    }

    info!("User {} unfollowed {}", follower_id, target.id);
    Ok(target)
}
