// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{DirectShare, Ownable};
use crate::store::Store;

/// A direct share as presented to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectShareView {
    pub id: i32,
    pub sender: String,
    pub receiver: String,
    pub receiver_id: i32,
    pub recipe: i32,
    pub recipe_title: String,
    pub recipe_image: Option<String>,
    pub message: Option<String>,
    pub shared_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Unread direct shares addressed to `receiver_id`, in storage order
pub async fn unread_notifications(
    store: &dyn Store,
    receiver_id: i32,
) -> AppResult<Vec<DirectShareView>> {
    let shares = store.direct_shares_for_receiver(receiver_id, true).await?;
    debug!("User {} has {} unread shares", receiver_id, shares.len());
    render_direct_shares(store, shares).await
}

/// Acknowledge a direct share. Only its receiver may do so; marking an
/// already-read share again is a no-op success.
pub async fn mark_read(store: &dyn Store, share_id: i32, receiver_id: i32) -> AppResult<DirectShare> {
    let not_found = || AppError::not_found("Notification not found.");

    // Foreign shares are reported as missing
    let share = store
        .direct_share(share_id)
        .await?
        .filter(|share| share.is_owned_by(receiver_id))
        .ok_or_else(not_found)?;
    if share.is_read {
        return Ok(share);
    }

    let share = store
        .mark_direct_share_read(share.id, receiver_id)
        .await?
        .ok_or_else(not_found)?;

    info!("Direct share {} marked read by user {}", share.id, receiver_id);
    Ok(share)
}

/// Attach sender/receiver usernames and recipe title/image to shares
pub async fn render_direct_shares(
    store: &dyn Store,
    shares: Vec<DirectShare>,
) -> AppResult<Vec<DirectShareView>> {
    if shares.is_empty() {
        return Ok(Vec::new());
    }

    let mut user_ids: Vec<i32> = shares
        .iter()
        .flat_map(|s| [s.sender_id, s.receiver_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let mut recipe_ids: Vec<i32> = shares.iter().map(|s| s.recipe_id).collect();
    recipe_ids.sort_unstable();
    recipe_ids.dedup();

    let (users, recipes) = futures::try_join!(
        store.users_by_ids(&user_ids),
        store.recipes_by_ids(&recipe_ids),
    )?;
    let usernames: HashMap<i32, String> = users.into_iter().map(|u| (u.id, u.username)).collect();
    let recipes: HashMap<i32, _> = recipes.into_iter().map(|r| (r.id, r)).collect();

    Ok(shares
        .into_iter()
        .map(|share| {
            let recipe = recipes.get(&share.recipe_id);
            DirectShareView {
                id: share.id,
                sender: usernames.get(&share.sender_id).cloned().unwrap_or_default(),
                receiver: usernames.get(&share.receiver_id).cloned().unwrap_or_default(),
                receiver_id: share.receiver_id,
                recipe: share.recipe_id,
                recipe_title: recipe.map(|r| r.title.clone()).unwrap_or_default(),
                recipe_image: recipe.and_then(|r| r.image.clone()),
                message: share.message,
                shared_at: share.shared_at,
                is_read: share.is_read,
            }
        })
        .collect())
}
