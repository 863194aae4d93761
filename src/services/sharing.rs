// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{DirectShare, Recipe};
use crate::store::Store;

/// Result of a direct-share request
#[derive(Debug, Clone, PartialEq)]
pub struct DirectShareOutcome {
    /// Shares inserted by this request
    pub created: Vec<DirectShare>,
    /// Receivers that already had this recipe from this sender
    pub already_shared: usize,
    /// Receivers that are unknown or not followed by the sender
    pub rejected: usize,
}

impl DirectShareOutcome {
    pub fn skipped_count(&self) -> usize {
        self.already_shared + self.rejected
    }
}

async fn require_recipe(store: &dyn Store, recipe_id: i32) -> AppResult<Recipe> {
    store
        .recipe(recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe not found."))
}

/// Share a recipe with all of the sender's followers. Not idempotent: every
/// call records a new share.
pub async fn create_broadcast_share(
    store: &dyn Store,
    sender_id: i32,
    recipe_id: i32,
) -> AppResult<Recipe> {
    let recipe = require_recipe(store, recipe_id).await?;
    let share = store.insert_broadcast_share(sender_id, recipe.id).await?;

    info!("User {} broadcast recipe {} (share {})", sender_id, recipe.id, share.id);
    Ok(recipe)
}

/// Share a recipe directly with some of the users the sender follows.
///
/// Receivers that do not exist or are not followed by the sender are skipped
/// without error. Existing (sender, receiver, recipe) shares are reused and
/// reported through `already_shared`. The message is stored as sent.
pub async fn create_direct_shares(
    store: &dyn Store,
    sender_id: i32,
    recipe_id: i32,
    receiver_ids: &[i32],
    message: Option<&str>,
) -> AppResult<DirectShareOutcome> {
    if receiver_ids.is_empty() {
        return Err(AppError::validation(
            "Please select at least one follower to share with.",
        ));
    }

    let recipe = require_recipe(store, recipe_id).await?;

    let mut seen = HashSet::new();
    let candidates: Vec<i32> = receiver_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let (known, following) = futures::try_join!(
        store.users_by_ids(&candidates),
        store.following_ids(sender_id),
    )?;
    let known: HashSet<i32> = known.into_iter().map(|u| u.id).collect();
    let following: HashSet<i32> = following.into_iter().collect();

    let accepted: Vec<i32> = candidates
        .iter()
        .copied()
        .filter(|receiver_id| {
            if !known.contains(receiver_id) {
                debug!("Skipping unknown receiver {}", receiver_id);
                false
            } else if !following.contains(receiver_id) {
                debug!("Skipping receiver {} not followed by {}", receiver_id, sender_id);
                false
            } else {
                true
            }
        })
        .collect();
    let rejected = candidates.len() - accepted.len();

    if accepted.is_empty() {
        return Err(AppError::validation("No valid followers selected."));
    }

    let shares = store
        .get_or_create_direct_shares(sender_id, recipe.id, &accepted, message)
        .await?;

    let mut created = Vec::new();
    let mut already_shared = 0;
    for (share, inserted) in shares {
        if inserted {
            created.push(share);
        } else {
            already_shared += 1;
        }
    }

    info!(
        "User {} shared recipe {} directly: {} created, {} already shared, {} rejected",
        sender_id,
        recipe.id,
        created.len(),
        already_shared,
        rejected
    );

    Ok(DirectShareOutcome {
        created,
        already_shared,
        rejected,
    })
}
