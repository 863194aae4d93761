// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::AppResult;
use crate::models::feed::shared_entry_id;
use crate::models::{BroadcastShare, FeedEntry, Recipe};
use crate::store::Store;

/// Display name used when a recipe's author can no longer be resolved
pub const UNKNOWN_AUTHOR: &str = "—";

/// Build the feed of `viewer_id`: recipes authored by followed users plus
/// recipes broadcast by followed users, newest first.
pub async fn compute_feed(store: &dyn Store, viewer_id: i32) -> AppResult<Vec<FeedEntry>> {
    // Read once, reused for both branches
    let following = store.following_ids(viewer_id).await?;
    debug!("Computing feed for user {} following {} users", viewer_id, following.len());

    if following.is_empty() {
        return Ok(Vec::new());
    }

    let (authored, shares) = futures::try_join!(
        store.recipes_by_authors(&following),
        store.broadcast_shares_by_senders(&following),
    )?;

    let seen: HashSet<i32> = authored.iter().map(|r| r.id).collect();
    let mut pending: Vec<i32> = shares
        .iter()
        .map(|s| s.recipe_id)
        .filter(|id| !seen.contains(id))
        .collect();
    pending.sort_unstable();
    pending.dedup();

    let shared_recipes = store.recipes_by_ids(&pending).await?;

    let mut user_ids: Vec<i32> = authored
        .iter()
        .chain(shared_recipes.iter())
        .map(|r| r.author_id)
        .chain(shares.iter().map(|s| s.sender_id))
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let usernames: HashMap<i32, String> = store
        .users_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();
    let shared_recipes: HashMap<i32, Recipe> =
        shared_recipes.into_iter().map(|r| (r.id, r)).collect();

    Ok(merge_feed(authored, shares, &shared_recipes, &usernames))
}

/// Merge authored recipes and broadcast shares into one feed.
///
/// A share of a recipe that is already present as an authored entry is
/// dropped. The final sort is stable, so entries with equal timestamps keep
/// fetch order: authored first, then shares.
pub fn merge_feed(
    authored: Vec<Recipe>,
    shares: Vec<BroadcastShare>,
    shared_recipes: &HashMap<i32, Recipe>,
    usernames: &HashMap<i32, String>,
) -> Vec<FeedEntry> {
    let name_of = |user_id: i32| {
        usernames
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    };

    let seen: HashSet<i32> = authored.iter().map(|r| r.id).collect();
    let mut entries: Vec<FeedEntry> = authored
        .into_iter()
        .map(|recipe| FeedEntry::Authored {
            id: recipe.id,
            author: name_of(recipe.author_id),
            author_id: recipe.author_id,
            title: recipe.title,
            image: recipe.image,
            created_at: recipe.created_at,
        })
        .collect();

    for share in shares {
        if seen.contains(&share.recipe_id) {
            continue;
        }
        let Some(recipe) = shared_recipes.get(&share.recipe_id) else {
            debug!("Shared recipe {} no longer exists, skipping share {}", share.recipe_id, share.id);
            continue;
        };
        entries.push(FeedEntry::Shared {
            id: shared_entry_id(share.id),
            shared_by: name_of(share.sender_id),
            recipe_id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            author: name_of(recipe.author_id),
            created_at: share.shared_at,
        });
    }

    entries.sort_by(|a, b| b.effective_at().cmp(&a.effective_at()));
    entries
}
