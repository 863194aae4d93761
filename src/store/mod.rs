// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

//! Persistence seam for the feed, sharing and notification services.
//!
//! Every collaborator the services consume (social graph, recipes, user
//! directory, share ledger) is an async trait so the services can run
//! against PostgreSQL in production and an in-memory store in tests.

mod postgres;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    BroadcastShare, DirectShare, FollowEdge, FollowedUser, NewRecipe, Recipe, RecipeChanges, User,
};

#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Ids of the users `user_id` follows
    async fn following_ids(&self, user_id: i32) -> AppResult<Vec<i32>>;

    /// Users `user_id` follows, joined with their directory entries
    async fn following_details(&self, user_id: i32) -> AppResult<Vec<FollowedUser>>;

    async fn follow_edges(&self, user_id: i32) -> AppResult<Vec<FollowEdge>>;

    /// Insert the edge unless it exists. Returns the edge and whether it was created.
    async fn follow(&self, follower_id: i32, following_id: i32) -> AppResult<(FollowEdge, bool)>;

    /// Remove the edge. Returns false when there was nothing to remove.
    async fn unfollow(&self, follower_id: i32, following_id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn recipe(&self, recipe_id: i32) -> AppResult<Option<Recipe>>;

    /// Recipes by any of `author_ids`, in primary-key order
    async fn recipes_by_authors(&self, author_ids: &[i32]) -> AppResult<Vec<Recipe>>;

    async fn recipes_by_ids(&self, recipe_ids: &[i32]) -> AppResult<Vec<Recipe>>;

    /// All recipes, newest first
    async fn latest_recipes(&self) -> AppResult<Vec<Recipe>>;

    async fn insert_recipe(&self, recipe: NewRecipe) -> AppResult<Recipe>;

    async fn update_recipe(&self, recipe_id: i32, changes: RecipeChanges) -> AppResult<Recipe>;

    async fn delete_recipe(&self, recipe_id: i32) -> AppResult<()>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user(&self, user_id: i32) -> AppResult<Option<User>>;

    async fn users_by_ids(&self, user_ids: &[i32]) -> AppResult<Vec<User>>;
}

#[async_trait]
pub trait ShareLedger: Send + Sync {
    /// Always inserts a new broadcast row
    async fn insert_broadcast_share(&self, sender_id: i32, recipe_id: i32)
        -> AppResult<BroadcastShare>;

    /// Broadcast shares sent by any of `sender_ids`, in primary-key order
    async fn broadcast_shares_by_senders(&self, sender_ids: &[i32])
        -> AppResult<Vec<BroadcastShare>>;

    /// Get-or-create one direct share per receiver, atomically.
    ///
    /// Returns each receiver's share paired with `true` when the row was
    /// inserted by this call, `false` when it already existed.
    async fn get_or_create_direct_shares(
        &self,
        sender_id: i32,
        recipe_id: i32,
        receiver_ids: &[i32],
        message: Option<&str>,
    ) -> AppResult<Vec<(DirectShare, bool)>>;

    async fn direct_share(&self, share_id: i32) -> AppResult<Option<DirectShare>>;

    /// Flip `is_read` to true on the share if `receiver_id` owns it
    async fn mark_direct_share_read(
        &self,
        share_id: i32,
        receiver_id: i32,
    ) -> AppResult<Option<DirectShare>>;

    /// Direct shares received by `receiver_id`, in primary-key order
    async fn direct_shares_for_receiver(
        &self,
        receiver_id: i32,
        unread_only: bool,
    ) -> AppResult<Vec<DirectShare>>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: SocialGraph + RecipeStore + UserDirectory + ShareLedger {
    /// Cheap liveness probe for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}
