// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

//! In-memory store used by the unit and HTTP tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{RecipeStore, ShareLedger, SocialGraph, Store, UserDirectory};
use crate::error::{AppError, AppResult};
use crate::models::{
    BroadcastShare, DirectShare, FollowEdge, FollowedUser, NewRecipe, Recipe, RecipeChanges, User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    recipes: Vec<Recipe>,
    follows: Vec<FollowEdge>,
    broadcasts: Vec<BroadcastShare>,
    direct: Vec<DirectShare>,
    next_id: i32,
    /// Minutes past the epoch handed out by `tick`
    clock: i64,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so ordering in tests is deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        at(self.clock)
    }
}

/// Timestamp `minutes` after a fixed epoch
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let mut t = self.tables.lock().unwrap();
        let user = User {
            id: t.next_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            date_joined: at(0),
        };
        t.users.push(user.clone());
        user
    }

    pub fn add_follow(&self, follower_id: i32, following_id: i32) {
        let mut t = self.tables.lock().unwrap();
        let edge = FollowEdge {
            id: t.next_id(),
            follower_id,
            following_id,
            created_at: t.tick(),
        };
        t.follows.push(edge);
    }

    pub fn add_recipe_at(&self, author_id: i32, title: &str, created_at: DateTime<Utc>) -> Recipe {
        let mut t = self.tables.lock().unwrap();
        let recipe = Recipe {
            id: t.next_id(),
            author_id,
            title: title.to_string(),
            description: format!("How to make {title}"),
            image: Some(format!("recipes/{}.jpg", title.to_lowercase())),
            is_ai_generated: false,
            created_at,
            updated_at: created_at,
        };
        t.recipes.push(recipe.clone());
        recipe
    }

    pub fn add_broadcast_at(
        &self,
        sender_id: i32,
        recipe_id: i32,
        shared_at: DateTime<Utc>,
    ) -> BroadcastShare {
        let mut t = self.tables.lock().unwrap();
        let share = BroadcastShare {
            id: t.next_id(),
            sender_id,
            recipe_id,
            shared_at,
        };
        t.broadcasts.push(share.clone());
        share
    }

    pub fn direct_share_count(&self) -> usize {
        self.tables.lock().unwrap().direct.len()
    }

    pub fn broadcast_count(&self) -> usize {
        self.tables.lock().unwrap().broadcasts.len()
    }
}

#[async_trait]
impl SocialGraph for MemoryStore {
    async fn following_ids(&self, user_id: i32) -> AppResult<Vec<i32>> {
        let t = self.tables.lock().unwrap();
        Ok(t.follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .map(|f| f.following_id)
            .collect())
    }

    async fn following_details(&self, user_id: i32) -> AppResult<Vec<FollowedUser>> {
        let t = self.tables.lock().unwrap();
        let mut details: Vec<FollowedUser> = t
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .filter_map(|f| {
                t.users.iter().find(|u| u.id == f.following_id).map(|u| FollowedUser {
                    id: u.id,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    created_at: f.created_at,
                })
            })
            .collect();
        details.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(details)
    }

    async fn follow_edges(&self, user_id: i32) -> AppResult<Vec<FollowEdge>> {
        let t = self.tables.lock().unwrap();
        Ok(t.follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .cloned()
            .collect())
    }

    async fn follow(&self, follower_id: i32, following_id: i32) -> AppResult<(FollowEdge, bool)> {
        let mut t = self.tables.lock().unwrap();
        let existing = t
            .follows
            .iter()
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
            .cloned();
        if let Some(edge) = existing {
            return Ok((edge, false));
        }
        let edge = FollowEdge {
            id: t.next_id(),
            follower_id,
            following_id,
            created_at: t.tick(),
        };
        t.follows.push(edge.clone());
        Ok((edge, true))
    }

    async fn unfollow(&self, follower_id: i32, following_id: i32) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.follows.len();
        t.follows
            .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));
        Ok(t.follows.len() != before)
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn recipe(&self, recipe_id: i32) -> AppResult<Option<Recipe>> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes.iter().find(|r| r.id == recipe_id).cloned())
    }

    async fn recipes_by_authors(&self, author_ids: &[i32]) -> AppResult<Vec<Recipe>> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes
            .iter()
            .filter(|r| author_ids.contains(&r.author_id))
            .cloned()
            .collect())
    }

    async fn recipes_by_ids(&self, recipe_ids: &[i32]) -> AppResult<Vec<Recipe>> {
        let t = self.tables.lock().unwrap();
        Ok(t.recipes
            .iter()
            .filter(|r| recipe_ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn latest_recipes(&self) -> AppResult<Vec<Recipe>> {
        let t = self.tables.lock().unwrap();
        let mut recipes = t.recipes.clone();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(recipes)
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        let mut t = self.tables.lock().unwrap();
        let recipe = Recipe {
            id: t.next_id(),
            author_id: recipe.author_id,
            title: recipe.title,
            description: recipe.description,
            image: recipe.image,
            is_ai_generated: recipe.is_ai_generated,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        };
        t.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, recipe_id: i32, changes: RecipeChanges) -> AppResult<Recipe> {
        let mut t = self.tables.lock().unwrap();
        let recipe = t
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe_id)
            .ok_or(AppError::Database(diesel::result::Error::NotFound))?;
        if let Some(title) = changes.title {
            recipe.title = title;
        }
        if let Some(description) = changes.description {
            recipe.description = description;
        }
        if let Some(image) = changes.image {
            recipe.image = Some(image);
        }
        if let Some(flag) = changes.is_ai_generated {
            recipe.is_ai_generated = flag;
        }
        if let Some(updated_at) = changes.updated_at {
            recipe.updated_at = updated_at;
        }
        Ok(recipe.clone())
    }

    async fn delete_recipe(&self, recipe_id: i32) -> AppResult<()> {
        let mut t = self.tables.lock().unwrap();
        t.recipes.retain(|r| r.id != recipe_id);
        t.broadcasts.retain(|s| s.recipe_id != recipe_id);
        t.direct.retain(|s| s.recipe_id != recipe_id);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn user(&self, user_id: i32) -> AppResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn users_by_ids(&self, user_ids: &[i32]) -> AppResult<Vec<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users
            .iter()
            .filter(|u| user_ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ShareLedger for MemoryStore {
    async fn insert_broadcast_share(
        &self,
        sender_id: i32,
        recipe_id: i32,
    ) -> AppResult<BroadcastShare> {
        let mut t = self.tables.lock().unwrap();
        let share = BroadcastShare {
            id: t.next_id(),
            sender_id,
            recipe_id,
            shared_at: t.tick(),
        };
        t.broadcasts.push(share.clone());
        Ok(share)
    }

    async fn broadcast_shares_by_senders(
        &self,
        sender_ids: &[i32],
    ) -> AppResult<Vec<BroadcastShare>> {
        let t = self.tables.lock().unwrap();
        Ok(t.broadcasts
            .iter()
            .filter(|s| sender_ids.contains(&s.sender_id))
            .cloned()
            .collect())
    }

    async fn get_or_create_direct_shares(
        &self,
        sender_id: i32,
        recipe_id: i32,
        receiver_ids: &[i32],
        message: Option<&str>,
    ) -> AppResult<Vec<(DirectShare, bool)>> {
        let mut t = self.tables.lock().unwrap();
        let mut out = Vec::with_capacity(receiver_ids.len());
        for &receiver_id in receiver_ids {
            let existing = t
                .direct
                .iter()
                .find(|s| {
                    s.sender_id == sender_id
                        && s.receiver_id == receiver_id
                        && s.recipe_id == recipe_id
                })
                .cloned();
            match existing {
                Some(share) => out.push((share, false)),
                None => {
                    let share = DirectShare {
                        id: t.next_id(),
                        sender_id,
                        receiver_id,
                        recipe_id,
                        message: message.map(str::to_string),
                        shared_at: t.tick(),
                        is_read: false,
                    };
                    t.direct.push(share.clone());
                    out.push((share, true));
                }
            }
        }
        Ok(out)
    }

    async fn direct_share(&self, share_id: i32) -> AppResult<Option<DirectShare>> {
        let t = self.tables.lock().unwrap();
        Ok(t.direct.iter().find(|s| s.id == share_id).cloned())
    }

    async fn mark_direct_share_read(
        &self,
        share_id: i32,
        receiver_id: i32,
    ) -> AppResult<Option<DirectShare>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.direct
            .iter_mut()
            .find(|s| s.id == share_id && s.receiver_id == receiver_id)
            .map(|s| {
                s.is_read = true;
                s.clone()
            }))
    }

    async fn direct_shares_for_receiver(
        &self,
        receiver_id: i32,
        unread_only: bool,
    ) -> AppResult<Vec<DirectShare>> {
        let t = self.tables.lock().unwrap();
        Ok(t.direct
            .iter()
            .filter(|s| s.receiver_id == receiver_id && (!unread_only || !s.is_read))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
