// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use super::{RecipeStore, ShareLedger, SocialGraph, Store, UserDirectory};
use crate::db::{Database, DbConnection};
use crate::error::AppResult;
use crate::models::{
    BroadcastShare, DirectShare, FollowEdge, FollowedUser, NewBroadcastShare, NewDirectShare,
    NewFollowEdge, NewRecipe, Recipe, RecipeChanges, User,
};
use crate::schema::{direct_shares, follows, recipes, shared_recipes, users};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    db: Arc<Database>,
}

impl PgStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn get_connection(&self) -> AppResult<DbConnection> {
        Ok(self.db.get_connection().await?)
    }
}

#[async_trait]
impl SocialGraph for PgStore {
    async fn following_ids(&self, user_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.get_connection().await?;

        let ids = follows::table
            .filter(follows::follower_id.eq(user_id))
            .order(follows::id.asc())
            .select(follows::following_id)
            .load::<i32>(&mut conn)
            .await?;

        Ok(ids)
    }

    async fn following_details(&self, user_id: i32) -> AppResult<Vec<FollowedUser>> {
        let mut conn = self.get_connection().await?;

        let rows = follows::table
            .inner_join(users::table.on(users::id.eq(follows::following_id)))
            .filter(follows::follower_id.eq(user_id))
            .order(follows::created_at.desc())
            .select((users::id, users::username, users::email, follows::created_at))
            .load::<(i32, String, String, DateTime<Utc>)>(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, username, email, created_at)| FollowedUser {
                id,
                username,
                email,
                created_at,
            })
            .collect())
    }

    async fn follow_edges(&self, user_id: i32) -> AppResult<Vec<FollowEdge>> {
        let mut conn = self.get_connection().await?;

        let edges = follows::table
            .filter(follows::follower_id.eq(user_id))
            .order(follows::id.asc())
            .select(FollowEdge::as_select())
            .load(&mut conn)
            .await?;

        Ok(edges)
    }

    async fn follow(&self, follower_id: i32, following_id: i32) -> AppResult<(FollowEdge, bool)> {
        let mut conn = self.get_connection().await?;

        let edge = NewFollowEdge {
            follower_id,
            following_id,
            created_at: Utc::now(),
        };

        let inserted = diesel::insert_into(follows::table)
            .values(&edge)
            .on_conflict((follows::follower_id, follows::following_id))
            .do_nothing()
            .returning(FollowEdge::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        if let Some(edge) = inserted {
            return Ok((edge, true));
        }

        debug!("Follow relationship already exists - returning existing edge");
        let existing = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .filter(follows::following_id.eq(following_id))
            .select(FollowEdge::as_select())
            .first(&mut conn)
            .await?;

        Ok((existing, false))
    }

    async fn unfollow(&self, follower_id: i32, following_id: i32) -> AppResult<bool> {
        let mut conn = self.get_connection().await?;

        let deleted = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower_id))
                .filter(follows::following_id.eq(following_id)),
        )
        .execute(&mut conn)
        .await?;

        Ok(deleted > 0)
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn recipe(&self, recipe_id: i32) -> AppResult<Option<Recipe>> {
        let mut conn = self.get_connection().await?;

        let recipe = recipes::table
            .find(recipe_id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(recipe)
    }

    async fn recipes_by_authors(&self, author_ids: &[i32]) -> AppResult<Vec<Recipe>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection().await?;

        let recipes = recipes::table
            .filter(recipes::author_id.eq_any(author_ids))
            .order(recipes::id.asc())
            .select(Recipe::as_select())
            .load(&mut conn)
            .await?;

        Ok(recipes)
    }

    async fn recipes_by_ids(&self, recipe_ids: &[i32]) -> AppResult<Vec<Recipe>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection().await?;

        let recipes = recipes::table
            .filter(recipes::id.eq_any(recipe_ids))
            .order(recipes::id.asc())
            .select(Recipe::as_select())
            .load(&mut conn)
            .await?;

        Ok(recipes)
    }

    async fn latest_recipes(&self) -> AppResult<Vec<Recipe>> {
        let mut conn = self.get_connection().await?;

        let recipes = recipes::table
            .order((recipes::created_at.desc(), recipes::id.desc()))
            .select(Recipe::as_select())
            .load(&mut conn)
            .await?;

        Ok(recipes)
    }

    async fn insert_recipe(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        let mut conn = self.get_connection().await?;

        let recipe = diesel::insert_into(recipes::table)
            .values(&recipe)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(recipe)
    }

    async fn update_recipe(&self, recipe_id: i32, changes: RecipeChanges) -> AppResult<Recipe> {
        let mut conn = self.get_connection().await?;

        let recipe = diesel::update(recipes::table.find(recipe_id))
            .set(&changes)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(recipe)
    }

    async fn delete_recipe(&self, recipe_id: i32) -> AppResult<()> {
        let mut conn = self.get_connection().await?;

        diesel::delete(recipes::table.find(recipe_id))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn user(&self, user_id: i32) -> AppResult<Option<User>> {
        let mut conn = self.get_connection().await?;

        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(user)
    }

    async fn users_by_ids(&self, user_ids: &[i32]) -> AppResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection().await?;

        let users = users::table
            .filter(users::id.eq_any(user_ids))
            .order(users::id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        Ok(users)
    }
}

#[async_trait]
impl ShareLedger for PgStore {
    async fn insert_broadcast_share(
        &self,
        sender_id: i32,
        recipe_id: i32,
    ) -> AppResult<BroadcastShare> {
        let mut conn = self.get_connection().await?;

        let share = diesel::insert_into(shared_recipes::table)
            .values(&NewBroadcastShare {
                sender_id,
                recipe_id,
                shared_at: Utc::now(),
            })
            .returning(BroadcastShare::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(share)
    }

    async fn broadcast_shares_by_senders(
        &self,
        sender_ids: &[i32],
    ) -> AppResult<Vec<BroadcastShare>> {
        if sender_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection().await?;

        let shares = shared_recipes::table
            .filter(shared_recipes::sender_id.eq_any(sender_ids))
            .order(shared_recipes::id.asc())
            .select(BroadcastShare::as_select())
            .load(&mut conn)
            .await?;

        Ok(shares)
    }

    async fn get_or_create_direct_shares(
        &self,
        sender_id: i32,
        recipe_id: i32,
        receiver_ids: &[i32],
        message: Option<&str>,
    ) -> AppResult<Vec<(DirectShare, bool)>> {
        let mut conn = self.get_connection().await?;

        // One transaction for the whole batch; the unique (sender, receiver,
        // recipe) constraint settles concurrent identical requests.
        let shares = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let mut shares = Vec::with_capacity(receiver_ids.len());

                    for &receiver_id in receiver_ids {
                        let new_share = NewDirectShare {
                            sender_id,
                            receiver_id,
                            recipe_id,
                            message,
                            shared_at: Utc::now(),
                            is_read: false,
                        };

                        let inserted = diesel::insert_into(direct_shares::table)
                            .values(&new_share)
                            .on_conflict((
                                direct_shares::sender_id,
                                direct_shares::receiver_id,
                                direct_shares::recipe_id,
                            ))
                            .do_nothing()
                            .returning(DirectShare::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;

                        match inserted {
                            Some(share) => shares.push((share, true)),
                            None => {
                                let existing = direct_shares::table
                                    .filter(direct_shares::sender_id.eq(sender_id))
                                    .filter(direct_shares::receiver_id.eq(receiver_id))
                                    .filter(direct_shares::recipe_id.eq(recipe_id))
                                    .select(DirectShare::as_select())
                                    .first(conn)
                                    .await?;
                                shares.push((existing, false));
                            }
                        }
                    }

                    Ok(shares)
                }
                .scope_boxed()
            })
            .await?;

        Ok(shares)
    }

    async fn direct_share(&self, share_id: i32) -> AppResult<Option<DirectShare>> {
        let mut conn = self.get_connection().await?;

        let share = direct_shares::table
            .find(share_id)
            .select(DirectShare::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(share)
    }

    async fn mark_direct_share_read(
        &self,
        share_id: i32,
        receiver_id: i32,
    ) -> AppResult<Option<DirectShare>> {
        let mut conn = self.get_connection().await?;

        let share = diesel::update(
            direct_shares::table
                .filter(direct_shares::id.eq(share_id))
                .filter(direct_shares::receiver_id.eq(receiver_id)),
        )
        .set(direct_shares::is_read.eq(true))
        .returning(DirectShare::as_returning())
        .get_result(&mut conn)
        .await
        .optional()?;

        Ok(share)
    }

    async fn direct_shares_for_receiver(
        &self,
        receiver_id: i32,
        unread_only: bool,
    ) -> AppResult<Vec<DirectShare>> {
        let mut conn = self.get_connection().await?;

        let mut query = direct_shares::table
            .filter(direct_shares::receiver_id.eq(receiver_id))
            .into_boxed();
        if unread_only {
            query = query.filter(direct_shares::is_read.eq(false));
        }

        let shares = query
            .order(direct_shares::id.asc())
            .select(DirectShare::as_select())
            .load(&mut conn)
            .await?;

        Ok(shares)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        diesel::sql_query("SELECT 1").execute(&mut conn).await?;
        Ok(())
    }
}
