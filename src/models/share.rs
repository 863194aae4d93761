// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// "Sender shared this recipe with all their followers"
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::shared_recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BroadcastShare {
    pub id: i32,
    pub sender_id: i32,
    pub recipe_id: i32,
    pub shared_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::shared_recipes)]
pub struct NewBroadcastShare {
    pub sender_id: i32,
    pub recipe_id: i32,
    pub shared_at: DateTime<Utc>,
}

/// A recipe sent to one receiver, unique per (sender, receiver, recipe)
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::direct_shares)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DirectShare {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub recipe_id: i32,
    pub message: Option<String>,
    pub shared_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::direct_shares)]
pub struct NewDirectShare<'a> {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub recipe_id: i32,
    pub message: Option<&'a str>,
    pub shared_at: DateTime<Utc>,
    pub is_read: bool,
}
