// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Model for a follow relationship
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FollowEdge {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new follow relationship
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::follows)]
pub struct NewFollowEdge {
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A user the caller follows, with the time the edge was created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowedUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
