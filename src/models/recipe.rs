// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new recipe
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub author_id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a recipe; `None` leaves the column untouched
#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_ai_generated: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
