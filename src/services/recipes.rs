// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewRecipe, Ownable, Recipe, RecipeChanges};
use crate::store::Store;

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_ai_generated: Option<bool>,
}

fn validate_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Title is required."));
    }
    if title.chars().count() > 200 {
        return Err(AppError::validation(
            "Title must be at most 200 characters.",
        ));
    }
    Ok(title.to_string())
}

pub async fn get_recipe(store: &dyn Store, recipe_id: i32) -> AppResult<Recipe> {
    store
        .recipe(recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe not found."))
}

pub async fn create_recipe(store: &dyn Store, author_id: i32, input: RecipeInput) -> AppResult<Recipe> {
    let now = Utc::now();
    let recipe = store
        .insert_recipe(NewRecipe {
            author_id,
            title: validate_title(&input.title)?,
            description: input.description,
            image: input.image,
            is_ai_generated: input.is_ai_generated,
            created_at: now,
            updated_at: now,
        })
        .await?;

    info!("User {} published recipe {}", author_id, recipe.id);
    Ok(recipe)
}

/// Apply `patch` to a recipe owned by `user_id`
pub async fn update_recipe(
    store: &dyn Store,
    user_id: i32,
    recipe_id: i32,
    patch: RecipePatch,
) -> AppResult<Recipe> {
    let recipe = get_recipe(store, recipe_id).await?;
    recipe.ensure_owned_by(user_id)?;

    let changes = RecipeChanges {
        title: patch.title.as_deref().map(validate_title).transpose()?,
        description: patch.description,
        image: patch.image,
        is_ai_generated: patch.is_ai_generated,
        updated_at: Some(Utc::now()),
    };

    store.update_recipe(recipe.id, changes).await
}

pub async fn delete_recipe(store: &dyn Store, user_id: i32, recipe_id: i32) -> AppResult<()> {
    let recipe = get_recipe(store, recipe_id).await?;
    recipe.ensure_owned_by(user_id)?;

    store.delete_recipe(recipe.id).await?;
    info!("User {} deleted recipe {}", user_id, recipe.id);
    Ok(())
}
