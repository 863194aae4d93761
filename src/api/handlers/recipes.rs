// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::extract::{AppJson, AppPath};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::models::Recipe;
use crate::services::recipes::{self, RecipeInput, RecipePatch};

/// All recipes, newest first
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.store.latest_recipes().await?))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(recipes::get_recipe(state.store.as_ref(), recipe_id).await?))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<RecipeInput>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let recipe = recipes::create_recipe(state.store.as_ref(), user.id, input).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(recipe_id): AppPath<i32>,
    AppJson(patch): AppJson<RecipePatch>,
) -> AppResult<Json<Recipe>> {
    let recipe = recipes::update_recipe(state.store.as_ref(), user.id, recipe_id, patch).await?;
    Ok(Json(recipe))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(recipe_id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    recipes::delete_recipe(state.store.as_ref(), user.id, recipe_id).await?;
    Ok(Json(json!({ "detail": "Recipe deleted successfully." })))
}
