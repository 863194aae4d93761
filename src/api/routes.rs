// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Build the application router
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let cors = if enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let api = Router::new()
        // Feed and social graph
        .route("/feed", get(handlers::feed::get_feed))
        .route("/followers", get(handlers::social_graph::get_following))
        .route("/follows", get(handlers::social_graph::get_follow_edges))
        .route("/follows/follow", post(handlers::social_graph::follow))
        .route("/follows/unfollow", post(handlers::social_graph::unfollow))

        // Recipes
        .route(
            "/recipes",
            get(handlers::recipes::list_recipes).post(handlers::recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handlers::recipes::get_recipe)
                .patch(handlers::recipes::update_recipe)
                .delete(handlers::recipes::delete_recipe),
        )

        // Sharing
        .route(
            "/recipes/:id/share_to_followers",
            post(handlers::shares::share_to_followers),
        )
        .route("/recipes/:id/direct_share", post(handlers::shares::direct_share))

        // Notifications and sharer digest
        .route("/notifications", get(handlers::notifications::get_notifications))
        .route(
            "/notifications/:share_id/read",
            patch(handlers::notifications::mark_notification_read),
        )
        .route("/shared-recipes", get(handlers::notifications::get_shared_recipes))
        .route(
            "/shared-recipes/:share_id/read",
            patch(handlers::notifications::mark_shared_read),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::get_metrics))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
