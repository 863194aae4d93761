// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod feed;
pub mod recipe;
pub mod share;
pub mod social_graph;
pub mod user;

pub use feed::FeedEntry;
pub use recipe::{NewRecipe, Recipe, RecipeChanges};
pub use share::{BroadcastShare, DirectShare, NewBroadcastShare, NewDirectShare};
pub use social_graph::{FollowEdge, FollowedUser, NewFollowEdge};
pub use user::User;

use crate::error::{AppError, AppResult};

/// Entities that belong to exactly one user.
///
/// Mutating operations check ownership through this trait instead of
/// inspecting which owner field a record happens to carry.
pub trait Ownable {
    /// Human readable entity name used in error details
    const KIND: &'static str;

    fn owner_id(&self) -> i32;

    fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id() == user_id
    }

    fn ensure_owned_by(&self, user_id: i32) -> AppResult<()> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(AppError::AuthorizationDenied(format!(
                "You do not have permission to modify this {}.",
                Self::KIND
            )))
        }
    }
}

impl Ownable for Recipe {
    const KIND: &'static str = "recipe";

    fn owner_id(&self) -> i32 {
        self.author_id
    }
}

/// A direct share belongs to its receiver: only they may change its read state.
impl Ownable for DirectShare {
    const KIND: &'static str = "share";

    fn owner_id(&self) -> i32 {
        self.receiver_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(author_id: i32) -> Recipe {
        Recipe {
            id: 1,
            author_id,
            title: "Shakshuka".into(),
            description: String::new(),
            image: None,
            is_ai_generated: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn recipe_is_owned_by_its_author() {
        let recipe = recipe(7);
        assert!(recipe.ensure_owned_by(7).is_ok());
        assert!(matches!(
            recipe.ensure_owned_by(8),
            Err(AppError::AuthorizationDenied(_))
        ));
    }

    #[test]
    fn direct_share_is_owned_by_its_receiver() {
        let share = DirectShare {
            id: 3,
            sender_id: 1,
            receiver_id: 2,
            recipe_id: 9,
            message: None,
            shared_at: Utc::now(),
            is_read: false,
        };
        assert!(share.is_owned_by(2));
        assert!(!share.is_owned_by(1));
    }
}
