// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item of a user's feed.
///
/// Authored entries are keyed by recipe id, shared entries by
/// `shared-{share_id}`, so the two never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEntry {
    Authored {
        id: i32,
        title: String,
        image: Option<String>,
        author: String,
        author_id: i32,
        created_at: DateTime<Utc>,
    },
    Shared {
        id: String,
        shared_by: String,
        recipe_id: i32,
        title: String,
        image: Option<String>,
        author: String,
        created_at: DateTime<Utc>,
    },
}

impl FeedEntry {
    /// Timestamp the feed is ordered by
    pub fn effective_at(&self) -> DateTime<Utc> {
        match self {
            FeedEntry::Authored { created_at, .. } | FeedEntry::Shared { created_at, .. } => {
                *created_at
            }
        }
    }
}

#[cfg(test)]
impl FeedEntry {
    pub(crate) fn recipe_id(&self) -> i32 {
        match self {
            FeedEntry::Authored { id, .. } => *id,
            FeedEntry::Shared { recipe_id, .. } => *recipe_id,
        }
    }

    pub(crate) fn is_shared(&self) -> bool {
        matches!(self, FeedEntry::Shared { .. })
    }
}

pub fn shared_entry_id(share_id: i32) -> String {
    format!("shared-{share_id}")
}
