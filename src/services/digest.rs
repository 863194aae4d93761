// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::{DirectShare, Recipe, User};
use crate::store::Store;

/// Everything one sender has shared directly with the receiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharerSummary {
    pub sharer_id: i32,
    pub sharer_username: String,
    pub sharer_email: String,
    pub total_shared: usize,
    pub unread_count: usize,
    pub last_shared: Option<DateTime<Utc>>,
    pub shared_recipes: Vec<SharedRecipeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRecipeItem {
    pub share_id: i32,
    pub recipe_id: i32,
    pub recipe_title: String,
    pub recipe_image: Option<String>,
    pub recipe_description: String,
    pub shared_at: DateTime<Utc>,
    pub is_read: bool,
    pub message: Option<String>,
}

/// Group the direct shares received by `receiver_id` by sender
pub async fn digest_for(store: &dyn Store, receiver_id: i32) -> AppResult<Vec<SharerSummary>> {
    let shares = store.direct_shares_for_receiver(receiver_id, false).await?;
    if shares.is_empty() {
        return Ok(Vec::new());
    }

    let mut sender_ids: Vec<i32> = shares.iter().map(|s| s.sender_id).collect();
    sender_ids.sort_unstable();
    sender_ids.dedup();
    let mut recipe_ids: Vec<i32> = shares.iter().map(|s| s.recipe_id).collect();
    recipe_ids.sort_unstable();
    recipe_ids.dedup();

    let (senders, recipes) = futures::try_join!(
        store.users_by_ids(&sender_ids),
        store.recipes_by_ids(&recipe_ids),
    )?;
    let senders: HashMap<i32, User> = senders.into_iter().map(|u| (u.id, u)).collect();
    let recipes: HashMap<i32, Recipe> = recipes.into_iter().map(|r| (r.id, r)).collect();

    let digest = build_digest(shares, &senders, &recipes);
    debug!("User {} has shares from {} senders", receiver_id, digest.len());
    Ok(digest)
}

/// One summary per sender, ordered by sender id; inner lists keep share id
/// order and `last_shared` is the newest `shared_at` of the group.
pub fn build_digest(
    shares: Vec<DirectShare>,
    senders: &HashMap<i32, User>,
    recipes: &HashMap<i32, Recipe>,
) -> Vec<SharerSummary> {
    let mut groups: BTreeMap<i32, Vec<DirectShare>> = BTreeMap::new();
    for share in shares {
        groups.entry(share.sender_id).or_default().push(share);
    }

    groups
        .into_iter()
        .filter_map(|(sender_id, mut group)| {
            let Some(sender) = senders.get(&sender_id) else {
                warn!("Sender {} of {} shares is missing from the directory", sender_id, group.len());
                return None;
            };
            group.sort_by_key(|s| s.id);

            let shared_recipes: Vec<SharedRecipeItem> = group
                .iter()
                .filter_map(|share| {
                    let recipe = recipes.get(&share.recipe_id)?;
                    Some(SharedRecipeItem {
                        share_id: share.id,
                        recipe_id: recipe.id,
                        recipe_title: recipe.title.clone(),
                        recipe_image: recipe.image.clone(),
                        recipe_description: recipe.description.clone(),
                        shared_at: share.shared_at,
                        is_read: share.is_read,
                        message: share.message.clone(),
                    })
                })
                .collect();

            Some(SharerSummary {
                sharer_id: sender.id,
                sharer_username: sender.username.clone(),
                sharer_email: sender.email.clone(),
                total_shared: group.len(),
                unread_count: group.iter().filter(|s| !s.is_read).count(),
                last_shared: group.iter().map(|s| s.shared_at).max(),
                shared_recipes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::mark_read;
    use crate::store::memory::{at, MemoryStore};
    use crate::store::ShareLedger;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn one_summary_per_sender_with_counts() {
        let store = MemoryStore::new();
        let me = store.add_user("me").id;
        let ann = store.add_user("ann").id;
        let ben = store.add_user("ben").id;
        let r1 = store.add_recipe_at(ann, "Dal", at(1)).id;
        let r2 = store.add_recipe_at(ann, "Naan", at(2)).id;
        let r3 = store.add_recipe_at(ben, "Chili", at(3)).id;

        store.get_or_create_direct_shares(ann, r1, &[me], None).await.unwrap();
        let naan = store
            .get_or_create_direct_shares(ann, r2, &[me], Some("with the dal"))
            .await
            .unwrap();
        store.get_or_create_direct_shares(ben, r3, &[me], None).await.unwrap();
        // Shares to someone else never show up
        store.get_or_create_direct_shares(ben, r1, &[ann], None).await.unwrap();

        mark_read(&store, naan[0].0.id, me).await.unwrap();

        let digest = digest_for(&store, me).await.unwrap();
        assert_eq!(digest.len(), 2);

        let ann_summary = &digest[0];
        assert_eq!(ann_summary.sharer_username, "ann");
        assert_eq!(ann_summary.sharer_email, "ann@example.com");
        assert_eq!(ann_summary.total_shared, 2);
        assert_eq!(ann_summary.unread_count, 1);
        let titles: Vec<&str> = ann_summary
            .shared_recipes
            .iter()
            .map(|i| i.recipe_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Dal", "Naan"]);
        assert_eq!(
            ann_summary.last_shared,
            Some(ann_summary.shared_recipes[1].shared_at)
        );
        assert_eq!(
            ann_summary.shared_recipes[1].message.as_deref(),
            Some("with the dal")
        );

        let ben_summary = &digest[1];
        assert_eq!(ben_summary.sharer_id, ben);
        assert_eq!(ben_summary.total_shared, 1);
        assert_eq!(ben_summary.unread_count, 1);
    }

    #[tokio::test]
    async fn nothing_received_means_empty_digest() {
        let store = MemoryStore::new();
        let me = store.add_user("me").id;
        assert!(digest_for(&store, me).await.unwrap().is_empty());
    }

    #[traced_test]
    #[test]
    fn shares_from_unknown_senders_are_left_out() {
        let share = DirectShare {
            id: 1,
            sender_id: 77,
            receiver_id: 2,
            recipe_id: 3,
            message: None,
            shared_at: at(1),
            is_read: false,
        };

        let digest = build_digest(vec![share], &HashMap::new(), &HashMap::new());
        assert!(digest.is_empty());
        assert!(logs_contain("missing from the directory"));
    }

    #[test]
    fn last_shared_is_the_newest_share_not_the_highest_id() {
        let sender = User {
            id: 5,
            username: "eve".into(),
            email: "eve@example.com".into(),
            date_joined: at(0),
        };
        let share = |id: i32, minutes: i64| DirectShare {
            id,
            sender_id: 5,
            receiver_id: 1,
            recipe_id: 100,
            message: None,
            shared_at: at(minutes),
            is_read: true,
        };

        let digest = build_digest(
            vec![share(2, 10), share(1, 50)],
            &HashMap::from([(5, sender)]),
            &HashMap::new(),
        );
        assert_eq!(digest[0].last_shared, Some(at(50)));
        assert_eq!(digest[0].unread_count, 0);
        assert_eq!(digest[0].total_shared, 2);
    }
}
