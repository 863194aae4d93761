// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use diesel::allow_tables_to_appear_in_same_query;
use diesel::joinable;
use diesel::table;

table! {
    users (id) {
        id -> Integer,
        username -> Varchar,
        email -> Varchar,
        date_joined -> Timestamptz,
    }
}

table! {
    recipes (id) {
        id -> Integer,
        author_id -> Integer,
        title -> Varchar,
        description -> Text,
        image -> Nullable<Varchar>,
        is_ai_generated -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    follows (id) {
        id -> Integer,
        follower_id -> Integer,
        following_id -> Integer,
        created_at -> Timestamptz,
    }
}

table! {
    shared_recipes (id) {
        id -> Integer,
        sender_id -> Integer,
        recipe_id -> Integer,
        shared_at -> Timestamptz,
    }
}

table! {
    direct_shares (id) {
        id -> Integer,
        sender_id -> Integer,
        receiver_id -> Integer,
        recipe_id -> Integer,
        message -> Nullable<Text>,
        shared_at -> Timestamptz,
        is_read -> Bool,
    }
}

joinable!(recipes -> users (author_id));

allow_tables_to_appear_in_same_query!(
    users,
    recipes,
    follows,
    shared_recipes,
    direct_shares,
);
