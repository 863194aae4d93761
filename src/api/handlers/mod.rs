// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod feed;
pub mod health;
pub mod notifications;
pub mod recipes;
pub mod shares;
pub mod social_graph;
