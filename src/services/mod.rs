// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod digest;
pub mod feed;
pub mod follows;
pub mod notifications;
pub mod recipes;
pub mod sharing;
