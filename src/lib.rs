// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod services;
pub mod store;
