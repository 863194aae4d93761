// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

//! Extractors whose rejections render through [`AppError`], so malformed
//! bodies and path ids get the same `{"error", "detail"}` shape as every
//! other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
