//! `Path` and `Query` extractors whose rejections render as [`ApiError`].
//!
//! Handlers use these instead of axum's so that a malformed id or `?now=`
//! comes back as `{"error": ...}` like every other failure.

use axum::extract::FromRequestParts;

use crate::error::ApiError;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);
