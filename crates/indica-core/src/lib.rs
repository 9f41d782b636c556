//! Core types and computations for the Indica referral dashboard.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The two computations that matter are [`earnings::compute_earning`] and
//! [`summary::compute_summary`]. Both are pure: identity and "now" are always
//! passed in.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod dashboard;
pub mod earnings;
pub mod error;
pub mod format;
pub mod link;
pub mod profile;
pub mod session;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
