//! Credential lifecycle for the client-credentials exchange.
//!
//! This module provides:
//! - `ClientIdentity`: the (app_id, secret) pair, secret never logged
//! - `Credential`: one access token grant with expiry arithmetic
//! - `TokenManager`: cache check, refresh on miss, best-effort store

pub mod credential;
pub mod manager;

pub use credential::{ClientIdentity, Credential};
pub use manager::TokenManager;
