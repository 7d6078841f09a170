//! Request dispatch for the WeChat Official Account API.
//!
//! This module provides:
//! - `Client`: the request dispatcher (GET/POST/general form)
//! - `response`: the single validation path for every response body
//! - `ClientError`: the closed set of failures callers can observe
//!
//! The platform authenticates every call via an `access_token` query
//! parameter and reports logical failures in-band as `errcode`/`errmsg`.

pub mod client;
pub mod error;
pub mod response;

pub use client::{Client, RequestBody};
pub use error::ClientError;
