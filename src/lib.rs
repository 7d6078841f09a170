//! WeChat Official Account API client.
//!
//! The platform requires a short-lived `access_token` obtained through
//! a client-credentials exchange, carried as a query parameter on every
//! call, with logical failures reported in-band as `errcode`/`errmsg`.
//! This crate owns that lifecycle so endpoint code does not have to:
//!
//! - `auth` — credential acquisition, expiry checking, transparent refresh
//! - `cache` — injectable token persistence (memory, file, or host-supplied)
//! - `api` — request dispatch and uniform response validation
//! - `jsapi` — JS-SDK tickets and signature packages
//! - `merchant` — merchant platform image upload
//!
//! ```no_run
//! use std::sync::Arc;
//! use wechat_client::{Client, ClientIdentity, Config, FileTokenStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let identity = ClientIdentity::new("wx1234567890", "app-secret");
//! let store = Arc::new(FileTokenStore::new("/var/cache/myapp".into()));
//! let client = Client::with_store(identity, Config::default(), store)?;
//!
//! let menu = client
//!     .get("https://api.weixin.qq.com/cgi-bin/menu/get", &[])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod jsapi;
pub mod merchant;

pub use api::{Client, ClientError, RequestBody};
pub use auth::{ClientIdentity, Credential, TokenManager};
pub use cache::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use config::Config;
pub use jsapi::{SignPackage, Ticket, TicketType};
