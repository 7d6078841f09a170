//! Token persistence ports.
//!
//! The client never requires a cache; without one every call refreshes
//! the token (correct, just less efficient). Hosts inject a store per
//! client instance:
//! - `MemoryTokenStore`: process-local, mutex-guarded slot
//! - `FileTokenStore`: JSON file shared across restarts
//! - any custom `TokenStore` (shared cache, database, ...)

pub mod file;
pub mod store;

pub use file::FileTokenStore;
pub use store::{MemoryTokenStore, TokenStore};
