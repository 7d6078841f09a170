use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::auth::Credential;

/// Host-supplied persistence for the access token.
///
/// Both capabilities are best-effort from the client's perspective:
/// a load error counts as a cache miss and a store error never fails
/// the call that obtained the token. Implementations backed by shared
/// storage must provide their own internal consistency; the client
/// issues independent load/store calls with no transactional wrapping.
pub trait TokenStore: Send + Sync {
    /// Return the cached credential, or `None` if nothing usable is
    /// cached. Expiry is the caller's concern, not the store's.
    fn load(&self) -> Result<Option<Credential>>;

    /// Persist a freshly obtained credential, replacing any previous one.
    fn store(&self, credential: &Credential) -> Result<()>;
}

/// Process-local token store.
///
/// Keeps the credential in a mutex-guarded slot. Suitable for hosts
/// without durable storage and for tests; tokens do not survive a
/// process restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credential>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("token store mutex poisoned"))?;
        Ok(slot.clone())
    }

    fn store(&self, credential: &Credential) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("token store mutex poisoned"))?;
        *slot = Some(credential.clone());
        Ok(())
    }
}
