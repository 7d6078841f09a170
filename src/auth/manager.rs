//! Access token lifecycle: cache check, refresh on miss, best-effort
//! persistence.
//!
//! One `TokenManager` owns one (app_id, secret) identity and at most
//! one injected [`TokenStore`]. Refresh is attempted exactly once per
//! call and never retried here; concurrent callers sharing a store may
//! each observe a miss and each perform an exchange (at-least-once
//! refresh). A caller wanting single-flight behavior must add its own
//! mutual exclusion around the manager.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::{response, ClientError};
use crate::cache::TokenStore;

use super::{ClientIdentity, Credential};

/// Grant type sent on the token exchange, fixed by the platform
const GRANT_TYPE: &str = "client_credential";

/// Successful token exchange payload
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: u64,
}

pub struct TokenManager {
    identity: ClientIdentity,
    http: reqwest::Client,
    token_url: String,
    store: Option<Arc<dyn TokenStore>>,
}

impl TokenManager {
    pub fn new(
        identity: ClientIdentity,
        http: reqwest::Client,
        token_url: String,
        store: Option<Arc<dyn TokenStore>>,
    ) -> Self {
        Self {
            identity,
            http,
            token_url,
            store,
        }
    }

    pub fn app_id(&self) -> &str {
        self.identity.app_id()
    }

    /// Return a currently valid access token, refreshing if the cached
    /// credential is absent or expired.
    ///
    /// Store failures are logged and swallowed: the freshly obtained
    /// token is still usable by this call even if persisting it fails.
    pub async fn access_token(&self) -> Result<String, ClientError> {
        if let Some(credential) = self.cached() {
            debug!(app_id = %self.identity.app_id(), "using cached access token");
            return Ok(credential.access_token);
        }

        let credential = self.exchange().await?;
        debug!(
            app_id = %self.identity.app_id(),
            expires_in = credential.expires_in,
            "obtained fresh access token"
        );

        if let Some(store) = &self.store {
            if let Err(err) = store.store(&credential) {
                warn!(error = %err, "failed to persist access token, continuing");
            }
        }

        Ok(credential.access_token)
    }

    /// Load the cached credential if one exists and is still valid.
    /// No store, an empty store, a load error, and an expired
    /// credential are all the same thing: a cache miss.
    fn cached(&self) -> Option<Credential> {
        let store = self.store.as_ref()?;
        match store.load() {
            Ok(Some(credential)) if credential.is_valid() => Some(credential),
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "token store load failed, treating as cache miss");
                None
            }
        }
    }

    /// Perform the remote client-credentials exchange. Attempted once;
    /// any retry policy belongs to the host application.
    async fn exchange(&self) -> Result<Credential, ClientError> {
        let params = [
            ("grant_type", GRANT_TYPE),
            ("appid", self.identity.app_id()),
            ("secret", self.identity.secret()),
        ];

        let body = self
            .http
            .get(&self.token_url)
            .query(&params)
            .send()
            .await?
            .text()
            .await?;

        let grant: TokenGrant = response::validate_as(&body)?;
        Ok(Credential::new(grant.access_token, grant.expires_in))
    }
}
