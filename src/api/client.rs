//! Request dispatcher for the WeChat Official Account API.
//!
//! Every outbound call obtains a valid access token from the token
//! manager, carries it as the `access_token` query parameter (the
//! platform places authentication in the query string for GET and POST
//! alike), and routes the response body through the shared validator.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::auth::{ClientIdentity, TokenManager};
use crate::cache::TokenStore;
use crate::config::Config;

use super::{response, ClientError};

/// Body of a POST-shaped request.
///
/// `Json` is serialized as JSON text; `Raw` is sent byte-for-byte with
/// no encoding at all, which is what the platform's upload endpoints
/// expect for file content.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Raw(Vec<u8>),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// API client for one (app_id, secret) pair.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
pub struct Client {
    http: reqwest::Client,
    tokens: TokenManager,
    config: Config,
}

impl Client {
    /// Create a client with default configuration and no token store;
    /// every call will perform its own token exchange.
    pub fn new(identity: ClientIdentity) -> Result<Self, ClientError> {
        Self::build(identity, Config::default(), None)
    }

    /// Create a client with custom endpoints/timeout
    pub fn with_config(identity: ClientIdentity, config: Config) -> Result<Self, ClientError> {
        Self::build(identity, config, None)
    }

    /// Create a client whose token manager caches credentials through
    /// the given store
    pub fn with_store(
        identity: ClientIdentity,
        config: Config,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        Self::build(identity, config, Some(store))
    }

    fn build(
        identity: ClientIdentity,
        config: Config,
        store: Option<Arc<dyn TokenStore>>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let tokens = TokenManager::new(identity, http.clone(), config.token_url.clone(), store);
        Ok(Self {
            http,
            tokens,
            config,
        })
    }

    pub fn app_id(&self) -> &str {
        self.tokens.app_id()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    // ===== Request entry points =====

    /// GET with query parameters
    pub async fn get(&self, uri: &str, query: &[(&str, &str)]) -> Result<Value, ClientError> {
        self.request(uri, None, query).await
    }

    /// POST with a body and no extra query parameters
    pub async fn post(&self, uri: &str, body: RequestBody) -> Result<Value, ClientError> {
        self.request(uri, Some(body), &[]).await
    }

    /// General form: optional body plus query parameters.
    ///
    /// The call is a POST when a body is present and a GET otherwise;
    /// `access_token` is merged into the query string in both cases.
    /// A token manager failure propagates unchanged without attempting
    /// the call.
    pub async fn request(
        &self,
        uri: &str,
        body: Option<RequestBody>,
        query: &[(&str, &str)],
    ) -> Result<Value, ClientError> {
        let token = self.tokens.access_token().await?;

        let mut params: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        params.push(("access_token".to_string(), token));

        debug!(uri, post = body.is_some(), "dispatching API request");

        let builder = match body {
            None => self.http.get(uri),
            Some(RequestBody::Json(value)) => self.http.post(uri).json(&value),
            Some(RequestBody::Raw(bytes)) => self.http.post(uri).body(bytes),
        };

        let text = builder.query(&params).send().await?.text().await?;
        response::validate(&text)
    }
}
