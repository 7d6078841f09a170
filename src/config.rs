//! Client configuration: platform endpoint URLs and HTTP timeout.
//!
//! Defaults point at the production WeChat API hosts. Every URL is
//! overridable so the client can be pointed at a staging host or a
//! local mock server in tests.

use std::time::Duration;

/// Endpoint for the client-credentials access token exchange
const TOKEN_URL: &str = "https://api.weixin.qq.com/cgi-bin/token";

/// Endpoint for JS-SDK / card ticket retrieval
const TICKET_URL: &str = "https://api.weixin.qq.com/cgi-bin/ticket/getticket";

/// URL prefix shared by all merchant platform endpoints
const MERCHANT_BASE_URL: &str = "https://api.weixin.qq.com/merchant";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while still failing fast.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Access token exchange endpoint
    pub token_url: String,
    /// Ticket retrieval endpoint (jsapi / wx_card)
    pub ticket_url: String,
    /// Prefix for merchant platform endpoints
    pub merchant_base_url: String,
    /// Timeout applied to every outbound HTTP request
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            ticket_url: TICKET_URL.to_string(),
            merchant_base_url: MERCHANT_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}
