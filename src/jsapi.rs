//! JS-SDK support: ticket retrieval and signature packaging.
//!
//! Pages embedding the WeChat JS-SDK must present a signature computed
//! from a short-lived `jsapi` ticket, a random nonce, a timestamp, and
//! the page URL. Tickets are fetched through the ordinary dispatch
//! path; the signature is SHA-1 over the ticket fields concatenated in
//! ascending ASCII key order, as the platform requires.

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::api::{Client, ClientError};

/// Nonce length used in sign packages
const NONCE_LEN: usize = 16;

/// Which ticket to request from the ticket endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketType {
    /// JS-SDK signature ticket
    JsApi,
    /// Card coupon ticket
    WxCard,
}

impl TicketType {
    fn as_str(self) -> &'static str {
        match self {
            TicketType::JsApi => "jsapi",
            TicketType::WxCard => "wx_card",
        }
    }
}

/// Ticket grant returned by the ticket endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub ticket: String,
    pub expires_in: u64,
}

/// Everything a page needs to call `wx.config`.
/// Field names follow the JS-SDK configuration object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPackage {
    pub app_id: String,
    pub nonce_str: String,
    pub timestamp: i64,
    pub url: String,
    pub signature: String,
    /// The exact string that was signed, useful when debugging
    /// signature mismatches against the platform's validation tool
    pub raw_string: String,
}

impl Client {
    /// Fetch a ticket of the given type
    pub async fn ticket(&self, kind: TicketType) -> Result<Ticket, ClientError> {
        let url = self.config().ticket_url.clone();
        let payload = self.get(&url, &[("type", kind.as_str())]).await?;
        serde_json::from_value(payload)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))
    }

    pub async fn js_api_ticket(&self) -> Result<Ticket, ClientError> {
        self.ticket(TicketType::JsApi).await
    }

    pub async fn card_ticket(&self) -> Result<Ticket, ClientError> {
        self.ticket(TicketType::WxCard).await
    }

    /// Fetch a fresh `jsapi` ticket and build the sign package for a
    /// page URL. The URL must be the full page address without its
    /// fragment, exactly as the embedding page sees it.
    pub async fn sign_package(&self, url: &str) -> Result<SignPackage, ClientError> {
        let ticket = self.js_api_ticket().await?;
        Ok(self.sign_with_ticket(&ticket.ticket, url))
    }

    /// Build a sign package from an already-obtained ticket, e.g. one
    /// the host caches alongside the access token.
    pub fn sign_with_ticket(&self, ticket: &str, url: &str) -> SignPackage {
        let nonce_str = nonce(NONCE_LEN);
        let timestamp = Utc::now().timestamp();
        sign(self.app_id(), ticket, &nonce_str, timestamp, url)
    }
}

/// Random alphanumeric nonce
fn nonce(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn sign(app_id: &str, ticket: &str, nonce_str: &str, timestamp: i64, url: &str) -> SignPackage {
    // Keys must be concatenated in ascending ASCII order:
    // jsapi_ticket, noncestr, timestamp, url
    let raw_string = format!(
        "jsapi_ticket={}&noncestr={}&timestamp={}&url={}",
        ticket, nonce_str, timestamp, url
    );

    let mut hasher = Sha1::new();
    hasher.update(raw_string.as_bytes());
    let signature = hex::encode(hasher.finalize());

    SignPackage {
        app_id: app_id.to_string(),
        nonce_str: nonce_str.to_string(),
        timestamp,
        url: url.to_string(),
        signature,
        raw_string,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::{ClientIdentity, Credential};
    use crate::cache::MemoryTokenStore;
    use crate::config::Config;

    use super::*;

    #[test]
    fn test_signature_matches_platform_sample() {
        // Sample inputs and signature from the JS-SDK documentation
        let package = sign(
            "wx1234",
            "sM4AOVdWfPE4DxkXGEs8VMCPGGVi4C3VM0P37wVUCFvkVAy_90u5h9nbSlYy3-Sl-HhTdfl2fzFy1AOcHKP7qg",
            "Wm3WZYTPz0wzccnW",
            1414587457,
            "http://mp.weixin.qq.com?params=value",
        );

        assert_eq!(package.signature, "0f9de62fce790f9a083d5c99e95740ceb90c27ed");
        assert_eq!(
            package.raw_string,
            "jsapi_ticket=sM4AOVdWfPE4DxkXGEs8VMCPGGVi4C3VM0P37wVUCFvkVAy_90u5h9nbSlYy3-Sl-HhTdfl2fzFy1AOcHKP7qg&noncestr=Wm3WZYTPz0wzccnW&timestamp=1414587457&url=http://mp.weixin.qq.com?params=value"
        );
    }

    #[test]
    fn test_nonce_is_alphanumeric_and_sized() {
        let value = nonce(16);
        assert_eq!(value.len(), 16);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_ticket_fetch_goes_through_dispatcher() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi-bin/ticket/getticket"))
            .and(query_param("type", "jsapi"))
            .and(query_param("access_token", "T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errcode": 0,
                "errmsg": "ok",
                "ticket": "ticket-value",
                "expires_in": 7200,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            token_url: format!("{}/cgi-bin/token", server.uri()),
            ticket_url: format!("{}/cgi-bin/ticket/getticket", server.uri()),
            ..Config::default()
        };
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new(
            "T1".to_string(),
            7200,
        )));
        let client =
            Client::with_store(ClientIdentity::new("wx1234", "s3cret"), config, store).unwrap();

        let ticket = client.js_api_ticket().await.unwrap();
        assert_eq!(ticket.ticket, "ticket-value");
        assert_eq!(ticket.expires_in, 7200);
    }

    #[tokio::test]
    async fn test_card_ticket_requests_wx_card_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cgi-bin/ticket/getticket"))
            .and(query_param("type", "wx_card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errcode": 0,
                "errmsg": "ok",
                "ticket": "card-ticket",
                "expires_in": 7200,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config {
            token_url: format!("{}/cgi-bin/token", server.uri()),
            ticket_url: format!("{}/cgi-bin/ticket/getticket", server.uri()),
            ..Config::default()
        };
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::new(
            "T1".to_string(),
            7200,
        )));
        let client =
            Client::with_store(ClientIdentity::new("wx1234", "s3cret"), config, store).unwrap();

        let ticket = client.card_ticket().await.unwrap();
        assert_eq!(ticket.ticket, "card-ticket");
    }
}
