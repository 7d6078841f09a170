//! Response validation: the single normalization path for every body
//! the platform returns.
//!
//! The platform signals logical failures in-band: a JSON object with a
//! nonzero `errcode` and an `errmsg`, usually alongside HTTP 200. Both
//! the token exchange and every ordinary API call run through
//! [`validate`], so error surfacing behaves identically everywhere.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ClientError;

/// Parse a raw response body and normalize platform errors.
///
/// Returns the parsed payload unchanged on success. A present,
/// non-zero `errcode` always wins over any success-shaped fields
/// beside it; `errmsg` may be absent and defaults to an empty string.
pub fn validate(body: &str) -> Result<Value, ClientError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

    if let Some(errcode) = payload.get("errcode") {
        let code = errcode.as_i64().ok_or_else(|| {
            ClientError::MalformedResponse(format!("non-integer errcode: {}", errcode))
        })?;
        if code != 0 {
            let message = payload
                .get("errmsg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ClientError::Api { code, message });
        }
    }

    Ok(payload)
}

/// Validate a response body and decode the payload into `T`.
pub fn validate_as<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let payload = validate(body)?;
    serde_json::from_value(payload).map_err(|err| ClientError::MalformedResponse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_becomes_api_error() {
        let body = r#"{"errcode":40001,"errmsg":"invalid credential"}"#;
        match validate(body) {
            Err(ClientError::Api { code, message }) => {
                assert_eq!(code, 40001);
                assert_eq!(message, "invalid credential");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_errcode_is_success() {
        let body = r#"{"errcode":0,"errmsg":"ok"}"#;
        let payload = validate(body).expect("errcode 0 should be success");
        assert_eq!(payload["errmsg"], "ok");
    }

    #[test]
    fn test_missing_errcode_is_success() {
        let body = r#"{"access_token":"abc","expires_in":7200}"#;
        let payload = validate(body).expect("body without errcode should pass");
        assert_eq!(payload["access_token"], "abc");
    }

    #[test]
    fn test_missing_errmsg_defaults_to_empty() {
        let body = r#"{"errcode":41001}"#;
        match validate(body) {
            Err(ClientError::Api { code, message }) => {
                assert_eq!(code, 41001);
                assert_eq!(message, "");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_wins_over_success_shaped_fields() {
        let body = r#"{"access_token":"abc","errcode":42001,"errmsg":"token expired"}"#;
        assert!(matches!(
            validate(body),
            Err(ClientError::Api { code: 42001, .. })
        ));
    }

    #[test]
    fn test_unparseable_body_is_malformed() {
        assert!(matches!(
            validate("<html>502 Bad Gateway</html>"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_integer_errcode_is_malformed() {
        assert!(matches!(
            validate(r#"{"errcode":"40001"}"#),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_validate_as_decodes_typed_payload() {
        #[derive(serde::Deserialize)]
        struct Grant {
            access_token: String,
            expires_in: u64,
        }

        let body = r#"{"access_token":"abc","expires_in":7200}"#;
        let grant: Grant = validate_as(body).expect("typed decode should succeed");
        assert_eq!(grant.access_token, "abc");
        assert_eq!(grant.expires_in, 7200);
    }
}
