use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The (app_id, secret) pair identifying the calling application.
///
/// Immutable for the lifetime of a client instance. The secret leaves
/// the process only inside the token exchange request; `Debug` redacts
/// it so it cannot end up in logs.
#[derive(Clone)]
pub struct ClientIdentity {
    app_id: String,
    secret: String,
}

impl ClientIdentity {
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("app_id", &self.app_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// One access token grant.
///
/// Created only by a successful exchange, never mutated afterwards; a
/// refresh produces a new `Credential` that supersedes this one.
/// Serializable because the token store round-trips it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Lifetime in seconds, as declared by the exchange response
    pub expires_in: u64,
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            expires_in,
            issued_at: Utc::now(),
        }
    }

    /// Valid at `now` iff `now - issued_at < expires_in`.
    /// Checked before every use, never assumed.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        (now - self.issued_at).num_seconds() < self.expires_in as i64
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
