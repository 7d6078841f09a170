use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::auth::Credential;

use super::TokenStore;

/// Credential file name inside the store directory
const CREDENTIAL_FILE: &str = "credential.json";

/// File-backed token store.
///
/// Persists the credential as pretty-printed JSON so the token
/// survives process restarts and can be shared by cooperating
/// processes on the same host. A missing file is simply a cache miss.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the credential under `dir/credential.json`
    pub fn new(dir: PathBuf) -> Self {
        Self {
            path: dir.join(CREDENTIAL_FILE),
        }
    }

    /// Remove any persisted credential; the next load is a miss
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let credential: Credential = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(Some(credential))
    }

    fn store(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());

        let credential = Credential::new("abc".to_string(), 7200);
        store.store(&credential).unwrap();

        let loaded = store.load().unwrap().expect("credential should persist");
        assert_eq!(loaded.access_token, "abc");
        assert_eq!(loaded.expires_in, 7200);
        assert_eq!(loaded.issued_at, credential.issued_at);
    }

    #[test]
    fn test_expired_credential_still_loads() {
        // Validity is the token manager's concern, not the store's
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());

        let credential = Credential {
            access_token: "stale".to_string(),
            expires_in: 1,
            issued_at: chrono::Utc::now() - chrono::Duration::hours(3),
        };
        store.store(&credential).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(!loaded.is_valid());
    }

    #[test]
    fn test_corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("credential.json"), "not json").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_clear_removes_credential() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().to_path_buf());

        store.store(&Credential::new("abc".to_string(), 7200)).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
