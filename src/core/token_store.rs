use crate::core::Storage;
use crate::domain::model::Credentials;
use crate::utils::error::{EtlError, Result};

/// Credentials file on top of a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct TokenStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> TokenStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn exists(&self) -> bool {
        self.storage.exists(&self.file_name).await
    }

    pub async fn load(&self) -> Result<Credentials> {
        let raw = self.storage.read_file(&self.file_name).await?;
        serde_json::from_slice(&raw).map_err(|e| {
            EtlError::auth(format!(
                "Failed to load credentials from {}: {}",
                self.file_name, e
            ))
        })
    }

    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        let json = serde_json::to_vec(credentials)?;
        self.storage.write_file(&self.file_name, &json).await?;
        tracing::debug!("Credentials written to {}", self.file_name);
        Ok(())
    }

    /// Overwrites the file with credentials handed in from outside (CI secrets).
    pub async fn seed(&self, raw: &str) -> Result<Credentials> {
        let credentials: Credentials = serde_json::from_str(raw)
            .map_err(|e| EtlError::auth(format!("seeded credentials are not valid: {}", e)))?;
        self.save(&credentials).await?;
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    fn creds() -> Credentials {
        Credentials {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(LocalStorage::new(dir.path()), ".strava-credentials");

        assert!(!store.exists().await);
        store.save(&creds()).await.unwrap();
        assert!(store.exists().await);
        assert_eq!(store.load().await.unwrap(), creds());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_auth_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".strava-credentials"), "not json").unwrap();
        let store = TokenStore::new(LocalStorage::new(dir.path()), ".strava-credentials");

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, EtlError::AuthError { .. }));
    }

    #[tokio::test]
    async fn test_seed_rejects_garbage_and_keeps_file_absent() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(LocalStorage::new(dir.path()), ".strava-credentials");

        assert!(store.seed("{\"access_token\": 1}").await.is_err());
        assert!(!store.exists().await);

        let seeded = store
            .seed(r#"{"access_token":"a","refresh_token":"r","expires_at":1700000000,"athlete":{}}"#)
            .await
            .unwrap();
        assert_eq!(seeded, creds());
        assert_eq!(store.load().await.unwrap(), creds());
    }
}
