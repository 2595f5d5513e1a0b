use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot, FORMAT_VERSION};
use banktabs_core::{BankTabsError, BankTabsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// JSON file-based persistence store
/// Implements the PersistenceStore trait for JSON file operations
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// Wrapper structure for the JSON file format
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: serde_json::Value,
}

impl JsonEnvelope {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let envelope: Self = serde_json::from_slice(bytes).ok()?;
        (envelope.version == FORMAT_VERSION).then_some(envelope)
    }
}

impl JsonFileStore {
    /// Create a new JSON file store
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    /// Create a new JSON file store with a specific instance ID
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
        }
    }

    /// Get the instance ID for this store
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Wrap a blob in a snapshot stamped with this instance.
    pub fn snapshot(&self, blob: &str) -> StoreSnapshot {
        StoreSnapshot {
            data: blob.as_bytes().to_vec(),
            metadata: PersistenceMetadata::new(self.instance_id),
        }
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> BankTabsResult<PersistenceMetadata> {
        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data_value: serde_json::Value = serde_json::from_slice(&snapshot.data)
            .map_err(|e| BankTabsError::Serialization(e.to_string()))?;
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: snapshot.metadata.clone(),
            data: data_value,
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| BankTabsError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );

        Ok(snapshot.metadata)
    }

    /// Files without a recognised envelope are handed back raw, so a bare
    /// tab map or a damaged file still reaches the domain's recovery path.
    async fn load(&self) -> BankTabsResult<StoreSnapshot> {
        let file_bytes = AtomicWriter::read_all(&self.path).await?;

        let snapshot = match JsonEnvelope::parse(&file_bytes) {
            Some(envelope) => {
                let data = serde_json::to_vec(&envelope.data)
                    .map_err(|e| BankTabsError::Serialization(e.to_string()))?;
                StoreSnapshot {
                    data,
                    metadata: envelope.metadata,
                }
            }
            None => {
                tracing::warn!(
                    "{} has no v{} envelope, passing contents through",
                    self.path.display(),
                    FORMAT_VERSION
                );
                StoreSnapshot {
                    data: file_bytes.clone(),
                    metadata: PersistenceMetadata::unversioned(),
                }
            }
        };

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );

        Ok(snapshot)
    }

    async fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tabs.json");
        let store = JsonFileStore::new(&file_path);

        let data = json!({ "version": 1, "groups": { "All": ["*"] }, "ordering": ["All"] });
        let snapshot = store.snapshot(&data.to_string());

        let metadata = store.save(snapshot).await.unwrap();
        assert_eq!(metadata.format_version, FORMAT_VERSION);
        assert!(file_path.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.metadata.instance_id, store.instance_id());

        let loaded_data: serde_json::Value = serde_json::from_slice(&loaded.data).unwrap();
        assert_eq!(loaded_data, data);
    }

    #[tokio::test]
    async fn test_bare_file_is_passed_through() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tabs.json");
        tokio::fs::write(&file_path, br#"{"Food": ["bread"]}"#)
            .await
            .unwrap();

        let store = JsonFileStore::new(&file_path);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.blob(), r#"{"Food": ["bread"]}"#);
        assert_eq!(loaded.metadata.format_version, 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_passed_through() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tabs.json");
        tokio::fs::write(&file_path, b"{oops").await.unwrap();

        let store = JsonFileStore::new(&file_path);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.data, b"{oops");
    }

    #[tokio::test]
    async fn test_save_rejects_non_json_blob() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tabs.json"));
        let result = store.save(store.snapshot("not json")).await;
        assert!(result.is_err());
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nonexistent.json");
        let store = JsonFileStore::new(&file_path);

        assert!(!store.exists().await);
        store.save(store.snapshot("{}")).await.unwrap();
        assert!(store.exists().await);
    }
}
