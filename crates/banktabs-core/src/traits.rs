use crate::BankTabsResult;

/// Key-value slot holding the persisted tab state as one opaque blob.
///
/// Reads and writes are synchronous from the caller's point of view; an
/// implementation that talks to slow storage is expected to buffer.
pub trait BlobStore {
    /// The last saved blob, or `None` if nothing was ever saved.
    fn load_blob(&self) -> Option<String>;

    fn save_blob(&mut self, blob: &str) -> BankTabsResult<()>;
}

/// In-memory blob slot, used as the write-through mirror of a file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blob: Option<String>,
    writes: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    /// Number of saves since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load_blob(&self) -> Option<String> {
        self.blob.clone()
    }

    fn save_blob(&mut self, blob: &str) -> BankTabsResult<()> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn load_blob(&self) -> Option<String> {
        (**self).load_blob()
    }

    fn save_blob(&mut self, blob: &str) -> BankTabsResult<()> {
        (**self).save_blob(blob)
    }
}
