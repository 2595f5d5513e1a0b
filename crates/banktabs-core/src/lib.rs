pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use config::{AppConfig, Appearance};
pub use error::BankTabsError;
pub use result::BankTabsResult;
pub use traits::{BlobStore, MemoryBlobStore};
