pub mod memory_store;
pub mod mongo_store;

pub use memory_store::InMemoryUrlStore;
pub use mongo_store::MongoUrlStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::url::UrlRecord;

/// Storage contract shared by the MongoDB and in-memory backends.
///
/// Implementations enforce uniqueness of both `url` and `alias`; a violating
/// insert fails with [`StoreError::DuplicateKey`]. Nothing here retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    async fn insert(&self, record: &UrlRecord) -> Result<(), StoreError>;

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, StoreError>;

    async fn find_by_alias(&self, alias: i64) -> Result<Option<UrlRecord>, StoreError>;

    /// Returns the record holding the highest alias, or `None` when empty.
    async fn find_max_alias(&self) -> Result<Option<UrlRecord>, StoreError>;

    async fn list_all_ordered_by_alias(&self) -> Result<Vec<UrlRecord>, StoreError>;

    /// Atomically increments the alias sequence and returns the new value.
    async fn advance_sequence(&self) -> Result<i64, StoreError>;

    /// Raises the alias sequence to at least `floor`. Never lowers it.
    async fn seed_sequence(&self, floor: i64) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
