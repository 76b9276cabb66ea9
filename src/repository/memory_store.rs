use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::url::UrlRecord;
use crate::repository::UrlStore;

/// Process-local [`UrlStore`], used with `STORAGE=memory` and in tests.
///
/// Records are keyed by alias, so iteration order is alias order.
#[derive(Debug, Default)]
pub struct InMemoryUrlStore {
    records: RwLock<BTreeMap<i64, UrlRecord>>,
    sequence: AtomicI64,
}

impl InMemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn insert(&self, record: &UrlRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        if records.contains_key(&record.alias) || records.values().any(|r| r.url == record.url) {
            return Err(StoreError::DuplicateKey(record.url.clone()));
        }

        records.insert(record.alias, record.clone());
        Ok(())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.values().find(|r| r.url == url).cloned())
    }

    async fn find_by_alias(&self, alias: i64) -> Result<Option<UrlRecord>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&alias).cloned())
    }

    async fn find_max_alias(&self) -> Result<Option<UrlRecord>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.values().next_back().cloned())
    }

    async fn list_all_ordered_by_alias(&self) -> Result<Vec<UrlRecord>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.values().cloned().collect())
    }

    async fn advance_sequence(&self) -> Result<i64, StoreError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn seed_sequence(&self, floor: i64) -> Result<(), StoreError> {
        self.sequence.fetch_max(floor, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
