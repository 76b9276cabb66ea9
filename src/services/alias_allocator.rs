use std::sync::Arc;

use crate::error::StoreError;
use crate::repository::UrlStore;

/// Hands out URL aliases from the store's atomic sequence.
#[derive(Clone)]
pub struct AliasAllocator {
    store: Arc<dyn UrlStore>,
}

impl AliasAllocator {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Brings the sequence up to the highest alias already stored and returns
    /// that alias (0 for an empty store). Run once at startup, before serving.
    pub async fn recover(&self) -> Result<i64, StoreError> {
        let max_alias = self
            .store
            .find_max_alias()
            .await?
            .map(|record| record.alias)
            .unwrap_or(0);

        self.store.seed_sequence(max_alias).await?;
        Ok(max_alias)
    }

    /// Returns the next alias. Concurrent callers always get distinct values.
    pub async fn next_alias(&self) -> Result<i64, StoreError> {
        self.store.advance_sequence().await
    }
}
