use std::sync::Arc;

use log::{debug, info};

use crate::error::StoreError;
use crate::models::url::UrlRecord;
use crate::repository::UrlStore;
use crate::services::AliasAllocator;
use crate::utils::url_validation::is_shortenable;

/// Result of a shorten request that reached a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortenOutcome {
    Created(UrlRecord),
    /// The URL was already stored; no alias was consumed for it.
    Existing(UrlRecord),
    InvalidUrl,
}

impl ShortenOutcome {
    pub fn record(&self) -> Option<&UrlRecord> {
        match self {
            ShortenOutcome::Created(record) | ShortenOutcome::Existing(record) => Some(record),
            ShortenOutcome::InvalidUrl => None,
        }
    }
}

/// Validates URLs, deduplicates them and stores new records.
#[derive(Clone)]
pub struct ShortenService {
    store: Arc<dyn UrlStore>,
    allocator: AliasAllocator,
}

impl ShortenService {
    pub fn new(store: Arc<dyn UrlStore>, allocator: AliasAllocator) -> Self {
        Self { store, allocator }
    }

    /// Shortens `raw_url`, returning the existing record when the exact URL
    /// string is already stored.
    ///
    /// The record is persisted before this returns, so an alias handed back
    /// to a caller always resolves.
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortenOutcome, StoreError> {
        if !is_shortenable(raw_url) {
            debug!("Rejected invalid URL {:?}", raw_url);
            return Ok(ShortenOutcome::InvalidUrl);
        }

        if let Some(existing) = self.store.find_by_url(raw_url).await? {
            return Ok(ShortenOutcome::Existing(existing));
        }

        let alias = self.allocator.next_alias().await?;
        let record = UrlRecord::new(raw_url, alias);

        match self.store.insert(&record).await {
            Ok(()) => {
                info!("URL saved: {} -> {}", record.alias, record.url);
                Ok(ShortenOutcome::Created(record))
            }
            // Another request stored the same URL between our lookup and insert.
            Err(StoreError::DuplicateKey(key)) => match self.store.find_by_url(raw_url).await? {
                Some(existing) => Ok(ShortenOutcome::Existing(existing)),
                None => Err(StoreError::DuplicateKey(key)),
            },
            Err(e) => Err(e),
        }
    }
}
