use std::sync::Arc;

use log::info;

use crate::error::StoreError;
use crate::repository::UrlStore;
use crate::services::{AliasAllocator, ListingService, RedirectResolver, ShortenService};

/// Shared state handed to every handler through `web::Data`.
pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub shortener: ShortenService,
    pub resolver: RedirectResolver,
    pub listing: ListingService,
    pub strict_status_codes: bool,
}

impl AppState {
    /// Wires the services around `store` and recovers the alias sequence.
    pub async fn initialize(
        store: Arc<dyn UrlStore>,
        strict_status_codes: bool,
    ) -> Result<Self, StoreError> {
        let allocator = AliasAllocator::new(store.clone());
        let max_alias = allocator.recover().await?;
        info!("Alias sequence recovered, highest stored alias is {}", max_alias);

        Ok(Self {
            shortener: ShortenService::new(store.clone(), allocator),
            resolver: RedirectResolver::new(store.clone()),
            listing: ListingService::new(store.clone()),
            store,
            strict_status_codes,
        })
    }
}
