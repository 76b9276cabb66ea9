use std::sync::Arc;

use crate::error::StoreError;
use crate::models::url::UrlRecord;
use crate::repository::UrlStore;

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn UrlStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// All records, ascending by alias.
    pub async fn list(&self) -> Result<Vec<UrlRecord>, StoreError> {
        self.store.list_all_ordered_by_alias().await
    }
}
