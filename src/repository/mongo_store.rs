use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::error::StoreError;
use crate::models::counter::{ALIAS_SEQUENCE, Counter};
use crate::models::url::UrlRecord;
use crate::repository::UrlStore;

pub const URLS_COLLECTION: &str = "shorturls";
pub const COUNTERS_COLLECTION: &str = "counters";

/// [`UrlStore`] backed by MongoDB collections.
///
/// Aliases come from a counter document advanced with `$inc`, so two
/// concurrent requests can never be handed the same value.
#[derive(Clone)]
pub struct MongoUrlStore {
    db: Database,
    urls: Collection<UrlRecord>,
    counters: Collection<Counter>,
}

impl MongoUrlStore {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            urls: db.collection::<UrlRecord>(URLS_COLLECTION),
            counters: db.collection::<Counter>(COUNTERS_COLLECTION),
        }
    }

    /// Creates the unique indexes on `url` and `shortUrl`.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for key in ["url", "shortUrl"] {
            let mut keys = Document::new();
            keys.insert(key, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.urls.create_index(index).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UrlStore for MongoUrlStore {
    async fn insert(&self, record: &UrlRecord) -> Result<(), StoreError> {
        self.urls
            .insert_one(record)
            .await
            .map_err(|e| StoreError::from_write(e, record.url.clone()))?;
        Ok(())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.urls.find_one(doc! { "url": url }).await?)
    }

    async fn find_by_alias(&self, alias: i64) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.urls.find_one(doc! { "shortUrl": alias }).await?)
    }

    async fn find_max_alias(&self) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self
            .urls
            .find_one(doc! {})
            .sort(doc! { "shortUrl": -1 })
            .await?)
    }

    async fn list_all_ordered_by_alias(&self) -> Result<Vec<UrlRecord>, StoreError> {
        let records = self
            .urls
            .find(doc! {})
            .sort(doc! { "shortUrl": 1 })
            .await?
            .try_collect::<Vec<UrlRecord>>()
            .await?;
        Ok(records)
    }

    async fn advance_sequence(&self) -> Result<i64, StoreError> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": ALIAS_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        counter
            .map(|c| c.seq)
            .ok_or(StoreError::SequenceUnavailable)
    }

    async fn seed_sequence(&self, floor: i64) -> Result<(), StoreError> {
        self.counters
            .update_one(
                doc! { "_id": ALIAS_SEQUENCE },
                doc! { "$max": { "seq": floor } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
