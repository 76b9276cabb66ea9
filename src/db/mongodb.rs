use log::{info, warn};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::repository::MongoUrlStore;

const DEFAULT_DATABASE: &str = "shorturl";

/// Opens a client for `uri` and checks the server answers a ping.
///
/// The database is `name` if given, else the one named in the URI, else
/// `shorturl`. The caller owns the returned client and must shut it down.
pub async fn get_database(
    uri: &str,
    name: Option<&str>,
) -> mongodb::error::Result<(Client, Database)> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    let db = match name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };

    db.run_command(doc! { "ping": 1 }).await?;
    info!("Connected to DB {}", db.name());

    Ok((client, db))
}

/// Builds the store over `db`, creating its unique indexes when possible.
///
/// Index creation fails on data written before the indexes existed if it
/// already holds duplicates; the service still starts in that case.
pub async fn open_store(db: &Database) -> MongoUrlStore {
    let store = MongoUrlStore::new(db);
    if let Err(e) = store.ensure_indexes().await {
        warn!("Could not create unique indexes on shorturls: {}", e);
    }
    store
}
