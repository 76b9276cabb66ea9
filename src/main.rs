mod config;
mod db;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod services;
mod state;
mod structs;
mod utils;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use crate::config::{Config, StorageBackend};
use crate::db::mongodb::{get_database, open_store};
use crate::repository::{InMemoryUrlStore, UrlStore};
use crate::state::app_state::AppState;
use routes::init_routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().context("Invalid configuration")?;

    // The MongoDB client is opened here and shut down after the server stops.
    let (store, client) = match &config.storage {
        StorageBackend::MongoDb { uri, name } => {
            let (client, db) = get_database(uri, name.as_deref())
                .await
                .context("Error connecting to the database")?;
            let store: Arc<dyn UrlStore> = Arc::new(open_store(&db).await);
            (store, Some(client))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, records are lost on exit");
            let store: Arc<dyn UrlStore> = Arc::new(InMemoryUrlStore::new());
            (store, None)
        }
    };

    let app_state = web::Data::new(
        AppState::initialize(store, config.strict_status_codes)
            .await
            .context("Failed to recover the alias sequence")?,
    );

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        App::new()
            .wrap(logger)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    if let Some(client) = client {
        client.shutdown().await;
        info!("Database connection closed");
    }

    Ok(())
}
