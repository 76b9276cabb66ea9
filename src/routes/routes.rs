use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{create_short_url, list_urls, redirect_to_url};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health/check", web::get().to(health_check));
    cfg.service(
        web::scope("/api/shorturl")
            .route("/new", web::post().to(create_short_url))
            // Must precede the alias route so `list` is not read as an alias.
            .route("/list", web::get().to(list_urls))
            .route("/{short}", web::get().to(redirect_to_url)),
    );
}
