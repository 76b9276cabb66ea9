use actix_web::{Either, HttpResponse, Responder, Result, http, web};
use log::{debug, error};

use crate::services::Resolution;
use crate::state::app_state::AppState;
use crate::structs::url_request::{ErrorResponse, ShortenRequest, ShortenResponse, UrlListEntry};

const INVALID_URL: &str = "invalid URL";
const SHORTCUT_NOT_FOUND: &str = "shortcut not found";

/// Error payload for a client mistake. Sent as 200 unless strict status codes
/// are enabled, in which case `strict_status` is used.
fn client_error(state: &AppState, strict_status: http::StatusCode, message: &str) -> HttpResponse {
    let status = if state.strict_status_codes {
        strict_status
    } else {
        http::StatusCode::OK
    };
    HttpResponse::build(status).json(ErrorResponse::new(message))
}

/// Create a shortened URL
///
/// A body that cannot be read as JSON or a form, or whose `url` is not a
/// string, is answered the same way as a malformed URL.
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    body: Result<Either<web::Json<ShortenRequest>, web::Form<ShortenRequest>>, actix_web::Error>,
) -> Result<impl Responder> {
    let req = match body {
        Ok(Either::Left(json)) => json.into_inner(),
        Ok(Either::Right(form)) => form.into_inner(),
        Err(e) => {
            debug!("Unreadable shorten request body: {}", e);
            return Ok(client_error(
                &app_state,
                http::StatusCode::BAD_REQUEST,
                INVALID_URL,
            ));
        }
    };

    let outcome = app_state.shortener.shorten(&req.url).await.map_err(|e| {
        error!("Failed to shorten {:?}: {}", req.url, e);
        e
    })?;

    match outcome.record() {
        Some(record) => Ok(HttpResponse::Ok().json(ShortenResponse::from(record))),
        None => Ok(client_error(
            &app_state,
            http::StatusCode::BAD_REQUEST,
            INVALID_URL,
        )),
    }
}

/// List every shortcut in alias order
pub async fn list_urls(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let records = app_state.listing.list().await.map_err(|e| {
        error!("Failed to list URLs: {}", e);
        e
    })?;

    let entries: Vec<UrlListEntry> = records.into_iter().map(UrlListEntry::from).collect();
    Ok(HttpResponse::Ok().json(entries))
}

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let short = path.into_inner();

    let resolution = app_state.resolver.resolve(&short).await.map_err(|e| {
        error!("Failed to resolve alias {:?}: {}", short, e);
        e
    })?;

    match resolution {
        Resolution::Found(record) => Ok(HttpResponse::Found()
            .append_header((http::header::LOCATION, record.url))
            .finish()),
        Resolution::NotFound => Ok(client_error(
            &app_state,
            http::StatusCode::NOT_FOUND,
            SHORTCUT_NOT_FOUND,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::url::UrlRecord;
    use crate::repository::{InMemoryUrlStore, MockUrlStore, UrlStore};
    use crate::routes::init_routes;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn memory_state(strict: bool) -> web::Data<AppState> {
        let store: Arc<dyn UrlStore> = Arc::new(InMemoryUrlStore::new());
        web::Data::new(AppState::initialize(store, strict).await.unwrap())
    }

    fn shorten_request(url: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/shorturl/new")
            .set_json(json!({ "url": url }))
    }

    #[actix_web::test]
    async fn shorten_returns_alias_and_is_idempotent() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let first: Value =
            test::call_and_read_body_json(&app, shorten_request("https://example.com").to_request())
                .await;
        let second: Value =
            test::call_and_read_body_json(&app, shorten_request("https://example.com").to_request())
                .await;

        assert_eq!(first, json!({ "originalURL": "https://example.com", "shortURL": 1 }));
        assert_eq!(second, first);
    }

    #[actix_web::test]
    async fn distinct_urls_get_increasing_aliases() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let a: Value =
            test::call_and_read_body_json(&app, shorten_request("https://a.com").to_request()).await;
        let b: Value =
            test::call_and_read_body_json(&app, shorten_request("https://b.com").to_request()).await;

        assert_eq!(a["shortURL"], 1);
        assert_eq!(b["shortURL"], 2);
    }

    #[actix_web::test]
    async fn form_body_is_accepted() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/shorturl/new")
            .set_form([("url", "https://form.example.com")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({ "originalURL": "https://form.example.com", "shortURL": 1 })
        );
    }

    #[actix_web::test]
    async fn invalid_or_missing_url_is_reported_with_200() {
        let state = memory_state(false).await;
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let resp = test::call_service(&app, shorten_request("example.com").to_request()).await;
        assert_eq!(resp.status(), http::StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "invalid URL" }));

        let missing = test::TestRequest::post()
            .uri("/api/shorturl/new")
            .set_json(json!({ "link": "https://example.com" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, missing).await;
        assert_eq!(body, json!({ "error": "invalid URL" }));

        assert!(state.listing.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn unreadable_bodies_are_reported_as_invalid_url() {
        for strict in [false, true] {
            let state = memory_state(strict).await;
            let app =
                test::init_service(App::new().app_data(state.clone()).configure(init_routes))
                    .await;
            let expected_status = if strict {
                http::StatusCode::BAD_REQUEST
            } else {
                http::StatusCode::OK
            };

            let requests = vec![
                test::TestRequest::post()
                    .uri("/api/shorturl/new")
                    .set_json(json!({ "url": null })),
                test::TestRequest::post()
                    .uri("/api/shorturl/new")
                    .set_json(json!({ "url": 123 })),
                test::TestRequest::post()
                    .uri("/api/shorturl/new")
                    .insert_header((http::header::CONTENT_TYPE, "text/plain"))
                    .set_payload("https://example.com"),
                test::TestRequest::post()
                    .uri("/api/shorturl/new")
                    .insert_header((http::header::CONTENT_TYPE, "application/json"))
                    .set_payload("{not json"),
            ];

            for req in requests {
                let resp = test::call_service(&app, req.to_request()).await;
                assert_eq!(resp.status(), expected_status);
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body, json!({ "error": "invalid URL" }));
            }

            assert!(state.listing.list().await.unwrap().is_empty());
        }
    }

    #[actix_web::test]
    async fn redirect_goes_to_original_url() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let created: Value = test::call_and_read_body_json(
            &app,
            shorten_request("https://example.com/some/page?x=1").to_request(),
        )
        .await;
        let alias = created["shortURL"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/shorturl/{}", alias))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get(http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("https://example.com/some/page?x=1")
        );
    }

    #[actix_web::test]
    async fn unknown_alias_reports_not_found() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        for uri in ["/api/shorturl/42", "/api/shorturl/nope"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), http::StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "shortcut not found" }));
        }
    }

    #[actix_web::test]
    async fn list_returns_records_in_alias_order() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        for url in ["https://u1.com", "https://u2.com", "https://u3.com"] {
            test::call_service(&app, shorten_request(url).to_request()).await;
        }

        let req = test::TestRequest::get().uri("/api/shorturl/list").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!([
                { "url": "https://u1.com", "shortUrl": 1 },
                { "url": "https://u2.com", "shortUrl": 2 },
                { "url": "https://u3.com", "shortUrl": 3 },
            ])
        );
    }

    #[actix_web::test]
    async fn strict_mode_uses_client_error_statuses() {
        let state = memory_state(true).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let resp = test::call_service(&app, shorten_request("not a url").to_request()).await;
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "invalid URL" }));

        let req = test::TestRequest::get().uri("/api/shorturl/7").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn storage_failure_answers_500_instead_of_hanging() {
        let mut store = MockUrlStore::new();
        store.expect_find_max_alias().returning(|| Ok(None));
        store.expect_seed_sequence().returning(|_| Ok(()));
        store
            .expect_find_by_url()
            .returning(|_| Err(StoreError::SequenceUnavailable));
        store
            .expect_list_all_ordered_by_alias()
            .returning(|| Err(StoreError::SequenceUnavailable));
        let store: Arc<dyn UrlStore> = Arc::new(store);
        let state = web::Data::new(AppState::initialize(store, false).await.unwrap());
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let resp = test::call_service(&app, shorten_request("https://example.com").to_request()).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "internal server error" }));

        let req = test::TestRequest::get().uri("/api/shorturl/list").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn aliases_continue_after_existing_records() {
        let store = InMemoryUrlStore::new();
        store.insert(&UrlRecord::new("https://old.com", 10)).await.unwrap();
        let store: Arc<dyn UrlStore> = Arc::new(store);
        let state = web::Data::new(AppState::initialize(store, false).await.unwrap());
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let body: Value =
            test::call_and_read_body_json(&app, shorten_request("https://new.com").to_request())
                .await;

        assert_eq!(body["shortURL"], 11);
    }

    #[actix_web::test]
    async fn health_check_pings_store() {
        let state = memory_state(false).await;
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/health/check").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "success": true }));
    }
}
