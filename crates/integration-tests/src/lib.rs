//! Integration tests for the cafe directory.
//!
//! Requests are sent straight into the router with `tower::ServiceExt::oneshot`
//! against a fresh in-memory `SQLite` database, so no server or database file
//! is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafe-directory-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use sqlx::SqlitePool;
use tower::ServiceExt;

use cafe_directory_web::config::WebConfig;
use cafe_directory_web::db::{self, CafeRepository};
use cafe_directory_web::state::AppState;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A router wired to its own empty database.
pub struct TestContext {
    pub router: Router,
    pub pool: SqlitePool,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestContext {
    /// Build a router over a migrated in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be opened or migrated.
    pub async fn new() -> Self {
        let pool = db::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let config = WebConfig {
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../web/static")),
            ..WebConfig::default()
        };
        let router = cafe_directory_web::build_router(AppState::new(config, pool.clone()));

        Self { router, pool }
    }

    /// Repository over the context's database, for arranging and asserting.
    #[must_use]
    pub const fn cafes(&self) -> CafeRepository<'_> {
        CafeRepository::new(&self.pool)
    }

    /// Send a `GET` request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, &[]).await
    }

    /// Send a `POST` with a urlencoded form body.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, uri, fields).await
    }

    async fn send(&self, method: Method, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send an arbitrary request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not UTF-8.
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router returned an error");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("Failed to read body");
        let body = String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Encode fields as an `application/x-www-form-urlencoded` body.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Form fields for a valid add-cafe submission named `name`.
#[must_use]
pub fn brew_lab_form(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("cafe_name", name),
        ("map_url", "https://maps.example/1"),
        ("img_url", "https://img.example/1"),
        ("location", "Downtown"),
        ("seats", "10-20"),
        ("has_toilet", "y"),
        ("has_wifi", "y"),
        ("coffee_price", "3.50"),
    ]
}
