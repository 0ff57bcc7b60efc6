//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router (error-page middleware included)
//! against a private in-memory database built from the bundled seed script.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use budgetbuddy::config::Config;
use budgetbuddy::date_utils::MonthCursor;
use budgetbuddy::db::{create_in_memory_pool, SeedSource};
use budgetbuddy::db::seed::{apply_seed_script, SEED_SQL};
use budgetbuddy::server;
use budgetbuddy::state::AppState;
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Fresh seeded database; pages default to January 2024.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            apply_seed_script(&conn, SEED_SQL).expect("Failed to apply seed script");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            database_path: PathBuf::from(":memory:"),
            seed: SeedSource::Bundled,
            start_month: MonthCursor::new(2024, 1),
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
        };

        Self { state }
    }

    /// Same as `new`, with the seeded transactions removed.
    pub fn empty() -> Self {
        let client = Self::new();
        client.clear_transactions();
        client
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    pub fn clear_transactions(&self) {
        let conn = self.state.db.get().unwrap();
        conn.execute("DELETE FROM Transactions", []).unwrap();
    }

    pub fn transaction_count(&self) -> i64 {
        let conn = self.state.db.get().unwrap();
        conn.query_row("SELECT COUNT(*) FROM Transactions", [], |row| row.get(0))
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String, Option<String>) {
        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string(), location)
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let (status, body, _) = self
            .send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        (status, body)
    }

    /// Make a DELETE request and return status and body.
    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let (status, body, _) = self
            .send(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, body)
    }

    /// Make a POST request with form data; returns status, body and the
    /// `Location` header if any.
    pub async fn post_form(
        &self,
        uri: &str,
        form_data: &[(&str, &str)],
    ) -> (StatusCode, String, Option<String>) {
        let body = form_data
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        (status, parsed)
    }

    /// Record a transaction through the web form; true on a 303 redirect.
    pub async fn create_transaction(
        &self,
        month: &str,
        category_id: i64,
        kind: &str,
        amount: &str,
        description: &str,
        date: &str,
    ) -> bool {
        let category_id = category_id.to_string();
        let (status, _, _) = self
            .post_form(
                "/transactions/create",
                &[
                    ("month", month),
                    ("category_id", &category_id),
                    ("type", kind),
                    ("amount", amount),
                    ("description", description),
                    ("date", date),
                ],
            )
            .await;
        status == StatusCode::SEE_OTHER
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
