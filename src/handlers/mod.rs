pub mod api;
pub mod home;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(home::index))
        // Transaction mutations
        .route("/transactions/create", post(home::create))
        .route("/transactions/:id/delete", post(home::delete_form))
        .route("/transactions/:id", delete(home::delete))
        // API (JSON)
        .route("/api/summary", get(api::monthly_summary))
        .route("/api/transactions", get(api::list_transactions))
        .route("/api/transactions/:id", get(api::get_transaction))
        .route("/api/categories", get(api::list_categories))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
