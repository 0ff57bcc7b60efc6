//! Integration tests for the home page and the transaction form.

mod common;

use axum::http::StatusCode;
use common::TestClient;

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let client = TestClient::new();
    let (status, body) = client.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

/// Without a month parameter the configured start month is shown.
#[tokio::test]
async fn test_home_defaults_to_start_month() {
    let client = TestClient::new();
    let (status, body) = client.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Summary for January 2024"));
    assert!(body.contains("/?month=2023-12"));
    assert!(body.contains("/?month=2024-02"));
}

/// Seeded categories and transactions are rendered.
#[tokio::test]
async fn test_home_lists_seed_data() {
    let client = TestClient::new();
    let (status, body) = client.get("/?month=2024-02").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Summary for February 2024"));
    assert!(body.contains("Groceries"));
    assert!(body.contains("Monthly salary"));
}

/// A month without transactions shows zero totals.
#[tokio::test]
async fn test_empty_month_shows_zero_totals() {
    let client = TestClient::new();
    let (status, body) = client.get("/?month=2019-07").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("$0.00").count(), 3);
}

/// An empty database renders the placeholder text.
#[tokio::test]
async fn test_empty_ledger_placeholder() {
    let client = TestClient::empty();
    let (_, body) = client.get("/").await;

    assert!(body.contains("No transactions recorded yet."));
}

/// A malformed month is a 400 rendered as a full error page.
#[tokio::test]
async fn test_invalid_month_is_bad_request() {
    let client = TestClient::new();
    let (status, body) = client.get("/?month=2024-13").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("400 Bad Request"));
    assert!(body.contains("expected YYYY-MM"));
}

/// Unknown routes get the 404 page.
#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let client = TestClient::new();
    let (status, body) = client.get("/no-such-page").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404 Not Found"));
    assert!(body.contains("looking for doesn"));
}

/// Submitting the form records the row and redirects back to the same month.
#[tokio::test]
async fn test_create_redirects_to_month() {
    let client = TestClient::empty();

    let (status, _, location) = client
        .post_form(
            "/transactions/create",
            &[
                ("month", "2024-03"),
                ("category_id", "1"),
                ("type", "Expense"),
                ("amount", "12.50"),
                ("description", "Farmers market"),
                ("date", "2024-03-09"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/?month=2024-03"));
    assert_eq!(client.transaction_count(), 1);

    let (_, body) = client.get("/?month=2024-03").await;
    assert!(body.contains("Farmers market"));
    assert!(body.contains("-$12.50"));
}

/// Type falls back to the category's type when the form omits it.
#[tokio::test]
async fn test_create_uses_category_type_by_default() {
    let client = TestClient::empty();

    let (status, _, _) = client
        .post_form(
            "/transactions/create",
            &[
                ("month", "2024-01"),
                ("category_id", "7"),
                ("amount", "250"),
                ("date", "2024-01-10"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, json) = client.get_json("/api/summary?month=2024-01").await;
    assert_eq!(json["total_income"].as_f64(), Some(250.0));
    assert_eq!(json["total_expenses"].as_f64(), Some(0.0));
}

/// The form's blank type option also falls back to the category's type.
#[tokio::test]
async fn test_blank_type_option_uses_category_type() {
    let client = TestClient::empty();
    let (_, page) = client.get("/").await;
    assert!(page.contains(r#"<option value="">Same as category</option>"#));

    assert!(
        client
            .create_transaction("2024-01", 8, "", "75", "Side gig", "2024-01-18")
            .await
    );

    let (_, list) = client.get_json("/api/transactions").await;
    assert_eq!(list[0]["type"], "Income");
    let (_, json) = client.get_json("/api/summary?month=2024-01").await;
    assert_eq!(json["total_income"].as_f64(), Some(75.0));
    assert_eq!(json["total_expenses"].as_f64(), Some(0.0));
}

/// Invalid form input is rejected without touching the database.
#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let client = TestClient::empty();

    assert!(
        !client
            .create_transaction("2024-01", 1, "Expense", "-5", "negative", "2024-01-02")
            .await
    );
    assert!(
        !client
            .create_transaction("2024-01", 1, "Transfer", "5", "bad type", "2024-01-02")
            .await
    );
    assert!(
        !client
            .create_transaction("2024-01", 999, "Expense", "5", "no category", "2024-01-02")
            .await
    );
    assert!(
        !client
            .create_transaction("2024-01", 1, "Expense", "5", "bad date", "02/01/2024")
            .await
    );

    assert_eq!(client.transaction_count(), 0);
}

/// Missing category selection is a validation error.
#[tokio::test]
async fn test_create_requires_category() {
    let client = TestClient::empty();

    let (status, body, _) = client
        .post_form(
            "/transactions/create",
            &[("month", "2024-01"), ("category_id", ""), ("amount", "5")],
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Choose a category"));
}

/// Deleting through the form removes the row and redirects back.
#[tokio::test]
async fn test_delete_form_removes_row() {
    let client = TestClient::empty();
    assert!(
        client
            .create_transaction("2024-01", 1, "Expense", "9.99", "Snacks", "2024-01-05")
            .await
    );
    let (_, list) = client.get_json("/api/transactions").await;
    let id = list[0]["id"].as_i64().unwrap();

    let (status, _, location) = client
        .post_form(
            &format!("/transactions/{}/delete", id),
            &[("month", "2024-01")],
        )
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/?month=2024-01"));
    assert_eq!(client.transaction_count(), 0);
}

/// DELETE on an unknown id is a no-op with an empty 200 response.
#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let client = TestClient::new();
    let before = client.transaction_count();

    let (status, body) = client.delete("/transactions/987654").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(client.transaction_count(), before);
}

/// Unicode descriptions are stored and rendered intact.
#[tokio::test]
async fn test_unicode_descriptions() {
    let client = TestClient::empty();
    assert!(
        client
            .create_transaction("2024-01", 6, "Expense", "50", "東京レストラン", "2024-01-01")
            .await
    );
    assert!(
        client
            .create_transaction("2024-01", 6, "Expense", "30", "Café François ☕", "2024-01-02")
            .await
    );

    let (status, body) = client.get("/?month=2024-01").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("東京レストラン"));
    assert!(body.contains("Café François ☕"));
}

/// Descriptions are HTML-escaped on the page.
#[tokio::test]
async fn test_description_is_escaped() {
    let client = TestClient::empty();
    assert!(
        client
            .create_transaction("2024-01", 1, "Expense", "1", "<script>x</script>", "2024-01-03")
            .await
    );

    let (_, body) = client.get("/?month=2024-01").await;
    assert!(!body.contains("<script>"));
    assert!(
        body.contains("&#60;script&#62;x&#60;/script&#62;") || body.contains("&lt;script&gt;x")
    );
}
