//! Page rendering and middleware through the HTTP surface.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{StatusCode, header};
use darsi_integration_tests::TestClient;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_home_lists_catalog_by_category() {
    let mut client = TestClient::new();
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    for id in ["square-bites", "chocolate-almonds", "kunafa-bar"] {
        assert!(
            response.body.contains(&format!("id=\"product-{id}\"")),
            "missing card for {id}"
        );
    }
    assert!(response.body.contains("Business Hours"));
    assert!(response.body.contains("https://wa.me/919494437815?text="));
    assert!(response.body.contains("min=\"25\""));
}

#[tokio::test]
async fn test_home_reselects_card_from_query() {
    let mut client = TestClient::new();
    let response = client
        .get("/?selected=small-bars&flavor=Milk%20with%20Roasted%20Almonds")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .body
            .contains("<option value=\"Milk with Roasted Almonds\" selected>")
    );
}

#[tokio::test]
async fn test_cart_page_lists_lines() {
    let mut client = TestClient::new();
    client
        .post_form(
            "/cart/add",
            &[("product_id", "stuffed-dates"), ("variant", "500g Box")],
        )
        .await;

    let response = client.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Stuffed Dates"));
    assert!(response.body.contains("500g Box"));
    assert!(response.body.contains("₹690"));
    assert!(response.body.contains("name=\"return_to\" value=\"/cart\""));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let mut client = TestClient::new();
    let response = client.get("/").await;

    assert_eq!(response.headers[header::X_FRAME_OPTIONS], "DENY");
    let csp = response.headers[header::CONTENT_SECURITY_POLICY]
        .to_str()
        .unwrap();
    assert!(csp.contains("https://wa.me"));
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let mut client = TestClient::new();
    let response = client.get("/static/css/main.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".cart-drawer"));
}

#[tokio::test]
async fn test_session_cookie_is_http_only() {
    let mut client = TestClient::new();
    let response = client
        .post_form("/cart/add", &[("product_id", "kunafa-bar")])
        .await;

    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("darsi_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}
