//! Integration tests for the simulated checkout.

use axum::http::StatusCode;
use serde_json::{Value, json};

use moto_shop_integration_tests::TestApp;

fn checkout_body() -> Value {
    json!({
        "shipping": {
            "cep": "01310-100",
            "street": "Av. Paulista",
            "number": "1000",
            "neighborhood": "Bela Vista",
            "city": "São Paulo",
            "state": "SP"
        },
        "paymentMethod": "pix"
    })
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let app = TestApp::new();
    app.post("/cart/add", &json!({"productId": "5"})).await;

    let (status, body) = app.post("/checkout", &checkout_body()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_checkout_requires_non_empty_cart() {
    let app = TestApp::new();
    app.login().await;

    let (status, _) = app.post("/checkout", &checkout_body()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_validates_shipping_address() {
    let app = TestApp::new();
    app.login().await;
    app.post("/cart/add", &json!({"productId": "5"})).await;

    let mut body = checkout_body();
    body["shipping"]["city"] = json!("  ");
    let (status, response) = app.post("/checkout", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "city is required");

    // The failed attempt leaves the cart untouched
    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let app = TestApp::new();
    app.login().await;
    app.post("/cart/add", &json!({"productId": "5"})).await;

    let (status, order) = app.post("/checkout", &checkout_body()).await;
    assert_eq!(status, StatusCode::CREATED);

    assert!(!order["orderId"].as_str().expect("order id").is_empty());
    assert_eq!(order["itemCount"], 1);
    assert_eq!(order["subtotal"], "R$ 1199,90");
    assert_eq!(order["shipping"], "R$ 0,00");
    assert_eq!(order["total"], "R$ 1199,90");
    assert_eq!(order["paymentMethod"], "pix");
    assert!(order["placedAt"].is_string());

    let (_, count) = app.get("/cart/count").await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_checkout_charges_shipping_below_threshold() {
    let app = TestApp::new();
    app.login().await;
    app.post("/cart/add", &json!({"productId": "8", "quantity": 2}))
        .await;

    let (status, order) = app.post("/checkout", &checkout_body()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["subtotal"], "R$ 109,80");
    assert_eq!(order["shipping"], "R$ 29,90");
    assert_eq!(order["total"], "R$ 139,70");
}
