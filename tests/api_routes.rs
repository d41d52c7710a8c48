use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_api::{
    entity::{OrderStatus, customer_accounts, customers, orders, products},
    routes::create_app,
    state::AppState,
};

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn app(db: MockDatabase) -> Router {
    create_app(AppState::new(db.into_connection(), 5))
}

/// App over a connection the test keeps, so the transaction log can be read afterwards.
fn shared_app(db: MockDatabase) -> (Router, Arc<DatabaseConnection>) {
    let orm = Arc::new(db.into_connection());
    (create_app(AppState::shared(orm.clone(), 5)), orm)
}

fn transaction_log(orm: Arc<DatabaseConnection>) -> Vec<Transaction> {
    let Ok(conn) = Arc::try_unwrap(orm) else {
        panic!("connection still shared after the request finished");
    };
    conn.into_transaction_log()
}

fn customer(id: i32) -> customers::Model {
    customers::Model {
        id,
        name: "Ada Lovelace".into(),
        email: Some("ada@example.com".into()),
        phone: Some("555-0100".into()),
    }
}

fn product(id: i32, price: f64, stock_level: i32) -> products::Model {
    products::Model {
        id,
        name: format!("product-{id}"),
        price,
        stock_level,
    }
}

fn order(id: i32, status: OrderStatus) -> orders::Model {
    orders::Model {
        id,
        date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
        customer_id: 1,
        status,
    }
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn missing_customer_is_404_with_error_body() {
    let db = mock().append_query_results([Vec::<customers::Model>::new()]);

    let (status, body) = send(app(db), "GET", "/customers/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Customer not found");
}

#[tokio::test]
async fn create_customer_reports_every_missing_field() {
    let (status, body) = send(
        app(mock()),
        "POST",
        "/customers",
        Some(json!({ "name": "Ada" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["fields"]["email"][0],
        "Missing data for required field."
    );
    assert!(body["data"]["fields"]["phone"].is_array());
    assert!(body["data"]["fields"].get("name").is_none());
}

#[tokio::test]
async fn create_customer_returns_201_and_the_record() {
    let db = mock().append_query_results([vec![customer(1)]]);

    let (status, body) = send(
        app(db),
        "POST",
        "/customers",
        Some(json!({ "name": "Ada Lovelace", "email": "ada@example.com", "phone": "555-0100" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New customer added successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn malformed_json_keeps_the_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app(mock()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["data"]["error"].is_string());
}

#[tokio::test]
async fn missing_product_is_404_not_401() {
    let db = mock().append_query_results([Vec::<products::Model>::new()]);

    let (status, body) = send(app(db), "GET", "/products/7", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Product not found");
}

#[tokio::test]
async fn negative_price_is_rejected_before_touching_the_store() {
    let (status, body) = send(
        app(mock()),
        "POST",
        "/products",
        Some(json!({ "name": "Mug", "price": -2.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["fields"]["price"].is_array());
}

#[tokio::test]
async fn duplicate_username_is_400() {
    let db = mock()
        .append_query_results([vec![customer(1)]])
        .append_query_results([vec![customer_accounts::Model {
            id: 3,
            username: "ada".into(),
            password_hash: "$argon2id$stub".into(),
            customer_id: 2,
        }]]);

    let (status, body) = send(
        app(db),
        "POST",
        "/customer_accounts",
        Some(json!({ "username": "ada", "password": "pw", "customer_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["error"], "Username already exists");
}

#[tokio::test]
async fn account_for_unknown_customer_is_404() {
    let db = mock().append_query_results([Vec::<customers::Model>::new()]);

    let (status, _) = send(
        app(db),
        "POST",
        "/customer_accounts",
        Some(json!({ "username": "ada", "password": "pw", "customer_id": 99 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_total_sums_linked_prices() {
    let db = mock()
        .append_query_results([vec![order(1, OrderStatus::Pending)]])
        .append_query_results([vec![product(1, 10.0, 5), product(2, 5.5, 5)]]);

    let (status, body) = send(app(db), "GET", "/orders/1/total", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_id"], 1);
    assert_eq!(body["data"]["total_price"], 15.5);
}

#[tokio::test]
async fn track_reports_persisted_status() {
    let db = mock().append_query_results([vec![order(1, OrderStatus::Processing)]]);

    let (status, body) = send(app(db), "GET", "/orders/1/track", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Processing");
    assert_eq!(body["data"]["expected_delivery"], "2024-12-20");
}

#[tokio::test]
async fn shipped_order_cannot_be_cancelled() {
    let db = mock().append_query_results([vec![order(1, OrderStatus::Shipped)]]);

    let (status, body) = send(app(db), "PUT", "/orders/1/cancel", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["error"],
        "Order cannot be cancelled as it has been shipped"
    );
}

#[tokio::test]
async fn pending_order_is_cancelled() {
    let db = mock()
        .append_query_results([vec![order(1, OrderStatus::Pending)]])
        .append_query_results([vec![order(1, OrderStatus::Cancelled)]]);

    let (status, body) = send(app(db), "PUT", "/orders/1/cancel", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");
}

#[tokio::test]
async fn skipping_processing_is_an_illegal_transition() {
    let db = mock().append_query_results([vec![order(1, OrderStatus::Pending)]]);

    let (status, body) = send(
        app(db),
        "PUT",
        "/orders/1/status",
        Some(json!({ "status": "Shipped" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["error"],
        "Order status cannot change from Pending to Shipped"
    );
}

#[tokio::test]
async fn order_with_unknown_product_names_it_and_rolls_back() {
    let db = mock()
        .append_query_results([vec![customer(1)]])
        .append_query_results([vec![order(10, OrderStatus::Pending)]])
        .append_query_results([vec![product(1, 10.0, 5)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([Vec::<products::Model>::new()]);
    let (app, orm) = shared_app(db);

    let (status, body) = send(
        app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": 1, "product_ids": [1, 9999] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Product with ID 9999 not found");

    let log = transaction_log(orm);
    assert_eq!(log.len(), 1);
    let statements = format!("{log:?}");
    assert!(statements.contains("ROLLBACK"));
    assert!(!statements.contains("COMMIT"));
}

#[tokio::test]
async fn order_without_products_is_400() {
    let (status, _) = send(
        app(mock()),
        "POST",
        "/orders",
        Some(json!({ "customer_id": 1, "product_ids": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn restock_with_nothing_low_says_so() {
    let db = mock().append_query_results([Vec::<products::Model>::new()]);

    let (status, body) = send(app(db), "POST", "/products/restock", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No products below the threshold");
    assert_eq!(body["data"]["restocked_products"], json!([]));
}

#[tokio::test]
async fn restock_tops_up_only_low_products() {
    let db = mock()
        .append_query_results([vec![product(2, 5.5, 3)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![product(2, 5.5, 23)]]);
    let (app, orm) = shared_app(db);

    let (status, body) = send(
        app,
        "POST",
        "/products/restock",
        Some(json!({ "threshold": 10, "restock_amount": 20 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Products restocked");
    assert_eq!(
        body["data"]["restocked_products"],
        json!([{ "id": 2, "name": "product-2", "stock_level": 23 }])
    );

    let log = transaction_log(orm);
    assert_eq!(log.len(), 1);
    let statements = format!("{log:?}");
    assert!(statements.contains("UPDATE"));
    assert!(statements.contains("COMMIT"));
}

#[tokio::test]
async fn restock_past_the_stock_limit_is_rejected() {
    let db = mock().append_query_results([vec![product(2, 5.5, i32::MAX - 1)]]);
    let (app, orm) = shared_app(db);

    let (status, body) = send(
        app,
        "POST",
        "/products/restock",
        Some(json!({ "threshold": i32::MAX, "restock_amount": 20 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["fields"]["restock_amount"].is_array());
    let statements = format!("{:?}", transaction_log(orm));
    assert!(!statements.contains("UPDATE"));
    assert!(!statements.contains("COMMIT"));
}

#[tokio::test]
async fn ill_typed_field_is_reported_by_name() {
    let (status, body) = send(
        app(mock()),
        "POST",
        "/products",
        Some(json!({ "name": "Mug", "price": "abc" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["data"]["fields"]["price"][0].is_string());
    assert!(body["data"]["fields"].get("name").is_none());
}

#[tokio::test]
async fn over_long_username_update_is_400() {
    let (status, body) = send(
        app(mock()),
        "PUT",
        "/customer_accounts/1",
        Some(json!({ "username": "u".repeat(300) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["fields"]["username"][0],
        "Longer than maximum length 255."
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, body) = send(app(mock()), "GET", "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nope");
}
