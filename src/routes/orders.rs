use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::orders::{
        OrderDetails, OrderTotal, OrderTracking, PlaceOrderRequest, PlacedOrder,
        UpdateOrderStatusRequest,
    },
    error::AppResult,
    extract::AppJson,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(place_order))
        .route("/{id}", get(get_order))
        .route("/{id}/track", get(track_order))
        .route("/{id}/cancel", put(cancel_order))
        .route("/{id}/status", put(update_order_status))
        .route("/{id}/total", get(order_total))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<PlacedOrder>),
        (status = 400, description = "Customer ID and Product Ids are required"),
        (status = 404, description = "Customer or product not found, nothing persisted"),
        (status = 500, description = "Store failure, nothing persisted"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PlacedOrder>>)> {
    let resp = order_service::place_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with customer and products", body = ApiResponse<OrderDetails>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderDetails>>> {
    let resp = order_service::get_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{id}/track",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Persisted status and delivery estimate", body = ApiResponse<OrderTracking>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn track_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderTracking>>> {
    let resp = order_service::track_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/cancel",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<Order>),
        (status = 400, description = "Order already shipped"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Cancel failed and was rolled back"),
    ),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::cancel_order(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status changed", body = ApiResponse<Order>),
        (status = 400, description = "Unknown status or illegal transition"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order_status(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{id}/total",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Sum of linked product prices", body = ApiResponse<OrderTotal>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn order_total(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderTotal>>> {
    let resp = order_service::order_total(&state, id).await?;
    Ok(Json(resp))
}
