use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        customers::{CustomerRequest, Deleted},
        orders::OrderHistory,
    },
    error::AppResult,
    extract::AppJson,
    models::Customer,
    response::{ApiResponse, Meta},
    services::{customer_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/{id}/orders", get(order_history))
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<Customer>),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CustomerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    let resp = customer_service::create_customer(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Get customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_customer(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<Customer>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::update_customer(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer and dependents deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Delete failed, nothing changed"),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = customer_service::delete_customer(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/customers/{id}/orders",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Order history", body = ApiResponse<OrderHistory>),
        (status = 404, description = "No orders found for this customer"),
    ),
    tag = "Orders"
)]
pub async fn order_history(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderHistory>>)> {
    let history = order_service::order_history(&state, id).await?;
    if history.order_history.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::message("No orders found for this customer")),
        ));
    }
    let meta = Meta::total(history.order_history.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Order history", history, Some(meta))),
    ))
}
