use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        customers::Deleted,
        products::{
            CreateProductRequest, ProductList, RestockRequest, RestockedList,
            UpdateProductRequest, UpdateStockRequest,
        },
    },
    error::AppResult,
    extract::AppJson,
    models::{Product, ProductStock},
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/restock", post(restock_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/stock", get(get_stock).put(update_stock))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Deleted>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = product_service::delete_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/products/{id}/stock",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock level", body = ApiResponse<ProductStock>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Inventory"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductStock>>> {
    let resp = product_service::get_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/products/{id}/stock",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock level updated", body = ApiResponse<ProductStock>),
        (status = 400, description = "Negative stock level"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Inventory"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<ProductStock>>> {
    let resp = product_service::update_stock(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/products/restock",
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Products below the threshold restocked", body = ApiResponse<RestockedList>),
        (status = 400, description = "Negative restock amount"),
    ),
    tag = "Inventory"
)]
pub async fn restock_products(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RestockRequest>,
) -> AppResult<Json<ApiResponse<RestockedList>>> {
    let resp = product_service::restock_products(&state, payload).await?;
    Ok(Json(resp))
}
