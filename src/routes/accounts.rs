use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        accounts::{AccountWithCustomer, CreateAccountRequest, UpdateAccountRequest},
        customers::Deleted,
    },
    error::AppResult,
    extract::AppJson,
    models::CustomerAccount,
    response::ApiResponse,
    services::account_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_account)).route(
        "/{id}",
        get(get_account).put(update_account).delete(delete_account),
    )
}

#[utoipa::path(
    post,
    path = "/customer_accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<CustomerAccount>),
        (status = 400, description = "Missing field or username already exists"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customer Accounts"
)]
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerAccount>>)> {
    let resp = account_service::create_account(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/customer_accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account with its customer", body = ApiResponse<AccountWithCustomer>),
        (status = 404, description = "Customer account not found"),
    ),
    tag = "Customer Accounts"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<AccountWithCustomer>>> {
    let resp = account_service::get_account(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/customer_accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<CustomerAccount>),
        (status = 400, description = "Username already exists"),
        (status = 404, description = "Customer account not found"),
        (status = 500, description = "Update failed and was rolled back"),
    ),
    tag = "Customer Accounts"
)]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAccountRequest>,
) -> AppResult<Json<ApiResponse<CustomerAccount>>> {
    let resp = account_service::update_account(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/customer_accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Customer account not found"),
        (status = 500, description = "Delete failed and was rolled back"),
    ),
    tag = "Customer Accounts"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = account_service::delete_account(&state, id).await?;
    Ok(Json(resp))
}
