use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::customers::{CustomerRequest, Deleted},
    entity::customers::{ActiveModel, Entity as Customers},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_customer(
    state: &AppState,
    payload: CustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let data = payload.validate()?;

    let customer = ActiveModel {
        id: NotSet,
        name: Set(data.name),
        email: Set(Some(data.email)),
        phone: Set(Some(data.phone)),
    }
    .insert(state.db())
    .await?;

    tracing::info!(customer_id = customer.id, "customer created");

    Ok(ApiResponse::success(
        "New customer added successfully",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

pub async fn get_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

    Ok(ApiResponse::success("Customer", Customer::from(customer), None))
}

pub async fn update_customer(
    state: &AppState,
    id: i32,
    payload: CustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    let data = payload.validate()?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(data.name);
    active.email = Set(Some(data.email));
    active.phone = Set(Some(data.phone));
    let customer = active.update(state.db()).await?;

    tracing::info!(customer_id = customer.id, "customer updated");

    Ok(ApiResponse::success(
        "Customer details updated successfully",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

/// Deletes the customer; their account, orders and order links go with it.
pub async fn delete_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let txn = state.db().begin().await?;

    if Customers::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Customer"));
    }

    Customers::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(customer_id = id, "customer deleted");

    Ok(ApiResponse::success(
        format!("Customer with ID {id} has been deleted successfully"),
        Deleted { id },
        Some(Meta::empty()),
    ))
}
