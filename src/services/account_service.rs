use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::{
        accounts::{AccountWithCustomer, CreateAccountRequest, UpdateAccountRequest},
        customers::Deleted,
    },
    entity::{
        customer_accounts::{ActiveModel, Column, Entity as CustomerAccounts},
        customers::Entity as Customers,
    },
    error::{AppError, AppResult},
    models::{Customer, CustomerAccount},
    response::{ApiResponse, Meta},
    state::AppState,
};

const USERNAME_TAKEN: &str = "Username already exists";
const CUSTOMER_HAS_ACCOUNT: &str = "Customer already has an account";

/// Unique constraints on `customer_accounts` and the conflict each one reports.
const ACCOUNT_CONFLICTS: &[(&str, &str)] = &[
    ("customer_accounts_username_key", USERNAME_TAKEN),
    ("customer_accounts_customer_id_key", CUSTOMER_HAS_ACCOUNT),
];

/// Hash a password with Argon2id and a fresh random salt, returning the PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn create_account(
    state: &AppState,
    payload: CreateAccountRequest,
) -> AppResult<ApiResponse<CustomerAccount>> {
    let data = payload.validate()?;

    if Customers::find_by_id(data.customer_id)
        .one(state.db())
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Customer"));
    }

    let taken = CustomerAccounts::find()
        .filter(Column::Username.eq(data.username.as_str()))
        .one(state.db())
        .await?;
    if taken.is_some() {
        tracing::warn!(username = %data.username, "username already taken");
        return Err(AppError::Conflict(USERNAME_TAKEN.into()));
    }

    let has_account = CustomerAccounts::find()
        .filter(Column::CustomerId.eq(data.customer_id))
        .one(state.db())
        .await?;
    if has_account.is_some() {
        return Err(AppError::Conflict(CUSTOMER_HAS_ACCOUNT.into()));
    }

    let password_hash = hash_password(&data.password)?;

    let account = ActiveModel {
        id: NotSet,
        username: Set(data.username),
        password_hash: Set(password_hash),
        customer_id: Set(data.customer_id),
    }
    .insert(state.db())
    .await
    .map_err(|e| AppError::unique_or_db(e, ACCOUNT_CONFLICTS))?;

    tracing::info!(
        account_id = account.id,
        customer_id = account.customer_id,
        "customer account created"
    );

    Ok(ApiResponse::success(
        "Customer account created",
        CustomerAccount::from(account),
        Some(Meta::empty()),
    ))
}

pub async fn get_account(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<AccountWithCustomer>> {
    let account = CustomerAccounts::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Customer account"))?;

    let customer = Customers::find_by_id(account.customer_id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

    Ok(ApiResponse::success(
        "Customer account",
        AccountWithCustomer {
            id: account.id,
            username: account.username,
            customer: Customer::from(customer),
        },
        None,
    ))
}

pub async fn update_account(
    state: &AppState,
    id: i32,
    payload: UpdateAccountRequest,
) -> AppResult<ApiResponse<CustomerAccount>> {
    let payload = payload.validate()?;
    let txn = state.db().begin().await?;

    let existing = CustomerAccounts::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Customer account"))?;

    let username = payload.username.filter(|u| *u != existing.username);
    let password = payload.password;

    let mut active: ActiveModel = existing.into();
    if let Some(username) = username {
        let taken = CustomerAccounts::find()
            .filter(Column::Username.eq(username.as_str()))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict(USERNAME_TAKEN.into()));
        }
        active.username = Set(username);
    }
    if let Some(password) = password {
        active.password_hash = Set(hash_password(&password)?);
    }

    let account = active
        .update(&txn)
        .await
        .map_err(|e| AppError::unique_or_db(e, ACCOUNT_CONFLICTS))?;
    txn.commit().await?;

    tracing::info!(account_id = account.id, "customer account updated");

    Ok(ApiResponse::success(
        "Customer account updated successfully",
        CustomerAccount::from(account),
        Some(Meta::empty()),
    ))
}

pub async fn delete_account(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let txn = state.db().begin().await?;

    if CustomerAccounts::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::not_found("Customer account"));
    }

    CustomerAccounts::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(account_id = id, "customer account deleted");

    Ok(ApiResponse::success(
        format!("Customer account with ID {id} has been deleted successfully"),
        Deleted { id },
        Some(Meta::empty()),
    ))
}
