use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Customer,
    validation::{FieldErrors, MISSING_FIELD},
};

pub const USERNAME_MAX: usize = 255;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub customer_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub customer_id: i32,
}

impl CreateAccountRequest {
    pub fn validate(self) -> AppResult<NewAccount> {
        let mut errors = FieldErrors::new();
        let username = errors.required_str("username", self.username, USERNAME_MAX);
        let password = match self.password.filter(|p| !p.is_empty()) {
            Some(p) => Some(p),
            None => {
                errors.add("password", MISSING_FIELD);
                None
            }
        };
        if self.customer_id.is_none() {
            errors.add("customer_id", MISSING_FIELD);
        }
        match (username, password, self.customer_id) {
            (Some(username), Some(password), Some(customer_id)) => {
                Ok(NewAccount {
                    username,
                    password,
                    customer_id,
                })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Partial update; absent or empty fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateAccountRequest {
    /// Drops blank fields, trims the username and checks its length.
    pub fn validate(self) -> AppResult<Self> {
        let mut errors = FieldErrors::new();
        let username = self.username.filter(|u| !u.trim().is_empty());
        let username = errors.optional_str("username", username, USERNAME_MAX);
        let password = self.password.filter(|p| !p.is_empty());
        errors.finish(|| Self { username, password })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountWithCustomer {
    pub id: i32,
    pub username: String,
    pub customer: Customer,
}
