use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    validation::FieldErrors,
};

pub const NAME_MAX: usize = 255;
pub const EMAIL_MAX: usize = 320;
pub const PHONE_MAX: usize = 15;

/// Body of `POST /customers` and `PUT /customers/{id}`. Every field is required.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerRequest {
    pub fn validate(self) -> AppResult<NewCustomer> {
        let mut errors = FieldErrors::new();
        let name = errors.required_str("name", self.name, NAME_MAX);
        let email = errors.required_str("email", self.email, EMAIL_MAX);
        let phone = errors.required_str("phone", self.phone, PHONE_MAX);
        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) => {
                Ok(NewCustomer { name, email, phone })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    pub id: i32,
}
