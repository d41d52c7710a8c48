use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Product,
    validation::FieldErrors,
};

pub const NAME_MAX: usize = 255;
pub const DEFAULT_RESTOCK_THRESHOLD: i32 = 10;
pub const DEFAULT_RESTOCK_AMOUNT: i32 = 20;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

impl CreateProductRequest {
    pub fn validate(self) -> AppResult<NewProduct> {
        let mut errors = FieldErrors::new();
        let name = errors.required_str("name", self.name, NAME_MAX);
        let price = errors.required_price("price", self.price);
        match (name, price) {
            (Some(name), Some(price)) => Ok(NewProduct { name, price }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    pub fn validate(self) -> AppResult<Self> {
        let mut errors = FieldErrors::new();
        let name = errors.optional_str("name", self.name, NAME_MAX);
        let price = errors.optional_price("price", self.price);
        errors.finish(|| Self { name, price })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub stock_level: Option<i32>,
}

impl UpdateStockRequest {
    pub fn validate(self) -> AppResult<Option<i32>> {
        let mut errors = FieldErrors::new();
        let stock_level = errors.non_negative("stock_level", self.stock_level);
        errors.finish(|| stock_level)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RestockRequest {
    pub threshold: Option<i32>,
    pub restock_amount: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestockPlan {
    pub threshold: i32,
    pub restock_amount: i32,
}

impl RestockRequest {
    pub fn validate(self) -> AppResult<RestockPlan> {
        let mut errors = FieldErrors::new();
        let restock_amount = errors
            .non_negative("restock_amount", self.restock_amount)
            .unwrap_or(DEFAULT_RESTOCK_AMOUNT);
        let threshold = self.threshold.unwrap_or(DEFAULT_RESTOCK_THRESHOLD);
        errors.finish(|| RestockPlan {
            threshold,
            restock_amount,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestockedProduct {
    pub id: i32,
    pub name: String,
    pub stock_level: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestockedList {
    pub restocked_products: Vec<RestockedProduct>,
}
