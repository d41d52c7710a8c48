use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::OrderStatus,
    error::{AppError, AppResult},
    models::Product,
    validation::{FieldErrors, MISSING_FIELD},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub customer_id: Option<i32>,
    pub product_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i32,
    /// Distinct product ids in request order.
    pub product_ids: Vec<i32>,
}

impl PlaceOrderRequest {
    pub fn validate(self) -> AppResult<NewOrder> {
        let (Some(customer_id), Some(ids)) = (self.customer_id, self.product_ids) else {
            return Err(AppError::BadRequest(
                "Customer ID and Product Ids are required".into(),
            ));
        };
        if ids.is_empty() {
            return Err(AppError::BadRequest(
                "Customer ID and Product Ids are required".into(),
            ));
        }
        let mut product_ids = Vec::with_capacity(ids.len());
        for id in ids {
            if !product_ids.contains(&id) {
                product_ids.push(id);
            }
        }
        Ok(NewOrder {
            customer_id,
            product_ids,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}

impl UpdateOrderStatusRequest {
    pub fn validate(self) -> AppResult<OrderStatus> {
        let mut errors = FieldErrors::new();
        let status = match self.status.as_deref().map(str::trim) {
            None => {
                errors.add("status", MISSING_FIELD);
                None
            }
            Some("Pending") => Some(OrderStatus::Pending),
            Some("Processing") => Some(OrderStatus::Processing),
            Some("Shipped") => Some(OrderStatus::Shipped),
            Some("Cancelled") => Some(OrderStatus::Cancelled),
            Some(_) => {
                errors.add(
                    "status",
                    "Must be one of: Pending, Processing, Shipped, Cancelled.",
                );
                None
            }
        };
        match status {
            Some(status) => Ok(status),
            None => Err(AppError::Validation(errors)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub product_ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCustomer {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetails {
    pub order_id: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub customer: OrderCustomer,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderTracking {
    pub order_id: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    /// `None` once the order is cancelled.
    pub expected_delivery: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryEntry {
    pub order_id: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistory {
    pub order_history: Vec<OrderHistoryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderTotal {
    pub order_id: i32,
    pub total_price: f64,
}
