use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{OrderStatus, customer_accounts, customers, orders, products};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
        }
    }
}

/// Account as exposed over the API; the password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerAccount {
    pub id: i32,
    pub username: String,
    pub customer_id: i32,
}

impl From<customer_accounts::Model> for CustomerAccount {
    fn from(model: customer_accounts::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            customer_id: model.customer_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductStock {
    pub id: i32,
    pub stock_level: i32,
}

impl From<products::Model> for ProductStock {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            stock_level: model.stock_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub date: NaiveDate,
    pub customer_id: i32,
    pub status: OrderStatus,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            customer_id: model.customer_id,
            status: model.status,
        }
    }
}
