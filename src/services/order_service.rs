use std::collections::HashMap;

use chrono::{Days, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;

use crate::{
    dto::orders::{
        OrderCustomer, OrderDetails, OrderHistory, OrderHistoryEntry, OrderTotal, OrderTracking,
        PlaceOrderRequest, PlacedOrder, UpdateOrderStatusRequest,
    },
    entity::{
        OrderStatus,
        customers::Entity as Customers,
        order_product::{self, Entity as OrderProduct},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{self, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Order, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Creates the order and links every product in one transaction.
///
/// Nothing is persisted unless the customer and every product exist.
pub async fn place_order(
    state: &AppState,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<PlacedOrder>> {
    let data = payload.validate()?;
    let txn = state.db().begin().await?;

    if Customers::find_by_id(data.customer_id)
        .one(&txn)
        .await?
        .is_none()
    {
        txn.rollback().await?;
        return Err(AppError::not_found("Customer"));
    }

    let order = OrderActive {
        id: NotSet,
        date: Set(Utc::now().date_naive()),
        customer_id: Set(data.customer_id),
        status: Set(OrderStatus::Pending),
    }
    .insert(&txn)
    .await?;

    for &product_id in &data.product_ids {
        if Products::find_by_id(product_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            tracing::warn!(product_id, customer_id = data.customer_id, "order rejected");
            return Err(AppError::NotFound(format!(
                "Product with ID {product_id} not found"
            )));
        }

        OrderProduct::insert(order_product::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(product_id),
        })
        .exec_without_returning(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        customer_id = order.customer_id,
        products = data.product_ids.len(),
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed successfully",
        PlacedOrder {
            order_id: order.id,
            order_date: order.date,
            status: order.status,
            product_ids: data.product_ids,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderDetails>> {
    let order = find_order(state, id).await?;

    let customer = Customers::find_by_id(order.customer_id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;

    let products = linked_products(state.db(), order.id)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "Order",
        OrderDetails {
            order_id: order.id,
            order_date: order.date,
            status: order.status,
            customer: OrderCustomer {
                id: customer.id,
                name: customer.name,
            },
            products,
        },
        None,
    ))
}

pub async fn track_order(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderTracking>> {
    let order = find_order(state, id).await?;

    Ok(ApiResponse::success(
        "Order status",
        OrderTracking {
            order_id: order.id,
            order_date: order.date,
            status: order.status,
            expected_delivery: expected_delivery(&order, state.delivery_window_days),
        },
        None,
    ))
}

/// All orders of a customer, oldest first, each with its linked products.
pub async fn order_history(state: &AppState, customer_id: i32) -> AppResult<OrderHistory> {
    let orders = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .order_by_asc(OrderCol::Id)
        .all(state.db())
        .await?;

    if orders.is_empty() {
        return Ok(OrderHistory {
            order_history: Vec::new(),
        });
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let mut products_by_order: HashMap<i32, Vec<Product>> = HashMap::new();
    for (link, product) in OrderProduct::find()
        .filter(order_product::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_product::Column::ProductId)
        .find_also_related(Products)
        .all(state.db())
        .await?
    {
        if let Some(product) = product {
            products_by_order
                .entry(link.order_id)
                .or_default()
                .push(Product::from(product));
        }
    }

    let order_history = orders
        .into_iter()
        .map(|order| OrderHistoryEntry {
            order_id: order.id,
            order_date: order.date,
            status: order.status,
            products: products_by_order.remove(&order.id).unwrap_or_default(),
        })
        .collect();

    Ok(OrderHistory { order_history })
}

pub async fn cancel_order(state: &AppState, id: i32) -> AppResult<ApiResponse<Order>> {
    let txn = state.db().begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;

    if order.status == OrderStatus::Shipped {
        tracing::warn!(order_id = id, "cancel rejected for shipped order");
        return Err(AppError::InvalidState(
            "Order cannot be cancelled as it has been shipped".into(),
        ));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Cancelled);
    let order = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(order_id = order.id, "order cancelled");

    Ok(ApiResponse::success(
        "Order cancelled successfully",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let next = payload.validate()?;
    let txn = state.db().begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;

    if !order.status.can_transition_to(next) {
        return Err(AppError::InvalidState(format!(
            "Order status cannot change from {} to {}",
            order.status.as_str(),
            next.as_str()
        )));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(next);
    let order = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(order_id = order.id, status = order.status.as_str(), "order status updated");

    Ok(ApiResponse::success(
        "Order updated",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn order_total(state: &AppState, id: i32) -> AppResult<ApiResponse<OrderTotal>> {
    let order = find_order(state, id).await?;
    let products = linked_products(state.db(), order.id).await?;

    Ok(ApiResponse::success(
        "Order total",
        OrderTotal {
            order_id: order.id,
            total_price: sum_prices(&products),
        },
        None,
    ))
}

async fn find_order(state: &AppState, id: i32) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Order"))
}

async fn linked_products<C: ConnectionTrait>(db: &C, order_id: i32) -> AppResult<Vec<ProductModel>> {
    let products = Products::find()
        .join(JoinType::InnerJoin, products::Relation::OrderProduct.def())
        .filter(order_product::Column::OrderId.eq(order_id))
        .order_by_asc(products::Column::Id)
        .all(db)
        .await?;
    Ok(products)
}

/// Each linked product counts once; there is no quantity.
fn sum_prices(products: &[ProductModel]) -> f64 {
    products.iter().map(|p| p.price).sum()
}

fn expected_delivery(order: &OrderModel, window_days: u32) -> Option<NaiveDate> {
    match order.status {
        OrderStatus::Cancelled => None,
        _ => order.date.checked_add_days(Days::new(u64::from(window_days))),
    }
}
