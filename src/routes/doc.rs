use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        accounts::{AccountWithCustomer, CreateAccountRequest, UpdateAccountRequest},
        customers::{CustomerRequest, Deleted},
        orders::{
            OrderCustomer, OrderDetails, OrderHistory, OrderHistoryEntry, OrderTotal,
            OrderTracking, PlaceOrderRequest, PlacedOrder, UpdateOrderStatusRequest,
        },
        products::{
            CreateProductRequest, ProductList, RestockRequest, RestockedList, RestockedProduct,
            UpdateProductRequest, UpdateStockRequest,
        },
    },
    entity::OrderStatus,
    models::{Customer, CustomerAccount, Order, Product, ProductStock},
    response::Meta,
    routes::{accounts, customers, health, orders, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::order_history,
        accounts::create_account,
        accounts::get_account,
        accounts::update_account,
        accounts::delete_account,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::get_stock,
        products::update_stock,
        products::restock_products,
        orders::place_order,
        orders::get_order,
        orders::track_order,
        orders::cancel_order,
        orders::update_order_status,
        orders::order_total
    ),
    components(
        schemas(
            Customer,
            CustomerAccount,
            Product,
            ProductStock,
            Order,
            OrderStatus,
            CustomerRequest,
            Deleted,
            CreateAccountRequest,
            UpdateAccountRequest,
            AccountWithCustomer,
            CreateProductRequest,
            UpdateProductRequest,
            UpdateStockRequest,
            RestockRequest,
            ProductList,
            RestockedProduct,
            RestockedList,
            PlaceOrderRequest,
            UpdateOrderStatusRequest,
            PlacedOrder,
            OrderCustomer,
            OrderDetails,
            OrderTracking,
            OrderHistoryEntry,
            OrderHistory,
            OrderTotal,
            health::HealthData,
            Meta
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Customer Accounts", description = "Customer account endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Inventory", description = "Stock level endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
