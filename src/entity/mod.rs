pub mod customer_accounts;
pub mod customers;
pub mod order_product;
pub mod orders;
pub mod products;

pub use customer_accounts::Entity as CustomerAccounts;
pub use customers::Entity as Customers;
pub use order_product::Entity as OrderProduct;
pub use orders::{Entity as Orders, OrderStatus};
pub use products::Entity as Products;
