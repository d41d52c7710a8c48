pub mod accounts;
pub mod customers;
pub mod orders;
pub mod products;
