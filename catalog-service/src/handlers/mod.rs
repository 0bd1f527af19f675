pub mod health;
pub mod products;

pub use health::{health_check, metrics, not_found, readiness_check};
pub use products::{add_product, list_products};
