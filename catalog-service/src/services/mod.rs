pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoProductStore;
pub use memory::InMemoryProductStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::ProductStore;
