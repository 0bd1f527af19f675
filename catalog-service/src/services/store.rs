use crate::models::Product;
use async_trait::async_trait;
use mongodb::bson::Bson;
use service_core::error::AppError;

/// Persistence seam for catalog products.
///
/// Implementations own every persisted record; the service only holds a
/// handle to one, built at startup.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new record and return the identity the store assigned to it.
    async fn insert(&self, product: Product) -> Result<Bson, AppError>;

    /// Every stored record in the store's natural order, identity removed.
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
