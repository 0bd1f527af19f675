use crate::models::{Product, IDENTITY_FIELD};
use crate::services::store::ProductStore;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Process-local store with MongoDB's insert semantics: an `ObjectId` is
/// assigned unless the record brings its own `_id`, and `_id` is unique.
#[derive(Default)]
pub struct InMemoryProductStore {
    records: RwLock<Vec<Document>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: Product) -> Result<Bson, AppError> {
        let mut document = product.to_document()?;
        let mut records = self.records.write().await;

        let id = match document.get(IDENTITY_FIELD).cloned() {
            Some(id) => {
                if records.iter().any(|r| r.get(IDENTITY_FIELD) == Some(&id)) {
                    return Err(AppError::DatabaseError(anyhow::anyhow!(
                        "duplicate key error: {} {}",
                        IDENTITY_FIELD,
                        id
                    )));
                }
                id
            }
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert(IDENTITY_FIELD, id.clone());
                id
            }
        };

        records.push(document);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().cloned().map(Product::from_document).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
