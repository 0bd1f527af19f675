use crate::models::Product;
use crate::services::store::ProductStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "ecomm";
pub const PRODUCTS_COLLECTION: &str = "products";

#[derive(Clone)]
pub struct MongoProductStore {
    client: MongoClient,
    db: Database,
}

impl MongoProductStore {
    /// Create the driver handle. No connection is opened until the first
    /// operation, so an unreachable server does not block startup.
    pub async fn connect(uri: &Secret<String>) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::from(e)
            })?;
        client_options.app_name = Some("catalog-service".to_string());

        let database = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Self::with_options(client_options, &database)
    }

    /// Like [`MongoProductStore::connect`] but against an explicit database.
    pub async fn connect_to_database(
        uri: &Secret<String>,
        database: &str,
    ) -> Result<Self, AppError> {
        let client_options = ClientOptions::parse(uri.expose_secret()).await?;
        Self::with_options(client_options, database)
    }

    fn with_options(client_options: ClientOptions, database: &str) -> Result<Self, AppError> {
        let client = MongoClient::with_options(client_options)?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client initialized");
        Ok(Self { client, db })
    }

    pub fn products(&self) -> Collection<Document> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert(&self, product: Product) -> Result<Bson, AppError> {
        let document = product.to_document()?;
        let result = self.products().insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self.products().find(None, options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Product::from_document).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
