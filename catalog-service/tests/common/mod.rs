#![allow(dead_code)]

use async_trait::async_trait;
use catalog_service::config::{CatalogConfig, MongoConfig, StoreBackend, StoreConfig};
use catalog_service::models::Product;
use catalog_service::services::{InMemoryProductStore, ProductStore};
use catalog_service::startup::Application;
use mongodb::bson::Bson;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;

pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
    pub store: Arc<dyn ProductStore>,
}

/// Store whose server never answers.
pub struct UnreachableStore;

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn insert(&self, _product: Product) -> Result<Bson, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "Server selection timeout: No available servers"
        )))
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "Server selection timeout: No available servers"
        )))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "Server selection timeout: No available servers"
        )))
    }
}

pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        mongodb: MongoConfig {
            uri: Secret::new(
                std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
    }
}

impl TestApp {
    /// Spawn the app over a fresh in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryProductStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn ProductStore>) -> Self {
        let app = Application::build_with_store(test_config(), store)
            .await
            .expect("Failed to build test application");

        let http_port = app.port();
        let http_address = format!("http://127.0.0.1:{}", http_port);
        let store = app.store();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            http_address,
            http_port,
            store,
        }
    }

    pub async fn list_products(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/api/products", self.http_address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn add_product(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/products", self.http_address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
