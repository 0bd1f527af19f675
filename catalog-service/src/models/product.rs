//! Schema-less catalog product.
//!
//! A product is whatever JSON object the client sent. It crosses the HTTP
//! boundary as an ordered `serde_json` map and the store boundary as a BSON
//! document.

use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use service_core::error::AppError;

/// Key the document store uses for the identity it assigns to each record.
pub const IDENTITY_FIELD: &str = "_id";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

impl Product {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Convert to the BSON document handed to the store.
    pub fn to_document(&self) -> Result<Document, AppError> {
        bson::to_document(&self.0).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!(
                "Product cannot be stored as a document: {}",
                e
            ))
        })
    }

    /// Build a product from a stored record, dropping the identity field.
    pub fn from_document(mut document: Document) -> Self {
        document.remove(IDENTITY_FIELD);
        match Bson::Document(document).into_relaxed_extjson() {
            Value::Object(fields) => Self(fields),
            // A BSON document always renders as a JSON object.
            _ => Self::default(),
        }
    }
}

impl TryFrom<Value> for Product {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "Request body must be a JSON object"
            ))),
        }
    }
}

impl From<Product> for Value {
    fn from(product: Product) -> Self {
        Value::Object(product.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_product_from_object() {
        let product = Product::try_from(json!({ "name": "Widget", "price": 9.99 })).unwrap();
        assert_eq!(product.fields()["name"], "Widget");
        assert_eq!(product.fields()["price"], 9.99);
    }

    #[test]
    fn test_non_object_values_rejected() {
        for value in [json!([1, 2, 3]), json!("Widget"), json!(42), json!(null), json!(true)] {
            let result = Product::try_from(value);
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn test_document_conversion_keeps_values() {
        let original = json!({
            "name": "Widget",
            "price": 9.99,
            "stock": 12,
            "tags": ["tools", "metal"],
            "dimensions": { "w": 1.5, "h": 2 },
            "discontinued": false,
            "supplier": null
        });
        let product = Product::try_from(original.clone()).unwrap();

        let restored = Product::from_document(product.to_document().unwrap());
        assert_eq!(Value::from(restored), original);
    }

    #[test]
    fn test_from_document_drops_identity() {
        let stored = doc! { "_id": ObjectId::new(), "name": "Widget" };

        let product = Product::from_document(stored);
        assert!(!product.fields().contains_key(IDENTITY_FIELD));
        assert_eq!(Value::from(product), json!({ "name": "Widget" }));
    }

    #[test]
    fn test_field_order_preserved() {
        let product =
            Product::try_from(json!({ "zeta": 1, "alpha": 2, "mid": 3 })).unwrap();
        let restored = Product::from_document(product.to_document().unwrap());

        let keys: Vec<&str> = restored.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let product = Product::try_from(json!({ "name": "Widget" })).unwrap();
        assert_eq!(
            serde_json::to_string(&product).unwrap(),
            r#"{"name":"Widget"}"#
        );
    }
}
