//! # MongoDB
//!
//! Document store holding the product catalog.
//!
//! ## Requirements
//!
//! - One collection of schema-flexible product documents
//! - Single-document writes only, no transactions
//! - Case-insensitive regex lookup for the duplicate-name pre-check
//!
//! ## Notes
//!
//! - The duplicate pre-check and the following write are two separate
//!   operations. Two simultaneous creates with the same name can both pass
//!   the check and both land in the store. Accepted gap, not a guarantee.
//! - The client connects lazily. Startup pings the store once, logs a
//!   warning if it is unreachable, and keeps serving.

use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Regex, doc, oid::ObjectId},
};
use tracing::warn;

use crate::{config::Config, product::Product};

pub const PRODUCTS_COLLECTION: &str = "products";

pub struct ProductStore {
    collection: Collection<Product>,
}

pub async fn init_store(config: &Config) -> ProductStore {
    let client = Client::with_uri_str(&config.mongo_url)
        .await
        .expect("Connection string misconfigured!");
    let database = client.database(&config.mongo_db);

    if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
        warn!("Store unreachable at startup: {e}");
    }

    ProductStore {
        collection: database.collection(PRODUCTS_COLLECTION),
    }
}

/// Case-insensitive regex filter for the duplicate-name pre-check. The raw
/// candidate name is used as the pattern, so substring and metacharacter
/// matches are possible.
pub fn name_conflict_filter(name: &str) -> mongodb::bson::Document {
    doc! {
        "name": Regex {
            pattern: name.to_string(),
            options: "i".to_string(),
        }
    }
}

impl ProductStore {
    pub async fn find_conflict(&self, name: &str) -> Result<Option<Product>, mongodb::error::Error> {
        self.collection.find_one(name_conflict_filter(name)).await
    }

    pub async fn insert(&self, mut product: Product) -> Result<Product, mongodb::error::Error> {
        let result = self.collection.insert_one(&product).await?;
        product.id = result.inserted_id.as_object_id();
        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>, mongodb::error::Error> {
        self.collection.find(doc! {}).await?.try_collect().await
    }

    /// Replaces every mutable field of the record matching `id`, returning
    /// the pre-update document, or `None` when no record matches.
    pub async fn replace(
        &self,
        id: ObjectId,
        product: &Product,
    ) -> Result<Option<Product>, mongodb::error::Error> {
        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "name": product.name.clone(),
                    "description": product.description.clone(),
                    "MRP": product.mrp,
                    "discount": product.discount,
                    "shippingCharge": product.shipping_charge,
                    "images": product.images.clone(),
                } },
            )
            .await
    }

    pub async fn remove(&self, id: ObjectId) -> Result<Option<Product>, mongodb::error::Error> {
        self.collection
            .find_one_and_delete(doc! { "_id": id })
            .await
    }
}
