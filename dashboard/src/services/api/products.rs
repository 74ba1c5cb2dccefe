//! # Product Endpoints

use shared::{DataEnvelope, Product};

use super::client::ApiClient;
use crate::core::error::Result;

/// `GET /Product`. The list sits in `data.$values`; a missing envelope is an
/// empty catalog, not an error.
pub async fn list_products(client: &ApiClient) -> Result<Vec<Product>> {
    let envelope: DataEnvelope<Product> = client.get_json(client.get("Product", None)).await?;
    let products = envelope.into_vec();
    tracing::debug!(count = products.len(), "Products received");
    Ok(products)
}
