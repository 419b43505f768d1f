//! Backend API module.
//!
//! The [`ProductApi`] trait is the seam between the admin controller and the
//! products endpoints; [`HttpProductApi`] implements it over HTTP.

mod client;
mod images;

pub use client::*;
pub use images::*;

use async_trait::async_trait;

use crate::errors::AdminError;
use crate::models::Product;
use crate::submit::ProductPayload;

/// CRUD operations on the products resource.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// GET /products?includeOutOfStock=true - List every product.
    async fn list_products(&self) -> Result<Vec<Product>, AdminError>;

    /// POST /products - Create a product.
    async fn create_product(&self, payload: ProductPayload) -> Result<Product, AdminError>;

    /// PUT /products/{id} - Replace a product.
    async fn update_product(
        &self,
        id: &str,
        payload: ProductPayload,
    ) -> Result<Product, AdminError>;

    /// DELETE /products/{id} - Delete a product.
    async fn delete_product(&self, id: &str) -> Result<(), AdminError>;
}
