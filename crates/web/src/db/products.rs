//! Product repository.

use startify_core::{ProductId, Username};

use super::Store;
use crate::models::Product;

/// Repository for catalog operations.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Append a product to the catalog.
    pub async fn insert(&self, product: Product) -> Product {
        self.store.products.write().await.push(product.clone());
        product
    }

    /// Products owned by `owner`, oldest first.
    pub async fn list_by_owner(&self, owner: &Username) -> Vec<Product> {
        self.store
            .products
            .read()
            .await
            .iter()
            .filter(|p| &p.owner == owner)
            .cloned()
            .collect()
    }

    /// First product with this ID owned by `owner`.
    pub async fn get_for_owner(&self, id: ProductId, owner: &Username) -> Option<Product> {
        self.store
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id && &p.owner == owner)
            .cloned()
    }
}
