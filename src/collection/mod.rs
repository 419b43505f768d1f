//! Local mirror of the backend product list.
//!
//! Entries change only from confirmed server responses: a wholesale replace
//! after loading, an in-place update or append after create/update, and a
//! removal after delete. Ids are unique and iteration follows insertion order.

use crate::models::Product;

/// Result of merging a server record into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Inserted,
    Updated,
}

/// Ordered collection of products, unique by id.
#[derive(Debug, Clone, Default)]
pub struct ProductCollection {
    products: Vec<Product>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a freshly fetched list. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        let fetched = products.len();
        self.products.clear();
        for product in products {
            if self.position(&product.id).is_none() {
                self.products.push(product);
            }
        }
        if self.products.len() != fetched {
            tracing::warn!(
                "Dropped {} products with duplicate ids",
                fetched - self.products.len()
            );
        }
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    /// Merge a record returned by the server, replacing by id or appending.
    pub fn upsert(&mut self, product: Product) -> Reconciled {
        match self.position(&product.id) {
            Some(index) => {
                self.products[index] = product;
                Reconciled::Updated
            }
            None => {
                self.products.push(product);
                Reconciled::Inserted
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        self.position(id).map(|index| self.products.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            let category = product.category.as_str();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
