//! Ordered product catalog with id lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// Popularity assigned to new products when the catalog has nothing to average.
pub const DEFAULT_POPULARITY: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: u64,
    name: &'static str,
    price: f64,
    stock: u32,
    popularity: f64,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed { id: 1, name: "Laptop", price: 1200.0, stock: 30, popularity: 90.0 },
    ProductSeed { id: 2, name: "Smartphone", price: 800.0, stock: 50, popularity: 85.0 },
    ProductSeed { id: 3, name: "Tablet", price: 500.0, stock: 20, popularity: 70.0 },
    ProductSeed { id: 4, name: "Desktop PC", price: 1500.0, stock: 10, popularity: 88.0 },
    ProductSeed { id: 5, name: "Gaming Console", price: 400.0, stock: 15, popularity: 80.0 },
    ProductSeed { id: 6, name: "Smart Watch", price: 250.0, stock: 40, popularity: 65.0 },
    ProductSeed { id: 7, name: "Headphones", price: 120.0, stock: 60, popularity: 72.0 },
    ProductSeed { id: 8, name: "Wireless Earbuds", price: 180.0, stock: 35, popularity: 78.0 },
    ProductSeed { id: 9, name: "Bluetooth Speaker", price: 220.0, stock: 25, popularity: 83.0 },
    ProductSeed { id: 10, name: "External Hard Drive", price: 90.0, stock: 40, popularity: 70.0 },
    ProductSeed { id: 11, name: "USB Flash Drive (128GB)", price: 35.0, stock: 100, popularity: 60.0 },
    ProductSeed { id: 12, name: "Wireless Keyboard", price: 70.0, stock: 30, popularity: 75.0 },
    ProductSeed { id: 13, name: "Wireless Mouse", price: 40.0, stock: 45, popularity: 68.0 },
    ProductSeed { id: 14, name: "Webcam", price: 60.0, stock: 20, popularity: 65.0 },
    ProductSeed { id: 15, name: "HDMI Cable", price: 15.0, stock: 70, popularity: 50.0 },
    ProductSeed { id: 16, name: "Ethernet Cable (10 ft)", price: 10.0, stock: 80, popularity: 52.0 },
    ProductSeed { id: 17, name: "Smart Home Hub", price: 300.0, stock: 10, popularity: 74.0 },
    ProductSeed { id: 18, name: "Drone", price: 600.0, stock: 5, popularity: 85.0 },
    ProductSeed { id: 19, name: "DSLR Camera", price: 1000.0, stock: 8, popularity: 80.0 },
    ProductSeed { id: 20, name: "Action Camera", price: 250.0, stock: 12, popularity: 66.0 },
    ProductSeed { id: 21, name: "Portable Charger (10000mAh)", price: 25.0, stock: 50, popularity: 60.0 },
    ProductSeed { id: 22, name: "E-Reader", price: 130.0, stock: 15, popularity: 72.0 },
    ProductSeed { id: 23, name: "Wireless Router", price: 90.0, stock: 25, popularity: 67.0 },
    ProductSeed { id: 24, name: "Bluetooth Tracker", price: 35.0, stock: 40, popularity: 58.0 },
    ProductSeed { id: 25, name: "USB-C Hub", price: 45.0, stock: 30, popularity: 65.0 },
];

/// Products in insertion order, indexed by id.
///
/// Iteration order is stable and is what every tie-break in the recommender
/// falls back to. Ids are unique: constructing from a list with repeated ids
/// keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self { products: Vec::with_capacity(products.len()), index: HashMap::new() };
        for product in products {
            if catalog.index.contains_key(&product.id) {
                tracing::debug!(
                    event_name = "catalog.duplicate_id_skipped",
                    product_id = %product.id,
                    "duplicate product id ignored"
                );
                continue;
            }
            catalog.index.insert(product.id, catalog.products.len());
            catalog.products.push(product);
        }
        catalog
    }

    /// The storefront's 25-product starter inventory.
    pub fn default_inventory() -> Self {
        Self::new(
            PRODUCT_SEEDS
                .iter()
                .map(|seed| Product::new(seed.id, seed.name, seed.price, seed.stock, seed.popularity))
                .collect(),
        )
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|position| &self.products[*position])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.products.iter().try_for_each(Product::validate)
    }

    pub fn mean_popularity(&self) -> Option<f64> {
        if self.products.is_empty() {
            return None;
        }
        let total: f64 = self.products.iter().map(|product| product.popularity).sum();
        Some(total / self.products.len() as f64)
    }

    /// Products ranked by descending popularity; equal popularity keeps catalog order.
    pub fn ranked_by_popularity(&self) -> Vec<&Product> {
        let mut ranked: Vec<&Product> = self.products.iter().collect();
        ranked.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        ranked
    }

    pub fn top_by_popularity(&self, limit: usize) -> Vec<&Product> {
        let mut ranked = self.ranked_by_popularity();
        ranked.truncate(limit);
        ranked
    }

    /// Inserts a new product or updates an existing one.
    ///
    /// Updates keep the stored popularity. On update an empty name, a zero
    /// price or a zero stock keeps the stored value. A new product carrying
    /// `None` popularity is given the current catalog mean.
    pub fn upsert(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        popularity: Option<f64>,
    ) -> Result<&Product, DomainError> {
        let name = name.into();

        if let Some(position) = self.index.get(&id).copied() {
            let existing = &self.products[position];
            let updated = Product {
                id,
                name: if name.trim().is_empty() { existing.name.clone() } else { name },
                price: if price == 0.0 { existing.price } else { price },
                stock: if stock == 0 { existing.stock } else { stock },
                popularity: existing.popularity,
            };
            updated.validate()?;
            self.products[position] = updated;
            tracing::debug!(event_name = "catalog.product_updated", product_id = %id, "product updated");
            return Ok(&self.products[position]);
        }

        if name.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "product {id} needs a name before it can be added"
            )));
        }

        let popularity = popularity
            .or_else(|| self.mean_popularity())
            .unwrap_or(DEFAULT_POPULARITY);
        let product = Product { id, name, price, stock, popularity };
        product.validate()?;

        self.index.insert(id, self.products.len());
        self.products.push(product);
        tracing::debug!(event_name = "catalog.product_added", product_id = %id, popularity, "product added");
        Ok(&self.products[self.products.len() - 1])
    }

    /// Deletes a product; later products keep their relative order.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, DomainError> {
        let position = self.index.remove(&id).ok_or(DomainError::UnknownProduct(id))?;
        let removed = self.products.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        tracing::debug!(event_name = "catalog.product_removed", product_id = %id, "product removed");
        Ok(removed)
    }

    /// Removes ordered quantities from stock. Either every line succeeds or
    /// the catalog is left unchanged.
    pub fn deduct_stock(&mut self, order: &Order) -> Result<(), DomainError> {
        let mut remaining: HashMap<ProductId, u32> = HashMap::new();
        for line in &order.items {
            let product =
                self.get(line.product_id).ok_or(DomainError::UnknownProduct(line.product_id))?;
            let available = remaining.entry(line.product_id).or_insert(product.stock);
            if *available < line.quantity {
                return Err(DomainError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available: *available,
                });
            }
            *available -= line.quantity;
        }

        for (product_id, stock) in remaining {
            let position = self.index[&product_id];
            self.products[position].stock = stock;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
