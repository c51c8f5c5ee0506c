use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::customer::CustomerId;
use crate::domain::product::ProductId;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `(product, quantity)` entry. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(ProductId, u32)", into = "(ProductId, u32)")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self { product_id: ProductId(product_id), quantity }
    }
}

impl From<(ProductId, u32)> for OrderLine {
    fn from((product_id, quantity): (ProductId, u32)) -> Self {
        Self { product_id, quantity }
    }
}

impl From<OrderLine> for (ProductId, u32) {
    fn from(line: OrderLine) -> Self {
        (line.product_id, line.quantity)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total_cost: f64,
}

impl Order {
    pub fn new(order_id: OrderId, customer_id: CustomerId, items: Vec<OrderLine>) -> Self {
        Self { order_id, customer_id, items, total_cost: 0.0 }
    }

    /// Product ids in line order. Repeated lines for the same product are kept.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(|line| line.product_id)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(line) = self.items.iter().find(|line| line.quantity == 0) {
            return Err(DomainError::InvariantViolation(format!(
                "order {} has zero quantity for product {}",
                self.order_id, line.product_id
            )));
        }
        Ok(())
    }

    /// Prices every line against the catalog and stores the result in `total_cost`.
    pub fn calculate_total(&mut self, catalog: &Catalog) -> Result<f64, DomainError> {
        let mut total = 0.0;
        for line in &self.items {
            let product =
                catalog.get(line.product_id).ok_or(DomainError::UnknownProduct(line.product_id))?;
            total += product.price * f64::from(line.quantity);
        }
        self.total_cost = total;
        Ok(total)
    }
}
