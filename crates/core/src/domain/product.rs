use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    /// Relative ranking signal; zero when a snapshot omits it.
    #[serde(default)]
    pub popularity: f64,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64, stock: u32, popularity: f64) -> Self {
        Self { id: ProductId(id), name: name.into(), price, stock, popularity }
    }

    /// Price after applying a fractional discount (`0.15` = 15% off).
    pub fn apply_discount(&self, discount_rate: f64) -> Result<f64, DomainError> {
        if !(0.0..=1.0).contains(&discount_rate) {
            return Err(DomainError::InvariantViolation(format!(
                "discount rate must be within 0..=1, got {discount_rate}"
            )));
        }
        Ok(self.price * (1.0 - discount_rate))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::InvariantViolation(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }
        if !self.popularity.is_finite() || self.popularity < 0.0 {
            return Err(DomainError::InvariantViolation(format!(
                "product {} has invalid popularity {}",
                self.id, self.popularity
            )));
        }
        Ok(())
    }
}
