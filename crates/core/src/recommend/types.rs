//! Types for the recommendation engine

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

/// Which ranking produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Global popularity ranking (empty cart)
    Popularity,
    /// Co-purchase count plus content similarity to the cart
    Blended,
}

impl RecommendationSource {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            RecommendationSource::Popularity => "Popular with all shoppers",
            RecommendationSource::Blended => "Goes well with your cart",
        }
    }
}

/// A ranked product with the components of its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    /// Ranking key. Popularity for [`RecommendationSource::Popularity`],
    /// otherwise `co_purchase_count + similarity`.
    pub score: f64,
    /// Lines in cart-overlapping orders that name this product
    pub co_purchase_count: u32,
    /// Similarity to the cart summed over cart items, each term in `(0, 1]`
    pub similarity: f64,
    pub source: RecommendationSource,
}
