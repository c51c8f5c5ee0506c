//! Cart-based product recommendations
//!
//! Blends two signals per candidate product: how often it was bought
//! together with something in the cart, and how close it sits to the cart
//! items in (price, popularity) space. An empty cart falls back to global
//! popularity.

mod engine;
mod scoring;
mod types;

pub use engine::Recommender;
pub use scoring::{attribute_distance, co_purchase_counts, content_similarity, similarity_from_distance};
pub use types::*;

/// Maximum recommendations returned when nothing else is configured
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 3;
