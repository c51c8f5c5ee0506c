//! Recommendation engine implementation

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::config::RecommenderConfig;
use crate::domain::order::Order;
use crate::domain::product::{Product, ProductId};

use super::scoring::{accumulate_similarity, co_purchase_counts};
use super::types::{Recommendation, RecommendationSource};
use super::DEFAULT_MAX_RECOMMENDATIONS;

/// Ranks catalog products for a cart.
///
/// Holds no state between calls; every call reads only the snapshots it is
/// handed and never fails. Identifiers that cannot be resolved in the
/// catalog are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    max_results: usize,
}

impl Recommender {
    /// Create a recommender returning at most three products
    pub fn new() -> Self {
        Self { max_results: DEFAULT_MAX_RECOMMENDATIONS }
    }

    /// Create with a custom result limit (at least one)
    pub fn with_max_results(max_results: usize) -> Self {
        Self { max_results: max_results.max(1) }
    }

    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self::with_max_results(config.max_results)
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Product ids to suggest for `cart`, most relevant first.
    pub fn recommend(&self, cart: &[ProductId], orders: &[Order], catalog: &Catalog) -> Vec<ProductId> {
        self.recommend_scored(cart, orders, catalog)
            .into_iter()
            .map(|recommendation| recommendation.product_id)
            .collect()
    }

    /// Same ranking as [`Recommender::recommend`] with per-product score breakdown.
    pub fn recommend_scored(
        &self,
        cart: &[ProductId],
        orders: &[Order],
        catalog: &Catalog,
    ) -> Vec<Recommendation> {
        if cart.is_empty() {
            tracing::debug!(
                event_name = "recommend.fallback.popularity",
                catalog_size = catalog.len(),
                "empty cart, ranking by popularity"
            );
            return self.most_popular(catalog);
        }

        let cart_ids: HashSet<ProductId> = cart.iter().copied().collect();
        let candidates: Vec<&Product> =
            catalog.iter().filter(|product| !cart_ids.contains(&product.id)).collect();

        if candidates.is_empty() {
            tracing::debug!(
                event_name = "recommend.no_candidates",
                cart_size = cart.len(),
                catalog_size = catalog.len(),
                "cart covers the whole catalog"
            );
            return Vec::new();
        }

        let counts = co_purchase_counts(&cart_ids, orders);

        // Cart ids missing from the catalog have no attributes to compare.
        let cart_products: Vec<&Product> = cart.iter().filter_map(|id| catalog.get(*id)).collect();
        if cart_products.len() < cart.len() {
            tracing::debug!(
                event_name = "recommend.unknown_cart_products",
                unresolved = cart.len() - cart_products.len(),
                "cart products missing from catalog skipped for similarity"
            );
        }
        let similarities = accumulate_similarity(&cart_products, &candidates);

        let mut ranked: Vec<Recommendation> = candidates
            .iter()
            .zip(similarities)
            .map(|(candidate, similarity)| {
                let co_purchase_count = counts.get(&candidate.id).copied().unwrap_or(0);
                Recommendation {
                    product_id: candidate.id,
                    score: f64::from(co_purchase_count) + similarity,
                    co_purchase_count,
                    similarity,
                    source: RecommendationSource::Blended,
                }
            })
            .collect();

        // Stable: equal scores keep catalog order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.max_results);

        tracing::debug!(
            event_name = "recommend.ranked",
            cart_size = cart.len(),
            candidates = candidates.len(),
            co_purchased = counts.len(),
            returned = ranked.len(),
            "recommendations ranked"
        );

        ranked
    }

    fn most_popular(&self, catalog: &Catalog) -> Vec<Recommendation> {
        catalog
            .top_by_popularity(self.max_results)
            .into_iter()
            .map(|product| Recommendation {
                product_id: product.id,
                score: product.popularity,
                co_purchase_count: 0,
                similarity: 0.0,
                source: RecommendationSource::Popularity,
            })
            .collect()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
