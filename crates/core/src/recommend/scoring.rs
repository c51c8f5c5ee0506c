//! Scoring signals for recommendations

use std::collections::{HashMap, HashSet};

use crate::domain::order::Order;
use crate::domain::product::{Product, ProductId};

/// Tallies products bought alongside anything in `cart`.
///
/// Every order sharing at least one product with the cart adds one to each
/// of its other lines whose product is not in the cart. Lines are not
/// deduplicated, so a product listed twice in one order counts twice.
/// Products need not exist in any catalog to be counted.
pub fn co_purchase_counts(cart: &HashSet<ProductId>, orders: &[Order]) -> HashMap<ProductId, u32> {
    let mut counts = HashMap::new();

    for order in orders {
        if !order.product_ids().any(|product_id| cart.contains(&product_id)) {
            continue;
        }

        for product_id in order.product_ids().filter(|product_id| !cart.contains(product_id)) {
            *counts.entry(product_id).or_insert(0u32) += 1;
        }
    }

    counts
}

/// Euclidean distance between two products over (price, popularity).
pub fn attribute_distance(a: &Product, b: &Product) -> f64 {
    let price_delta = a.price - b.price;
    let popularity_delta = a.popularity - b.popularity;
    (price_delta * price_delta + popularity_delta * popularity_delta).sqrt()
}

/// Maps a distance onto `(0, 1]`; identical attributes score exactly 1.
pub fn similarity_from_distance(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

pub fn content_similarity(a: &Product, b: &Product) -> f64 {
    similarity_from_distance(attribute_distance(a, b))
}

/// Similarity of each candidate to the cart, summed over cart products.
///
/// The result is parallel to `candidates`. A cart product is never compared
/// with itself.
pub(crate) fn accumulate_similarity(cart_products: &[&Product], candidates: &[&Product]) -> Vec<f64> {
    let mut totals = vec![0.0; candidates.len()];

    for cart_product in cart_products {
        for (total, candidate) in totals.iter_mut().zip(candidates) {
            if candidate.id == cart_product.id {
                continue;
            }
            *total += content_similarity(cart_product, candidate);
        }
    }

    totals
}
