use serde::Serialize;
use storefront_core::config::LoadOptions;
use storefront_core::errors::ApplicationError;
use storefront_core::{Catalog, ProductId, Recommendation, RecommendationSource, Recommender};

use crate::commands::{load_config, CommandResult};
use crate::snapshot::{load_catalog, load_orders};
use crate::RecommendArgs;

#[derive(Debug, Serialize)]
struct RecommendOutput {
    cart: Vec<ProductId>,
    source: Option<RecommendationSource>,
    recommendations: Vec<RecommendedProduct>,
}

#[derive(Debug, Serialize)]
struct RecommendedProduct {
    product_id: ProductId,
    name: String,
    price: f64,
    score: f64,
    co_purchase_count: u32,
    similarity: f64,
    reason: &'static str,
}

pub fn run(options: &LoadOptions, args: &RecommendArgs) -> CommandResult {
    match build_output(options, args) {
        Ok(output) => CommandResult::success("recommend", output),
        Err(error) => CommandResult::from_application_error("recommend", error),
    }
}

fn build_output(
    options: &LoadOptions,
    args: &RecommendArgs,
) -> Result<RecommendOutput, ApplicationError> {
    let config = load_config(options, &args.snapshot, args.limit)?;
    let catalog = load_catalog(config.data.catalog_path.as_deref())?;
    let orders = load_orders(config.data.orders_path.as_deref())?;

    let cart: Vec<ProductId> = args.cart.iter().copied().map(ProductId).collect();
    let ranked = Recommender::from_config(&config.recommender).recommend_scored(&cart, &orders, &catalog);

    tracing::info!(
        event_name = "cli.recommend.ranked",
        cart_size = cart.len(),
        orders = orders.len(),
        returned = ranked.len(),
        "recommendations computed"
    );

    Ok(RecommendOutput {
        source: ranked.first().map(|recommendation| recommendation.source),
        recommendations: resolve(&ranked, &catalog),
        cart,
    })
}

/// Joins ranked ids back to display fields. Every ranked id comes from the catalog.
fn resolve(ranked: &[Recommendation], catalog: &Catalog) -> Vec<RecommendedProduct> {
    ranked
        .iter()
        .filter_map(|recommendation| {
            let product = catalog.get(recommendation.product_id)?;
            Some(RecommendedProduct {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                score: recommendation.score,
                co_purchase_count: recommendation.co_purchase_count,
                similarity: recommendation.similarity,
                reason: recommendation.source.description(),
            })
        })
        .collect()
}
