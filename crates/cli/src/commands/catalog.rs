use serde::Serialize;
use storefront_core::config::LoadOptions;
use storefront_core::errors::ApplicationError;
use storefront_core::Product;

use crate::commands::{load_config, CommandResult};
use crate::snapshot::load_catalog;
use crate::SnapshotArgs;

#[derive(Debug, Serialize)]
struct CatalogOutput {
    product_count: usize,
    mean_popularity: Option<f64>,
    products: Vec<Product>,
}

pub fn run(options: &LoadOptions, args: &SnapshotArgs) -> CommandResult {
    let output = (|| -> Result<CatalogOutput, ApplicationError> {
        let config = load_config(options, args, None)?;
        let catalog = load_catalog(config.data.catalog_path.as_deref())?;

        Ok(CatalogOutput {
            product_count: catalog.len(),
            mean_popularity: catalog.mean_popularity(),
            products: catalog.ranked_by_popularity().into_iter().cloned().collect(),
        })
    })();

    match output {
        Ok(output) => CommandResult::success("catalog", output),
        Err(error) => CommandResult::from_application_error("catalog", error),
    }
}
