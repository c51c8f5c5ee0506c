use serde::Serialize;
use storefront_core::config::LoadOptions;
use storefront_core::errors::ApplicationError;
use storefront_core::SalesSummary;

use crate::commands::{load_config, CommandResult};
use crate::snapshot::{load_catalog, load_orders};
use crate::SnapshotArgs;

#[derive(Debug, Serialize)]
struct SalesOutput {
    most_popular: Option<String>,
    #[serde(flatten)]
    summary: SalesSummary,
}

pub fn run(options: &LoadOptions, args: &SnapshotArgs) -> CommandResult {
    let output = (|| -> Result<SalesOutput, ApplicationError> {
        let config = load_config(options, args, None)?;
        let catalog = load_catalog(config.data.catalog_path.as_deref())?;
        let orders = load_orders(config.data.orders_path.as_deref())?;

        let summary = SalesSummary::from_orders(&orders, &catalog);
        if summary.unresolved_lines > 0 {
            tracing::warn!(
                event_name = "cli.sales.unresolved_lines",
                unresolved_lines = summary.unresolved_lines,
                "order lines reference products missing from the catalog"
            );
        }

        Ok(SalesOutput {
            most_popular: SalesSummary::most_popular(&catalog).map(str::to_owned),
            summary,
        })
    })();

    match output {
        Ok(output) => CommandResult::success("sales", output),
        Err(error) => CommandResult::from_application_error("sales", error),
    }
}
