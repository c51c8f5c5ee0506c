//! Reads catalog and order snapshots handed over by the storefront shell.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use storefront_core::errors::ApplicationError;
use storefront_core::{Catalog, Order};

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ApplicationError> {
    let catalog = match path {
        Some(path) => read_json::<Catalog>(path)?,
        None => Catalog::default_inventory(),
    };
    catalog.validate()?;

    let source =
        path.map(|path| path.display().to_string()).unwrap_or_else(|| "builtin".to_string());
    tracing::debug!(
        event_name = "snapshot.catalog.loaded",
        products = catalog.len(),
        source = %source,
        "catalog snapshot loaded"
    );
    Ok(catalog)
}

pub fn load_orders(path: Option<&Path>) -> Result<Vec<Order>, ApplicationError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let orders = read_json::<Vec<Order>>(path)?;
    for order in &orders {
        order.validate()?;
    }

    tracing::debug!(
        event_name = "snapshot.orders.loaded",
        orders = orders.len(),
        source = %path.display(),
        "order snapshot loaded"
    );
    Ok(orders)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ApplicationError> {
    parse_json_file(path).map_err(|error| ApplicationError::Input(format!("{error:#}")))
}

fn parse_json_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("could not read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("could not parse `{}`", path.display()))
}
