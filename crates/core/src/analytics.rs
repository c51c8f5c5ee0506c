//! Sales figures derived from order history.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::order::Order;
use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenue {
    pub product_id: ProductId,
    pub units: u64,
    pub revenue: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Sum of recorded order totals.
    pub total_sales: f64,
    pub order_count: usize,
    /// Highest revenue first; ties keep first-sold order.
    pub product_revenue: Vec<ProductRevenue>,
    /// Lines naming products the catalog no longer carries.
    pub unresolved_lines: usize,
}

impl SalesSummary {
    /// Per-product revenue is priced at current catalog prices.
    pub fn from_orders(orders: &[Order], catalog: &Catalog) -> Self {
        let mut summary = Self { order_count: orders.len(), ..Self::default() };

        for order in orders {
            summary.total_sales += order.total_cost;

            for line in &order.items {
                let Some(product) = catalog.get(line.product_id) else {
                    summary.unresolved_lines += 1;
                    continue;
                };

                let revenue = product.price * f64::from(line.quantity);
                match summary
                    .product_revenue
                    .iter_mut()
                    .find(|entry| entry.product_id == line.product_id)
                {
                    Some(entry) => {
                        entry.units += u64::from(line.quantity);
                        entry.revenue += revenue;
                    }
                    None => summary.product_revenue.push(ProductRevenue {
                        product_id: line.product_id,
                        units: u64::from(line.quantity),
                        revenue,
                    }),
                }
            }
        }

        summary.product_revenue.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        summary
    }

    pub fn top_products(&self, limit: usize) -> &[ProductRevenue] {
        &self.product_revenue[..limit.min(self.product_revenue.len())]
    }

    /// Name of the catalog's most popular product.
    pub fn most_popular(catalog: &Catalog) -> Option<&str> {
        catalog.top_by_popularity(1).into_iter().next().map(|product| product.name.as_str())
    }
}
