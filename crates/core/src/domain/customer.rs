use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderId, OrderLine};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a customer bought in one placed order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub order_id: OrderId,
    pub items: Vec<OrderLine>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub purchase_history: Vec<PurchaseRecord>,
}

impl Customer {
    /// Walk-in customers are registered under their id as display name.
    pub fn new(customer_id: impl Into<String>) -> Self {
        let id: String = customer_id.into();
        Self { name: id.clone(), customer_id: CustomerId(id), purchase_history: Vec::new() }
    }

    /// Appends the order's lines to the history; an order already recorded is ignored.
    pub fn record_order(&mut self, order: &Order) {
        if self.purchase_history.iter().any(|record| record.order_id == order.order_id) {
            return;
        }
        self.purchase_history
            .push(PurchaseRecord { order_id: order.order_id, items: order.items.clone() });
    }

    pub fn order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.purchase_history.iter().map(|record| record.order_id)
    }
}
