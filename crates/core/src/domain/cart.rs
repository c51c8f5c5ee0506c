use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::customer::CustomerId;
use crate::domain::order::{Order, OrderId, OrderLine};
use crate::domain::product::ProductId;
use crate::errors::DomainError;

/// Items a customer has selected but not yet ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<OrderLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging into an existing line for the same product.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvariantViolation(format!(
                "cannot add zero units of product {product_id}"
            )));
        }

        match self.lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(OrderLine { product_id, quantity }),
        }
        Ok(())
    }

    /// Adds a catalog product, refusing unknown ids and quantities that would
    /// take the cart past the product's stock.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let product = catalog.get(product_id).ok_or(DomainError::UnknownProduct(product_id))?;
        let requested = self.quantity_of(product_id).saturating_add(quantity);
        if requested > product.stock {
            return Err(DomainError::InsufficientStock {
                product_id,
                requested,
                available: product.stock,
            });
        }
        self.add(product_id, quantity)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Product ids in the order they were first added.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|line| line.product_id).collect()
    }

    pub fn subtotal(&self, catalog: &Catalog) -> Result<f64, DomainError> {
        self.lines.iter().try_fold(0.0, |total, line| {
            let product =
                catalog.get(line.product_id).ok_or(DomainError::UnknownProduct(line.product_id))?;
            Ok(total + product.price * f64::from(line.quantity))
        })
    }

    /// Builds a priced order from the cart contents. The cart is left untouched.
    pub fn to_order(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
        catalog: &Catalog,
    ) -> Result<Order, DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let mut order = Order::new(order_id, customer_id, self.lines.clone());
        order.calculate_total(catalog)?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::Cart;
    use crate::catalog::Catalog;
    use crate::domain::customer::CustomerId;
    use crate::domain::order::{OrderId, OrderLine};
    use crate::domain::product::{Product, ProductId};
    use crate::errors::DomainError;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "Laptop", 1200.0, 30, 90.0),
            Product::new(13, "Wireless Mouse", 40.0, 45, 68.0),
        ])
    }

    #[test]
    fn adding_same_product_merges_quantities() {
        let mut cart = Cart::new();
        cart.add(ProductId(13), 1).expect("add mouse");
        cart.add(ProductId(1), 1).expect("add laptop");
        cart.add(ProductId(13), 2).expect("add more mice");

        assert_eq!(cart.lines(), &[OrderLine::new(13, 3), OrderLine::new(1, 1)]);
        assert_eq!(cart.product_ids(), vec![ProductId(13), ProductId(1)]);
    }

    #[test]
    fn catalog_add_rejects_unknown_products() {
        let mut cart = Cart::new();
        let error = cart.add_from_catalog(&catalog(), ProductId(404), 1).expect_err("unknown id");

        assert_eq!(error, DomainError::UnknownProduct(ProductId(404)));
        assert!(cart.is_empty());
    }

    #[test]
    fn catalog_add_rejects_quantities_beyond_stock() {
        let mut cart = Cart::new();
        cart.add_from_catalog(&catalog(), ProductId(1), 20).expect("within stock");

        let error = cart.add_from_catalog(&catalog(), ProductId(1), 11).expect_err("31 > 30");
        assert_eq!(
            error,
            DomainError::InsufficientStock { product_id: ProductId(1), requested: 31, available: 30 }
        );
        assert_eq!(cart.quantity_of(ProductId(1)), 20);

        cart.add_from_catalog(&catalog(), ProductId(1), 10).expect("exactly the stock");
        assert_eq!(cart.quantity_of(ProductId(1)), 30);
    }

    #[test]
    fn subtotal_prices_every_line() {
        let mut cart = Cart::new();
        cart.add(ProductId(1), 1).expect("add laptop");
        cart.add(ProductId(13), 2).expect("add mice");

        let subtotal = cart.subtotal(&catalog()).expect("known products");
        assert!((subtotal - 1280.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_cart_cannot_become_an_order() {
        let error = Cart::new()
            .to_order(OrderId(1), CustomerId("alice".to_string()), &catalog())
            .expect_err("empty cart");
        assert_eq!(error, DomainError::EmptyCart);
    }

    #[test]
    fn order_from_cart_carries_total() {
        let mut cart = Cart::new();
        cart.add(ProductId(13), 2).expect("add mice");

        let order = cart
            .to_order(OrderId(5), CustomerId("alice".to_string()), &catalog())
            .expect("priced order");
        assert_eq!(order.order_id, OrderId(5));
        assert!((order.total_cost - 80.0).abs() < f64::EPSILON);
        assert!(!cart.is_empty());
    }

    #[test]
    fn zero_quantity_is_rejected_and_remove_reports_presence() {
        let mut cart = Cart::new();
        assert!(cart.add(ProductId(1), 0).is_err());

        cart.add(ProductId(1), 1).expect("add laptop");
        assert!(cart.remove(ProductId(1)));
        assert!(!cart.remove(ProductId(1)));
        assert!(cart.is_empty());
    }
}
