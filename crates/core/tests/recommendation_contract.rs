use std::collections::HashSet;

use storefront_core::{
    Catalog, CustomerId, Order, OrderId, OrderLine, Product, ProductId, RecommendationSource,
    Recommender,
};

fn product(id: u64, price: f64, popularity: f64) -> Product {
    Product::new(id, format!("Product {id}"), price, 10, popularity)
}

fn order(id: u64, items: &[(u64, u32)]) -> Order {
    Order::new(
        OrderId(id),
        CustomerId(format!("customer-{}", id % 3)),
        items.iter().map(|(product_id, quantity)| OrderLine::new(*product_id, *quantity)).collect(),
    )
}

fn ids(values: &[u64]) -> Vec<ProductId> {
    values.iter().copied().map(ProductId).collect()
}

fn sample_history() -> Vec<Order> {
    vec![
        order(1, &[(1, 1), (7, 1), (13, 2)]),
        order(2, &[(2, 1), (21, 1)]),
        order(3, &[(1, 1), (12, 1), (13, 1)]),
        order(4, &[(5, 1), (7, 1)]),
        order(5, &[(18, 1), (21, 2), (99, 1)]),
        order(6, &[(2, 1), (8, 1), (6, 1)]),
    ]
}

#[test]
fn co_purchased_twin_outranks_distant_product() {
    let catalog =
        Catalog::new(vec![product(1, 100.0, 90.0), product(2, 100.0, 90.0), product(3, 500.0, 10.0)]);
    let orders = vec![order(1, &[(1, 1), (2, 1)])];

    let result = Recommender::new().recommend(&ids(&[1]), &orders, &catalog);

    assert_eq!(result, ids(&[2, 3]));
}

#[test]
fn empty_cart_returns_three_most_popular() {
    let catalog = Catalog::new(vec![
        Product::new(10, "X", 10.0, 1, 90.0),
        Product::new(11, "Y", 10.0, 1, 85.0),
        Product::new(12, "Z", 10.0, 1, 70.0),
        Product::new(13, "W", 10.0, 1, 60.0),
    ]);

    let result = Recommender::new().recommend(&[], &[], &catalog);

    assert_eq!(result, ids(&[10, 11, 12]));
}

#[test]
fn empty_cart_ignores_order_history() {
    let catalog = Catalog::default_inventory();
    let recommender = Recommender::new();

    let without_history = recommender.recommend(&[], &[], &catalog);
    let with_history = recommender.recommend(&[], &sample_history(), &catalog);

    assert_eq!(without_history, with_history);
    // Laptop 90, Desktop PC 88, then Smartphone and Drone tie at 85 in catalog order.
    assert_eq!(without_history, ids(&[1, 4, 2]));
}

#[test]
fn empty_cart_with_small_catalog_returns_what_exists() {
    let catalog = Catalog::new(vec![product(1, 5.0, 1.0), product(2, 5.0, 2.0)]);
    assert_eq!(Recommender::new().recommend(&[], &[], &catalog), ids(&[2, 1]));
    assert!(Recommender::new().recommend(&[], &[], &Catalog::default()).is_empty());
}

#[test]
fn cart_covering_catalog_yields_nothing() {
    let catalog = Catalog::new(vec![product(1, 5.0, 1.0), product(2, 5.0, 2.0)]);
    let orders = vec![order(1, &[(1, 1), (2, 1)])];

    assert!(Recommender::new().recommend(&ids(&[2, 1]), &orders, &catalog).is_empty());
}

#[test]
fn non_empty_cart_against_empty_catalog_yields_nothing() {
    let orders = vec![order(1, &[(1, 1), (2, 1)])];
    assert!(Recommender::new().recommend(&ids(&[1]), &orders, &Catalog::default()).is_empty());
}

#[test]
fn products_missing_from_catalog_are_skipped() {
    let catalog =
        Catalog::new(vec![product(1, 100.0, 90.0), product(2, 120.0, 80.0), product(3, 900.0, 5.0)]);
    let orders = vec![order(1, &[(1, 1), (404, 3), (3, 1)]), order(2, &[(404, 1), (2, 1)])];

    let ranked = Recommender::new().recommend_scored(&ids(&[1]), &orders, &catalog);
    let returned: Vec<ProductId> = ranked.iter().map(|r| r.product_id).collect();

    assert!(!returned.contains(&ProductId(404)));
    assert_eq!(returned, ids(&[3, 2]));
    assert_eq!(ranked[0].co_purchase_count, 1);
}

#[test]
fn unknown_cart_product_still_qualifies_orders_for_co_purchase() {
    let catalog = Catalog::new(vec![product(1, 100.0, 90.0), product(2, 5000.0, 1.0)]);
    let orders = vec![order(1, &[(404, 1), (2, 1)])];

    let ranked = Recommender::new().recommend_scored(&ids(&[404]), &orders, &catalog);

    assert_eq!(ranked.iter().map(|r| r.product_id).collect::<Vec<_>>(), ids(&[2, 1]));
    assert_eq!(ranked[0].co_purchase_count, 1);
    assert_eq!(ranked[0].similarity, 0.0);
    assert_eq!(ranked[1].score, 0.0);
}

#[test]
fn output_never_contains_cart_items_or_duplicates() {
    let catalog = Catalog::default_inventory();
    let history = sample_history();
    let recommender = Recommender::new();

    let all_ids: Vec<ProductId> = catalog.iter().map(|product| product.id).collect();
    for (position, first) in all_ids.iter().enumerate() {
        for second in &all_ids[position..] {
            let cart = vec![*first, *second];
            let result = recommender.recommend(&cart, &history, &catalog);

            assert!(result.len() <= 3);
            assert!(result.iter().all(|id| !cart.contains(id)), "cart {cart:?} leaked into {result:?}");
            let unique: HashSet<ProductId> = result.iter().copied().collect();
            assert_eq!(unique.len(), result.len(), "duplicates in {result:?}");
        }
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let catalog = Catalog::default_inventory();
    let history = sample_history();
    let recommender = Recommender::new();
    let cart = ids(&[1, 13]);

    let first = recommender.recommend_scored(&cart, &history, &catalog);
    for _ in 0..10 {
        assert_eq!(recommender.recommend_scored(&cart, &history, &catalog), first);
    }
}

#[test]
fn closer_candidate_ranks_higher_when_co_purchase_counts_match() {
    let catalog = Catalog::new(vec![
        product(1, 100.0, 50.0),
        product(2, 400.0, 50.0),
        product(3, 110.0, 50.0),
    ]);
    let orders = vec![order(1, &[(1, 1), (2, 1), (3, 1)])];

    let ranked = Recommender::new().recommend_scored(&ids(&[1]), &orders, &catalog);

    assert_eq!(ranked[0].product_id, ProductId(3));
    assert_eq!(ranked[0].co_purchase_count, ranked[1].co_purchase_count);
    assert!(ranked[0].similarity > ranked[1].similarity);
}

#[test]
fn co_purchase_counts_dwarf_similarity() {
    let catalog = Catalog::new(vec![
        product(1, 100.0, 50.0),
        product(2, 100.0, 50.0),
        product(3, 2000.0, 1.0),
    ]);
    let orders = vec![order(1, &[(1, 1), (3, 1)]), order(2, &[(1, 1), (3, 1)])];

    let ranked = Recommender::new().recommend_scored(&ids(&[1]), &orders, &catalog);

    assert_eq!(ranked[0].product_id, ProductId(3));
    assert!(ranked[0].score > 2.0 && ranked[0].score < 2.01);
    assert_eq!(ranked[1].score, 1.0);
}

#[test]
fn limit_is_configurable() {
    let catalog = Catalog::default_inventory();

    let five = Recommender::with_max_results(5).recommend(&ids(&[1]), &sample_history(), &catalog);
    let three = Recommender::new().recommend(&ids(&[1]), &sample_history(), &catalog);

    assert_eq!(five.len(), 5);
    assert_eq!(&five[..3], three.as_slice());
}

#[test]
fn laptop_cart_prefers_its_accessories() {
    let catalog = Catalog::default_inventory();
    let ranked = Recommender::new().recommend_scored(&ids(&[1]), &sample_history(), &catalog);

    // Wireless Mouse is in both laptop orders.
    assert_eq!(ranked[0].product_id, ProductId(13));
    assert_eq!(ranked[0].co_purchase_count, 2);
    assert!(ranked.iter().all(|r| r.source == RecommendationSource::Blended));
}
