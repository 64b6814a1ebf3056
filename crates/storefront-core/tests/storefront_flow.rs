//! End-to-end flows over the sample catalog and small hand-built catalogs.

use storefront_core::prelude::*;
use storefront_core::search::{facets, Collections, QueryCache};

const CATALOG_JSON: &str = include_str!("fixtures/catalog.json");

fn sample_catalog() -> CatalogStore {
    CatalogStore::from_json(CATALOG_JSON, Currency::INR).unwrap()
}

fn inr(amount: i64) -> Money {
    Money::new(amount, Currency::INR)
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn sample_catalog_loads_with_derived_discounts() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 9);

    let lamp = catalog.get_by_id(&ProductId::new("9")).unwrap();
    assert_eq!(lamp.discount_percent, 29);
    assert!(!lamp.in_stock);

    let categories = catalog.categories();
    assert_eq!(categories[0].value, "Electronics");
    assert_eq!(categories[0].count, 6);
}

#[test]
fn cart_totals_follow_product_prices() {
    let catalog = CatalogStore::new(vec![
        Product::new("1", "Headphones", inr(100)).with_original_price(inr(120)),
        Product::new("2", "Cable", inr(50)).with_original_price(inr(50)),
    ])
    .unwrap();

    let mut cart = Cart::new();
    cart.add(&catalog, &ProductId::new("1"), 2);
    cart.add(&catalog, &ProductId::new("2"), 1);

    let pricing = cart.compute_pricing(&catalog, &PricingConfig::default()).unwrap();
    assert_eq!(pricing.subtotal, inr(250));
    assert_eq!(pricing.original_total, inr(290));
    assert_eq!(pricing.total_discount, inr(40));
}

#[test]
fn case_insensitive_category_with_rating_threshold() {
    let criteria = FilterCriteria::builder()
        .category("electronics")
        .price_range(0, 100_000)
        .min_rating(4.0)
        .build()
        .unwrap();
    let product = Product::new("1", "Speaker", inr(500))
        .with_category("Electronics")
        .with_rating(4.5, 12);
    assert!(build_predicate(&criteria)(&product));
}

#[test]
fn set_quantity_zero_drops_entry_from_pricing() {
    let catalog = CatalogStore::new(vec![
        Product::new("1", "Headphones", inr(100)),
        Product::new("2", "Cable", inr(50)),
    ])
    .unwrap();
    let mut cart = Cart::new();
    cart.add(&catalog, &ProductId::new("1"), 1);
    cart.add(&catalog, &ProductId::new("2"), 1);

    cart.set_quantity(&ProductId::new("1"), 0).unwrap();
    assert!(!cart.contains(&ProductId::new("1")));

    let pricing = cart.compute_pricing(&catalog, &PricingConfig::default()).unwrap();
    assert_eq!(pricing.subtotal, inr(50));
    assert_eq!(pricing.item_count, 1);
}

#[test]
fn price_desc_orders_highest_first() {
    let products = vec![
        Product::new("a", "A", inr(10)),
        Product::new("b", "B", inr(30)),
        Product::new("c", "C", inr(20)),
    ];
    let prices: Vec<i64> = sort(&products, SortKey::PriceDesc)
        .iter()
        .map(|p| p.price.amount_minor)
        .collect();
    assert_eq!(prices, vec![30, 20, 10]);
}

#[test]
fn filtered_and_sorted_sample_query() {
    let catalog = sample_catalog();
    let criteria = FilterCriteria::builder()
        .category("Electronics")
        .min_rating(4.5)
        .build()
        .unwrap();
    let result = query(catalog.get_all(), None, &criteria, SortKey::PriceDesc);
    assert_eq!(ids(&result), vec!["3", "1", "2", "8", "4"]);

    let newest = query(catalog.get_all(), None, &FilterCriteria::cleared(), SortKey::Newest);
    assert_eq!(ids(&newest), vec!["8", "7", "4", "6", "2", "5", "1", "3", "9"]);
}

#[test]
fn navigation_category_combines_with_explicit_filters() {
    let catalog = sample_catalog();
    let brands = FilterCriteria::cleared()
        .with_update(CriteriaUpdate::Brands(vec!["apple".into(), "Nike".into()]))
        .unwrap();

    let q = ProductQuery::new(brands.clone(), SortKey::Featured)
        .with_navigation_category("fashion");
    assert_eq!(ids(&q.run(catalog.get_all())), vec!["5"]);

    let disjoint = brands
        .with_update(CriteriaUpdate::Categories(vec!["Electronics".into()]))
        .unwrap();
    let q = ProductQuery::new(disjoint, SortKey::Featured).with_navigation_category("Fashion");
    let page = q.run_paged(catalog.get_all(), 1, 24);
    assert!(page.is_empty());
    assert_eq!(page.pagination.total_pages, 1);
}

#[test]
fn rejected_price_update_keeps_previous_results() {
    let catalog = sample_catalog();
    let mut cache = QueryCache::new(catalog.get_all());
    let current = FilterCriteria::builder().price_range(0, 1_500_000).build().unwrap();
    let before = cache
        .get(&ProductQuery::new(current.clone(), SortKey::PriceAsc))
        .len();

    let next = current
        .with_update(CriteriaUpdate::PriceRange { min: 2_000_000, max: 10 })
        .unwrap_or_else(|_| current.clone());
    let after = cache.get(&ProductQuery::new(next, SortKey::PriceAsc)).len();

    assert_eq!(before, 3);
    assert_eq!(before, after);
    assert_eq!(cache.evaluations(), 1);
}

#[test]
fn pricing_crosses_free_shipping_threshold() {
    let catalog = sample_catalog();
    let config = PricingConfig::default();
    let lamp = ProductId::new("9");

    let mut cart = Cart::new();
    cart.add(&catalog, &lamp, 2);
    let pricing = cart.compute_pricing(&catalog, &config).unwrap();
    assert_eq!(pricing.subtotal, inr(49_800));
    assert_eq!(pricing.shipping_cost, inr(5_000));
    assert_eq!(pricing.tax_amount, inr(8_964));
    assert_eq!(pricing.grand_total, inr(63_764));
    assert_eq!(pricing.amount_to_free_shipping, inr(201));

    cart.add(&catalog, &lamp, 1);
    let pricing = cart.compute_pricing(&catalog, &config).unwrap();
    assert!(pricing.free_shipping_applied);
    assert!(pricing.shipping_cost.is_zero());
}

#[test]
fn collections_and_facets_over_sample() {
    let catalog = sample_catalog();
    let collections = Collections::build(catalog.get_all(), &CatalogConfig::default());
    assert_eq!(ids(&collections.featured), vec!["1", "2", "3", "4"]);
    assert_eq!(ids(&collections.deals), vec!["5", "6", "9"]);
    assert_eq!(ids(&collections.trending), vec!["1", "2", "3", "4", "6", "8"]);

    let criteria = FilterCriteria::builder().brand("apple").build().unwrap();
    let facets = facets(catalog.get_all(), &criteria);
    let apple = facets[1].values.iter().find(|v| v.value == "Apple").unwrap();
    assert_eq!(apple.count, 2);
    assert!(apple.selected);
}

#[test]
fn wishlist_moves_in_stock_items_only() {
    let catalog = sample_catalog();
    let mut wishlist = Wishlist::new();
    let mut cart = Cart::new();
    wishlist.add(&catalog, &ProductId::new("4"));
    wishlist.add(&catalog, &ProductId::new("9"));

    wishlist
        .move_to_cart(&ProductId::new("4"), &mut cart, &catalog)
        .unwrap();
    assert!(wishlist
        .move_to_cart(&ProductId::new("9"), &mut cart, &catalog)
        .is_err());

    assert_eq!(wishlist.product_ids(), &[ProductId::new("9")]);
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn criteria_survive_json_roundtrip() {
    let json = r#"{"categories":["Fashion"],"brands":["Nike","Adidas"],"priceRange":[0,1000000],"ratings":[4,3]}"#;
    let criteria: FilterCriteria = serde_json::from_str(json).unwrap();
    let catalog = sample_catalog();
    let result = query(catalog.get_all(), None, &criteria, SortKey::PriceAsc);
    assert_eq!(ids(&result), vec!["5"]);
}
