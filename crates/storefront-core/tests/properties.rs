//! Property-based tests for filtering, sorting and cart pricing.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use storefront_core::prelude::*;
use storefront_core::search::{filter, matches, Dimension};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const CATEGORIES: [&str; 4] = ["Electronics", "fashion", "Home & Kitchen", "BOOKS"];
const BRANDS: [&str; 5] = ["Apple", "sony", "Nike", "LG", "Xiaomi"];

fn arb_product(index: usize) -> impl Strategy<Value = Product> {
    (
        prop::sample::select(CATEGORIES.to_vec()),
        prop::sample::select(BRANDS.to_vec()),
        0i64..200_000,
        0i64..50_000,
        0u32..=50,
        0u32..5_000,
        prop::option::of(0i64..400),
        0u32..20,
    )
        .prop_map(
            move |(category, brand, price, markup, rating, reviews, age_days, stock)| {
                let mut product = Product::new(
                    index.to_string(),
                    format!("Product {}", index),
                    Money::new(price, Currency::INR),
                )
                .with_original_price(Money::new(price + markup, Currency::INR))
                .with_category(category)
                .with_brand(brand)
                .with_rating(f64::from(rating) / 10.0, reviews)
                .with_stock(stock);
                if let Some(days) = age_days {
                    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
                    product = product.with_created_at(base + Duration::days(days));
                }
                product
            },
        )
}

fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    (0usize..30).prop_flat_map(|n| (0..n).map(arb_product).collect::<Vec<_>>())
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::subsequence(CATEGORIES.to_vec(), 0..=2),
        prop::sample::subsequence(BRANDS.to_vec(), 0..=3),
        prop::option::of((0i64..150_000, 0i64..150_000)),
        prop::sample::subsequence(vec![4.0, 3.0, 2.0, 1.0], 0..=2),
    )
        .prop_map(|(categories, brands, range, ratings)| {
            let mut builder = FilterCriteria::builder();
            for c in categories {
                builder = builder.category(c.to_uppercase());
            }
            for b in brands {
                builder = builder.brand(b.to_lowercase());
            }
            if let Some((a, b)) = range {
                builder = builder.price_range(a.min(b), a.max(b));
            }
            for r in ratings {
                builder = builder.min_rating(r);
            }
            builder.build().unwrap()
        })
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn id_list<P: std::borrow::Borrow<Product>>(products: &[P]) -> Vec<String> {
    products.iter().map(|p| p.borrow().id.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_cleared_criteria_keep_everything(products in arb_products()) {
        let kept = filter(&products, &FilterCriteria::cleared());
        prop_assert_eq!(id_list(&kept), id_list(&products));
    }

    #[test]
    fn prop_dimension_order_is_irrelevant(
        products in arb_products(),
        criteria in arb_criteria(),
        order in Just(Dimension::ALL.to_vec()).prop_shuffle(),
    ) {
        for product in &products {
            let reordered = order.iter().all(|d| d.matches(&criteria, product));
            prop_assert_eq!(reordered, matches(&criteria, product));
        }
    }

    #[test]
    fn prop_filter_only_removes(products in arb_products(), criteria in arb_criteria()) {
        let kept = filter(&products, &criteria);
        prop_assert!(kept.len() <= products.len());
        for product in &kept {
            prop_assert!(build_predicate(&criteria)(*product));
        }
    }

    #[test]
    fn prop_clear_update_resets(criteria in arb_criteria()) {
        let cleared = criteria.with_update(CriteriaUpdate::Clear).unwrap();
        prop_assert!(cleared.is_cleared());
        prop_assert_eq!(cleared, FilterCriteria::cleared());
    }
}

// ---------------------------------------------------------------------------
// Sorting and the pipeline
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_sort_is_idempotent(products in arb_products(), key in arb_sort_key()) {
        let once = sort(&products, key);
        let twice = sort(&once, key);
        prop_assert_eq!(id_list(&once), id_list(&twice));
    }

    #[test]
    fn prop_sort_is_a_permutation(products in arb_products(), key in arb_sort_key()) {
        let mut before = id_list(&products);
        let mut after = id_list(&sort(&products, key));
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_price_asc_is_monotonic(products in arb_products()) {
        let sorted = sort(&products, SortKey::PriceAsc);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].price.amount_minor <= pair[1].price.amount_minor);
        }
    }

    #[test]
    fn prop_query_is_filter_then_sort(
        products in arb_products(),
        criteria in arb_criteria(),
        key in arb_sort_key(),
    ) {
        let piped = query(&products, None, &criteria, key);
        let manual = sort(&filter(&products, &criteria), key);
        prop_assert_eq!(id_list(&piped), id_list(&manual));
        // same inputs, same output
        prop_assert_eq!(id_list(&piped), id_list(&query(&products, None, &criteria, key)));
    }
}

// ---------------------------------------------------------------------------
// Cart pricing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum CartOp {
    Add(usize, i64),
    Set(usize, i64),
    Remove(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..40, -2i64..5).prop_map(|(i, q)| CartOp::Add(i, q)),
            (0usize..40, -2i64..10).prop_map(|(i, q)| CartOp::Set(i, q)),
            (0usize..40).prop_map(CartOp::Remove),
        ],
        0..40,
    )
}

fn apply(cart: &mut Cart, catalog: &CatalogStore, ops: &[CartOp]) {
    for op in ops {
        match op {
            CartOp::Add(i, q) => {
                cart.add(catalog, &ProductId::new(i.to_string()), *q);
            }
            CartOp::Set(i, q) => {
                cart.set_quantity(&ProductId::new(i.to_string()), *q).unwrap();
            }
            CartOp::Remove(i) => {
                cart.remove(&ProductId::new(i.to_string()));
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_pricing_is_idempotent(products in arb_products(), ops in arb_ops()) {
        let catalog = CatalogStore::new(products).unwrap();
        let config = PricingConfig::default();
        let mut cart = Cart::new();
        apply(&mut cart, &catalog, &ops);

        let first = cart.compute_pricing(&catalog, &config).unwrap();
        let second = cart.compute_pricing(&catalog, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cart_entries_stay_positive_and_unique(products in arb_products(), ops in arb_ops()) {
        let catalog = CatalogStore::new(products).unwrap();
        let mut cart = Cart::new();
        apply(&mut cart, &catalog, &ops);

        let mut seen = std::collections::HashSet::new();
        for entry in cart.entries() {
            prop_assert!(entry.quantity >= 1);
            prop_assert!(seen.insert(entry.product_id.clone()));
            prop_assert!(catalog.find(&entry.product_id).is_some());
        }
    }

    #[test]
    fn prop_pricing_totals_are_consistent(products in arb_products(), ops in arb_ops()) {
        let catalog = CatalogStore::new(products).unwrap();
        let config = PricingConfig::default();
        let mut cart = Cart::new();
        apply(&mut cart, &catalog, &ops);

        let p = cart.compute_pricing(&catalog, &config).unwrap();
        prop_assert_eq!(
            p.total_discount.amount_minor,
            p.original_total.amount_minor - p.subtotal.amount_minor
        );
        prop_assert_eq!(
            p.grand_total.amount_minor,
            p.subtotal.amount_minor + p.shipping_cost.amount_minor + p.tax_amount.amount_minor
        );
        prop_assert_eq!(p.item_count, cart.item_count());
        prop_assert!(p.total_discount.amount_minor >= 0);
    }
}
