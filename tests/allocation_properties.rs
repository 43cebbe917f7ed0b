//! Property tests for the allocation arithmetic over randomized receipts.

use proptest::prelude::*;
use rust_decimal::Decimal;

use billsplit::domain::split::Receipt;

/// Price in cents, or `None` for an item still waiting on a price.
fn arb_price() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        3 => (0i64..=20_000).prop_map(Some),
        1 => Just(None),
    ]
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn build_receipt(prices: &[Option<i64>], tax: i64, tip: i64) -> Receipt {
    let mut receipt = Receipt::new("Fuzzed");
    for (index, price) in prices.iter().enumerate() {
        receipt = receipt.add_item(format!("Item {index}"), price.map(cents));
    }
    receipt.update_tax_and_tip(cents(tax), cents(tip))
}

proptest! {
    #[test]
    fn subtotal_is_the_sum_of_entered_prices(
        prices in prop::collection::vec(arb_price(), 0..12),
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        let receipt = build_receipt(&prices, tax, tip);
        let expected: Decimal = prices.iter().map(|p| cents(p.unwrap_or(0))).sum();
        prop_assert_eq!(receipt.subtotal(), expected);
        prop_assert_eq!(receipt.total(), expected + cents(tax) + cents(tip));
    }

    #[test]
    fn final_price_drift_is_bounded_by_a_cent_per_item(
        prices in prop::collection::vec((1i64..=20_000).prop_map(Some), 1..12),
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        let receipt = build_receipt(&prices, tax, tip);
        let sum: Decimal = receipt.items().iter().map(|i| i.final_price()).sum();
        let tolerance = cents(1) * Decimal::from(receipt.items().len());
        prop_assert!((sum - receipt.total()).abs() <= tolerance);
    }

    #[test]
    fn final_prices_never_undercut_originals(
        prices in prop::collection::vec(arb_price(), 0..12),
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        // Non-negative extras can only push a priced item's share up, modulo
        // half a cent of rounding.
        let receipt = build_receipt(&prices, tax, tip);
        for item in receipt.items() {
            match item.original_price() {
                None => prop_assert_eq!(item.final_price(), Decimal::ZERO),
                Some(original) => {
                    prop_assert!(item.final_price() >= original - Decimal::new(5, 3));
                }
            }
        }
    }

    #[test]
    fn zero_subtotal_leaves_originals_untouched(
        count in 0usize..6,
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        let prices: Vec<Option<i64>> = (0..count).map(|i| (i % 2 == 0).then_some(0)).collect();
        let receipt = build_receipt(&prices, tax, tip);
        prop_assert_eq!(receipt.subtotal(), Decimal::ZERO);
        prop_assert_eq!(receipt.total(), cents(tax) + cents(tip));
        for (item, price) in receipt.items().iter().zip(&prices) {
            prop_assert_eq!(item.final_price(), cents(price.unwrap_or(0)));
        }
    }

    #[test]
    fn redistribution_is_stable_under_repeat(
        prices in prop::collection::vec(arb_price(), 0..12),
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        let once = build_receipt(&prices, tax, tip);
        let twice = once.clone().update_tax_and_tip(cents(tax), cents(tip));
        prop_assert_eq!(once.subtotal(), twice.subtotal());
        prop_assert_eq!(once.total(), twice.total());
        for (a, b) in once.items().iter().zip(twice.items()) {
            prop_assert_eq!(a.final_price(), b.final_price());
        }
    }

    #[test]
    fn removing_every_item_zeroes_the_subtotal(
        prices in prop::collection::vec(arb_price(), 1..8),
        tax in 0i64..=5_000,
        tip in 0i64..=5_000,
    ) {
        let mut receipt = build_receipt(&prices, tax, tip);
        while let Some(id) = receipt.items().first().map(|i| i.id().clone()) {
            receipt = receipt.remove_item(&id);
        }
        prop_assert_eq!(receipt.subtotal(), Decimal::ZERO);
        prop_assert_eq!(receipt.total(), cents(tax) + cents(tip));
    }
}
