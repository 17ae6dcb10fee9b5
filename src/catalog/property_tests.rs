//! Property-Based Tests for Pricing and Validation

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::catalog::{final_price, ProductInput, MAX_BASE_PRICE, MAX_NAME_LENGTH};

/// Prices in cents between 1.00 and 100000.00
fn base_price_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..=MAX_BASE_PRICE * 100).prop_map(|cents| Decimal::new(cents, 2))
}

fn valid_input_strategy() -> impl Strategy<Value = ProductInput> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,59}",
        proptest::option::of("[a-z ]{0,250}"),
        base_price_strategy(),
        0i32..=100,
        1i32..1000,
    )
        .prop_map(
            |(name, description, base_price, markup_percentage, category_id)| ProductInput {
                name,
                description,
                base_price,
                markup_percentage,
                category_id,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // final = base * (100 + markup) / 100 with no rounding at all.
    #[test]
    fn prop_final_price_exact(base in base_price_strategy(), markup in 0i32..=100) {
        let price = final_price(base, markup);
        prop_assert_eq!(
            price * Decimal::ONE_HUNDRED,
            base * Decimal::from(100 + markup)
        );
        prop_assert!(price >= base);
        prop_assert!(price <= base * Decimal::TWO);
    }

    // The stored product derives the same price as its inputs.
    #[test]
    fn prop_product_price_follows_fields(input in valid_input_strategy(), id in 1i32..10_000) {
        let expected = final_price(input.base_price, input.markup_percentage);
        let product = input.with_id(id);
        prop_assert_eq!(product.final_price(), expected);
    }

    #[test]
    fn prop_valid_inputs_pass(input in valid_input_strategy()) {
        prop_assert!(input.validate().is_ok());
    }

    #[test]
    fn prop_long_names_fail(extra in 1usize..40, input in valid_input_strategy()) {
        let input = ProductInput {
            name: "n".repeat(MAX_NAME_LENGTH + extra),
            ..input
        };
        prop_assert!(input.validate().is_err());
    }
}
