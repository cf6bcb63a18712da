//! Quote Import and Pricing Property Tests
//!
//! Properties that must hold across the import strategies and both pricing
//! modes for arbitrary well-formed input.

use proptest::prelude::*;
use quote_models::{LineItem, PricingMode};
use quote_utils::{price_collection, ImportNormalizer, PricingEngine};

// ===== Import: every described row survives =====

mod import_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A CSV row with a description always yields exactly one item
        #[test]
        fn prop_csv_rows_with_description_are_kept(
            rows in prop::collection::vec(("[A-Za-z][A-Za-z ]{0,30}", 1u32..500, 0u32..100_000), 1..20),
        ) {
            let mut csv = String::from("Description,Qty,Price\n");
            for (description, qty, cents) in &rows {
                csv.push_str(&format!("{},{},{}.{:02}\n", description, qty, cents / 100, cents % 100));
            }

            let parsed = ImportNormalizer::new().parse_bytes("rows.csv", csv.as_bytes(), None).unwrap();
            prop_assert_eq!(parsed.items.len(), rows.len());
            for (item, (_, qty, _)) in parsed.items.iter().zip(&rows) {
                prop_assert_eq!(item.quantity, *qty);
                prop_assert!(!item.description.is_empty());
            }
        }

        /// Name-only XML items are imported with the name as description
        #[test]
        fn prop_xml_name_only_items(names in prop::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,20}[A-Za-z0-9]", 1..10)) {
            let body: String = names.iter()
                .map(|name| format!("<item><name>{}</name></item>", name))
                .collect();
            let xml = format!("<quote>{}</quote>", body);

            let parsed = ImportNormalizer::new().parse_bytes("q.xml", xml.as_bytes(), None).unwrap();
            let descriptions: Vec<&str> = parsed.items.iter().map(|item| item.description.as_str()).collect();
            let expected: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(descriptions, expected);
        }

        /// Imported items always satisfy the line item invariants
        #[test]
        fn prop_imported_items_are_well_formed(cells in prop::collection::vec(".{0,12}", 1..6)) {
            let csv = format!("a,b,c\n{}\n", cells.join(","));
            if let Ok(parsed) = ImportNormalizer::new().parse_bytes("x.csv", csv.as_bytes(), None) {
                for item in &parsed.items {
                    prop_assert!(item.is_well_formed());
                }
            }
        }
    }
}

// ===== Pricing: aggregate rules =====

mod pricing_tests {
    use super::*;

    fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec((0.0f64..10_000.0, 1u32..100), 0..15).prop_map(|rows| {
            rows.into_iter()
                .map(|(price, qty)| LineItem::new("Item").with_unit_price(price).with_quantity(qty))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Folded tax quotes total exactly their subtotal
        #[test]
        fn prop_folded_total_equals_subtotal(items in items_strategy(), markup in 0.0f64..100.0) {
            let totals = price_collection(&items, markup);
            prop_assert_eq!(totals.total, totals.subtotal);
            prop_assert_eq!(totals.tax_amount, 0.0);
        }

        /// Separate tax adds five percent of the subtotal plus freight
        #[test]
        fn prop_separate_tax_total(items in items_strategy(), markup in 0.0f64..100.0, freight in 0.0f64..500.0) {
            let totals = PricingEngine::new()
                .with_mode(PricingMode::SeparateTax)
                .with_markup(markup)
                .with_freight(freight)
                .totals(&items);

            let expected = totals.subtotal * 1.05 + freight;
            prop_assert!((totals.total - expected).abs() <= 1e-6 * expected.max(1.0));
        }

        /// The subtotal is the sum of the priced line totals
        #[test]
        fn prop_subtotal_is_sum_of_lines(items in items_strategy(), markup in 0.0f64..100.0) {
            let engine = PricingEngine::new().with_markup(markup);
            let sum: f64 = engine.price_lines(&items).iter().map(|line| line.line_total).sum();
            prop_assert_eq!(engine.totals(&items).subtotal, sum);
        }
    }
}
