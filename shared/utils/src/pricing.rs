//! Quote Pricing Engine
//!
//! Turns canonical line items into quoted prices. Two aggregate rules are
//! supported, selected by [`PricingMode`]:
//!
//! - `FoldedTax`: tax is multiplied into every unit price before markup and
//!   the quote total equals the subtotal.
//! - `SeparateTax`: unit prices are quoted as entered with no markup; tax on
//!   the subtotal and freight are added once at the end.
//!
//! Pricing never fails and never rounds; rounding is a display concern.

use quote_models::{LineItem, PricingMode};
use serde::{Deserialize, Serialize};

/// Tax multiplied into unit prices under [`PricingMode::FoldedTax`]
pub const FOLDED_TAX_RATE: f64 = 0.08;
/// Tax applied to the subtotal under [`PricingMode::SeparateTax`]
pub const SEPARATE_TAX_RATE: f64 = 0.05;

/// Per-line pricing result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub unit_price: f64,
    pub quantity: u32,
    pub price_with_tax: f64,
    pub quoted_unit_price: f64,
    pub line_total: f64,
}

/// Aggregate pricing result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub mode: PricingMode,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub freight: f64,
    pub total: f64,
}

/// A line item together with its computed prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub item: LineItem,
    pub pricing: PricedLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedQuote {
    pub markup_percent: f64,
    pub lines: Vec<PricedItem>,
    pub totals: QuoteTotals,
}

/// Prices one item with tax folded into the unit price.
pub fn price_item(item: &LineItem, markup_percent: f64) -> PricedLine {
    PricingEngine::new().with_markup(markup_percent).price_item(item)
}

/// Sums folded-tax line totals; the total equals the subtotal.
pub fn price_collection(items: &[LineItem], markup_percent: f64) -> QuoteTotals {
    PricingEngine::new().with_markup(markup_percent).totals(items)
}

/// Pricing settings passed explicitly to every computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    mode: PricingMode,
    markup_percent: f64,
    freight: f64,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            mode: PricingMode::FoldedTax,
            markup_percent: 0.0,
            freight: 0.0,
        }
    }
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: PricingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_markup(mut self, markup_percent: f64) -> Self {
        self.markup_percent = markup_percent;
        self
    }

    /// Freight is only added under [`PricingMode::SeparateTax`].
    pub fn with_freight(mut self, freight: f64) -> Self {
        self.freight = freight;
        self
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    fn markup_factor(&self) -> f64 {
        1.0 + self.markup_percent / 100.0
    }

    pub fn price_item(&self, item: &LineItem) -> PricedLine {
        let (price_with_tax, quoted_unit_price) = match self.mode {
            PricingMode::FoldedTax => {
                let price_with_tax = item.unit_price * (1.0 + FOLDED_TAX_RATE);
                (price_with_tax, price_with_tax * self.markup_factor())
            }
            PricingMode::SeparateTax => (item.unit_price, item.unit_price),
        };

        PricedLine {
            unit_price: item.unit_price,
            quantity: item.quantity,
            price_with_tax,
            quoted_unit_price,
            line_total: quoted_unit_price * f64::from(item.quantity),
        }
    }

    pub fn price_lines(&self, items: &[LineItem]) -> Vec<PricedLine> {
        items.iter().map(|item| self.price_item(item)).collect()
    }

    pub fn totals(&self, items: &[LineItem]) -> QuoteTotals {
        let subtotal: f64 = self.price_lines(items).iter().map(|line| line.line_total).sum();
        self.totals_for_subtotal(subtotal)
    }

    fn totals_for_subtotal(&self, subtotal: f64) -> QuoteTotals {
        match self.mode {
            PricingMode::FoldedTax => QuoteTotals {
                mode: self.mode,
                subtotal,
                tax_amount: 0.0,
                freight: 0.0,
                total: subtotal,
            },
            PricingMode::SeparateTax => {
                let tax_amount = subtotal * SEPARATE_TAX_RATE;
                QuoteTotals {
                    mode: self.mode,
                    subtotal,
                    tax_amount,
                    freight: self.freight,
                    total: subtotal + tax_amount + self.freight,
                }
            }
        }
    }

    pub fn price_quote(&self, items: &[LineItem]) -> PricedQuote {
        let lines: Vec<PricedItem> = items
            .iter()
            .map(|item| PricedItem {
                item: item.clone(),
                pricing: self.price_item(item),
            })
            .collect();
        let subtotal = lines.iter().map(|line| line.pricing.line_total).sum();

        tracing::debug!(
            mode = %self.mode,
            markup = self.markup_percent,
            lines = lines.len(),
            "Priced quote"
        );

        PricedQuote {
            markup_percent: self.markup_percent,
            totals: self.totals_for_subtotal(subtotal),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn item(unit_price: f64, quantity: u32) -> LineItem {
        LineItem::new("Widget")
            .with_unit_price(unit_price)
            .with_quantity(quantity)
    }

    #[test]
    fn test_price_item_folds_tax_before_markup() {
        let line = price_item(&item(100.0, 2), 20.0);
        assert!(approx(line.price_with_tax, 108.0));
        assert!(approx(line.quoted_unit_price, 129.6));
        assert!(approx(line.line_total, 259.2));
    }

    #[test]
    fn test_price_collection_sums_line_totals() {
        let items = vec![item(100.0, 2), item(100.0 / 3.0, 1)];
        let totals = price_collection(&items, 20.0);

        assert!(approx(totals.subtotal, 302.4));
        assert_eq!(totals.total, totals.subtotal);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.mode, PricingMode::FoldedTax);
    }

    #[test]
    fn test_zero_markup_and_empty_collection() {
        let line = price_item(&item(50.0, 1), 0.0);
        assert!(approx(line.quoted_unit_price, 54.0));

        let totals = price_collection(&[], 20.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_separate_tax_adds_tax_and_freight_once() {
        let engine = PricingEngine::new()
            .with_mode(PricingMode::SeparateTax)
            .with_freight(25.0);
        let totals = engine.totals(&[item(100.0, 3)]);

        assert!(approx(totals.subtotal, 300.0));
        assert!(approx(totals.tax_amount, 15.0));
        assert_eq!(totals.freight, 25.0);
        assert!(approx(totals.total, 340.0));

        let without_freight = PricingEngine::new()
            .with_mode(PricingMode::SeparateTax)
            .totals(&[item(100.0, 3)]);
        assert!(approx(without_freight.total, 315.0));
    }

    #[test]
    fn test_separate_tax_quotes_unit_price_without_markup() {
        let engine = PricingEngine::new()
            .with_mode(PricingMode::SeparateTax)
            .with_markup(20.0);
        let line = engine.price_item(&item(100.0, 3));
        assert_eq!(line.price_with_tax, 100.0);
        assert_eq!(line.quoted_unit_price, 100.0);
        assert_eq!(line.line_total, 300.0);

        let totals = engine.totals(&[item(100.0, 3)]);
        assert!(approx(totals.subtotal, 300.0));
        assert!(approx(totals.tax_amount, 15.0));
        assert!(approx(totals.total, 315.0));
    }

    #[test]
    fn test_folded_tax_ignores_freight() {
        let totals = PricingEngine::new()
            .with_freight(99.0)
            .totals(&[item(10.0, 1)]);
        assert_eq!(totals.freight, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_price_quote_matches_totals() {
        let engine = PricingEngine::new().with_markup(20.0);
        let items = vec![item(100.0, 2), item(10.0, 4)];
        let quote = engine.price_quote(&items);

        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[1].item, items[1]);
        assert_eq!(quote.totals, engine.totals(&items));
        assert_eq!(quote.markup_percent, 20.0);
    }

    proptest! {
        /// Pricing the same items twice gives identical results
        #[test]
        fn prop_pricing_is_deterministic(price in 0.0f64..100_000.0, qty in 1u32..1000, markup in 0.0f64..200.0) {
            let items = vec![item(price, qty)];
            prop_assert_eq!(price_collection(&items, markup), price_collection(&items, markup));
        }

        /// A higher markup never lowers a line total
        #[test]
        fn prop_line_total_monotonic_in_markup(price in 0.0f64..100_000.0, qty in 1u32..1000, low in 0.0f64..100.0, extra in 0.0f64..100.0) {
            let line_item = item(price, qty);
            prop_assert!(price_item(&line_item, low + extra).line_total >= price_item(&line_item, low).line_total);
        }

        /// With a positive price, raising the markup strictly raises the line total
        #[test]
        fn prop_line_total_strictly_increasing(price in 0.01f64..100_000.0, qty in 1u32..1000, low in 0.0f64..100.0, extra in 1.0f64..100.0) {
            let line_item = item(price, qty);
            prop_assert!(price_item(&line_item, low + extra).line_total > price_item(&line_item, low).line_total);
        }
    }
}
