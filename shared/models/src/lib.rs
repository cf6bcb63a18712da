//! # Quote Core Domain Models
//!
//! Domain models shared by the import normalizer, the pricing engine and the
//! quote service.
//!
//! ## Key Models
//!
//! - **LineItem**: the canonical record every import strategy produces
//! - **PricingMode**: selects folded (per-unit) or separate (aggregate) tax
//! - **QuoteDetails**: quote numbering, dates, customer, terms and validity
//!
//! ## Validation
//!
//! Models derive `validator::Validate` with rules mirroring their invariants:
//! - Non-empty line item descriptions
//! - Quantities of at least one
//! - Non-negative unit prices

pub mod line_item;
pub mod pricing;
pub mod quote;

pub use line_item::*;
pub use pricing::*;
pub use quote::*;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_line_item_round_trips_through_json() {
        let mut item = LineItem::new("Level radar FMR20")
            .with_quantity(2)
            .with_unit_price(99.99);
        item.model = Some("MDL-5".to_string());

        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_quote_details_partial_json_uses_defaults() {
        let details: QuoteDetails =
            serde_json::from_str(r#"{"customer_company": "Acme", "quote_date": "2024-06-01"}"#).unwrap();
        assert_eq!(details.customer_company, "Acme");
        assert_eq!(details.payment_terms, DEFAULT_PAYMENT_TERMS);
        assert_eq!(details.expiration_date().as_deref(), Some("07/01/2024"));
    }
}
