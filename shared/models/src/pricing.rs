//! Pricing rule selection shared by configuration, the pricing engine and
//! the service API.

use serde::{Deserialize, Serialize};

/// The two aggregate pricing rules a quote can be computed with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Tax is multiplied into every unit price before markup; the quote
    /// total equals the subtotal.
    #[default]
    FoldedTax,
    /// Unit prices carry markup only; tax and freight are added once on
    /// top of the subtotal.
    SeparateTax,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoldedTax => "folded_tax",
            Self::SeparateTax => "separate_tax",
        }
    }
}

impl std::fmt::Display for PricingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&PricingMode::FoldedTax).unwrap(), "\"folded_tax\"");
        let mode: PricingMode = serde_json::from_str("\"separate_tax\"").unwrap();
        assert_eq!(mode, PricingMode::SeparateTax);
        assert_eq!(PricingMode::default(), PricingMode::FoldedTax);
    }
}
