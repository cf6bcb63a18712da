//! Canonical line item model.
//!
//! Every import strategy converges on [`LineItem`]. Pricing and all export
//! surfaces consume it.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Unit of measure used when a source file does not carry one.
pub const DEFAULT_UNIT: &str = "EA";

/// A single normalized quote line.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct LineItem {
    #[validate(custom = "validate_description")]
    pub description: String,
    pub model: Option<String>,
    pub order_code: Option<String>,
    pub customer_ref: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[validate(range(min = 0.0, message = "Unit price must not be negative"))]
    #[serde(default)]
    pub unit_price: f64,
    pub config: Option<String>,
    pub sales_text: Option<String>,
    pub delivery_time: Option<String>,
    pub country_origin: Option<String>,
    pub country_dispatch: Option<String>,
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        let mut error = ValidationError::new("blank_description");
        error.message = Some("Description must not be empty".into());
        return Err(error);
    }
    Ok(())
}

fn default_quantity() -> u32 {
    1
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            model: None,
            order_code: None,
            customer_ref: None,
            quantity: default_quantity(),
            unit: default_unit(),
            unit_price: 0.0,
            config: None,
            sales_text: None,
            delivery_time: None,
            country_origin: None,
            country_dispatch: None,
        }
    }
}

impl LineItem {
    /// Creates a line item with the given description and defaults elsewhere
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.set_quantity(quantity);
        self
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.set_unit_price(unit_price);
        self
    }

    /// Quantities below one collapse to the default of one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Negative and non-finite prices collapse to zero.
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = if unit_price.is_finite() && unit_price > 0.0 {
            unit_price
        } else {
            0.0
        };
    }

    /// Sets the unit of measure, keeping the default when `unit` is blank.
    pub fn set_unit(&mut self, unit: &str) {
        let unit = unit.trim();
        self.unit = if unit.is_empty() {
            default_unit()
        } else {
            unit.to_string()
        };
    }

    /// True when the item satisfies the canonical invariants
    pub fn is_well_formed(&self) -> bool {
        !self.description.trim().is_empty() && self.quantity >= 1 && self.unit_price >= 0.0
    }
}

/// Trimmed copy of `value`, or `None` when it is blank.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
