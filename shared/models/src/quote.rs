//! Quote header data.
//!
//! Carries everything a rendered quote shows besides the line items:
//! numbering, dates, customer, terms, lead time and validity.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::Validate;

pub const DEFAULT_PAYMENT_TERMS: &str = "Net 30 Days";
pub const DEFAULT_DELIVERY_TERMS: &str = "FOB Origin";
pub const DEFAULT_MARKUP_PERCENTAGE: f64 = 20.0;
pub const DEFAULT_EXPIRATION_DAYS: u32 = 30;

/// Date format used on rendered quotes
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct QuoteDetails {
    #[validate(length(min = 1, max = 64, message = "Quote number must be between 1 and 64 characters"))]
    pub quote_number: String,
    #[serde(deserialize_with = "deserialize_quote_date")]
    pub quote_date: NaiveDate,
    pub project_name: String,
    pub bill_to: String,
    pub ship_to: String,
    pub customer_company: String,
    pub contact_person: String,
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub customer_ref: String,
    pub payment_terms: String,
    pub delivery_terms: String,
    /// Overrides the service's configured markup when present
    pub markup_percentage: Option<f64>,
    pub lead_time_value: u32,
    pub lead_time_unit: String,
    #[validate(range(max = 3650, message = "Expiration must be within ten years"))]
    pub quote_expiration_days: u32,
}

impl Default for QuoteDetails {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl QuoteDetails {
    /// Fresh quote details dated `today`, numbered as the first quote of the day
    pub fn new(today: NaiveDate) -> Self {
        Self {
            quote_number: quote_number_for(today, 1),
            quote_date: today,
            project_name: String::new(),
            bill_to: String::new(),
            ship_to: String::new(),
            customer_company: String::new(),
            contact_person: String::new(),
            phone: String::new(),
            email: None,
            customer_ref: String::new(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
            delivery_terms: DEFAULT_DELIVERY_TERMS.to_string(),
            markup_percentage: None,
            lead_time_value: 0,
            lead_time_unit: "Days".to_string(),
            quote_expiration_days: DEFAULT_EXPIRATION_DAYS,
        }
    }

    /// Last day the quote is valid
    pub fn expiration(&self) -> Option<NaiveDate> {
        self.quote_date
            .checked_add_days(Days::new(u64::from(self.quote_expiration_days)))
    }

    /// Expiration rendered the way quotes print dates
    pub fn expiration_date(&self) -> Option<String> {
        self.expiration()
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
    }

    pub fn lead_time_label(&self) -> Option<String> {
        if self.lead_time_value > 0 {
            Some(format!("{} {}", self.lead_time_value, self.lead_time_unit))
        } else {
            None
        }
    }

    /// Re-dates the quote from user input, keeping the expiration window
    pub fn set_quote_date(&mut self, text: &str) -> Result<(), QuoteDateError> {
        self.quote_date = parse_quote_date(text)?;
        Ok(())
    }
}

/// `Q-YYYYMMDD-NNN`
pub fn quote_number_for(date: NaiveDate, sequence: u32) -> String {
    format!("Q-{}-{:03}", date.format("%Y%m%d"), sequence)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteDateError {
    #[error("Unrecognized quote date: {0}")]
    Unrecognized(String),

    #[error("Invalid quote date '{text}': {source}")]
    Invalid {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses a quote date typed as `MM/DD/YYYY` or `YYYY-MM-DD`.
pub fn parse_quote_date(text: &str) -> Result<NaiveDate, QuoteDateError> {
    let text = text.trim();
    let format = if text.contains('/') {
        DISPLAY_DATE_FORMAT
    } else if text.contains('-') {
        "%Y-%m-%d"
    } else {
        return Err(QuoteDateError::Unrecognized(text.to_string()));
    };

    NaiveDate::parse_from_str(text, format).map_err(|source| QuoteDateError::Invalid {
        text: text.to_string(),
        source,
    })
}

fn deserialize_quote_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_quote_date(&text).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_details_defaults() {
        let details = QuoteDetails::new(date(2024, 3, 5));
        assert_eq!(details.quote_number, "Q-20240305-001");
        assert_eq!(details.payment_terms, "Net 30 Days");
        assert_eq!(details.delivery_terms, "FOB Origin");
        assert_eq!(details.markup_percentage, None);
        assert_eq!(details.quote_expiration_days, 30);
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_expiration_date() {
        let details = QuoteDetails::new(date(2024, 1, 15));
        assert_eq!(details.expiration_date().as_deref(), Some("02/14/2024"));
    }

    #[test]
    fn test_parse_quote_date_formats() {
        assert_eq!(parse_quote_date("03/05/2024"), Ok(date(2024, 3, 5)));
        assert_eq!(parse_quote_date(" 2024-03-05 "), Ok(date(2024, 3, 5)));
        assert_eq!(
            parse_quote_date("March 5"),
            Err(QuoteDateError::Unrecognized("March 5".to_string()))
        );
        assert!(matches!(
            parse_quote_date("13/45/2024"),
            Err(QuoteDateError::Invalid { .. })
        ));
    }

    #[test]
    fn test_quote_date_deserializes_from_either_format() {
        let details: QuoteDetails = serde_json::from_str(r#"{"quote_date": "03/05/2024"}"#).unwrap();
        assert_eq!(details.quote_date, date(2024, 3, 5));
        assert_eq!(details.expiration_date().as_deref(), Some("04/04/2024"));

        let details: QuoteDetails = serde_json::from_str(r#"{"quote_date": "2024-03-05"}"#).unwrap();
        assert_eq!(details.quote_date, date(2024, 3, 5));

        let error = serde_json::from_str::<QuoteDetails>(r#"{"quote_date": "5th March"}"#).unwrap_err();
        assert!(error.to_string().contains("Unrecognized quote date"));
    }

    #[test]
    fn test_serialized_details_read_back() {
        let mut details = QuoteDetails::new(date(2024, 3, 5));
        details.markup_percentage = Some(15.0);
        let json = serde_json::to_string(&details).unwrap();
        let back: QuoteDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn test_set_quote_date_moves_expiration() {
        let mut details = QuoteDetails::new(date(2024, 1, 1));
        details.quote_expiration_days = 10;
        details.set_quote_date("2024-02-25").unwrap();
        assert_eq!(details.expiration(), Some(date(2024, 3, 6)));
    }

    #[test]
    fn test_lead_time_label() {
        let mut details = QuoteDetails::new(date(2024, 1, 1));
        assert_eq!(details.lead_time_label(), None);
        details.lead_time_value = 6;
        details.lead_time_unit = "Weeks".to_string();
        assert_eq!(details.lead_time_label().as_deref(), Some("6 Weeks"));
    }

    #[test]
    fn test_quote_number_sequence() {
        assert_eq!(quote_number_for(date(2023, 12, 31), 12), "Q-20231231-012");
    }
}
