//! Quote Pricing Handler

use axum::{extract::State, response::Json};
use quote_models::{LineItem, PricingMode, QuoteDetails};
use quote_utils::{validate_line_items, validate_model, PricedQuote, PricingEngine, QuoteError};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, metrics, AppState};

#[derive(Debug, Deserialize)]
pub struct PriceQuoteRequest {
    pub items: Vec<LineItem>,
    pub markup_percent: Option<f64>,
    pub mode: Option<PricingMode>,
    pub freight: Option<f64>,
    pub details: Option<QuoteDetails>,
}

#[derive(Debug, Serialize)]
pub struct PriceQuoteResponse {
    pub details: QuoteDetails,
    pub expiration_date: Option<String>,
    pub lead_time: Option<String>,
    #[serde(flatten)]
    pub quote: PricedQuote,
}

/// Price a set of line items
///
/// POST /api/v1/quotes/price
///
/// Settings resolve request field first, then quote details, then service
/// configuration.
pub async fn price_quote(
    State(state): State<AppState>,
    Json(request): Json<PriceQuoteRequest>,
) -> Result<Json<PriceQuoteResponse>, ApiError> {
    validate_line_items(&request.items)?;

    let pricing = &state.config.pricing;
    let markup_percent = request
        .markup_percent
        .or_else(|| request.details.as_ref().and_then(|details| details.markup_percentage))
        .unwrap_or(pricing.default_markup_percent);

    let details = request.details.unwrap_or_default();
    validate_model(&details)?;

    let freight = request.freight.unwrap_or(pricing.freight);
    if freight < 0.0 {
        return Err(QuoteError::validation("freight", "Freight must not be negative").into());
    }

    let engine = PricingEngine::new()
        .with_mode(request.mode.unwrap_or(pricing.mode))
        .with_markup(markup_percent)
        .with_freight(freight);
    let quote = engine.price_quote(&request.items);

    metrics::PRICED_QUOTES_TOTAL
        .with_label_values(&[engine.mode().as_str()])
        .inc();
    tracing::info!(
        quote_number = %details.quote_number,
        mode = %engine.mode(),
        items = quote.lines.len(),
        total = quote.totals.total,
        "Priced quote"
    );

    Ok(Json(PriceQuoteResponse {
        expiration_date: details.expiration_date(),
        lead_time: details.lead_time_label(),
        details,
        quote,
    }))
}
