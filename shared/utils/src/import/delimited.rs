//! Delimited-text (CSV) strategy.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use quote_models::{non_blank, LineItem};

use super::numeric::{clean_text, extract_price, extract_quantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Description,
    Quantity,
    UnitPrice,
    OrderCode,
    Model,
    Unit,
}

/// Header fragments per field, in matching precedence
const HEADER_KEYWORDS: &[(Column, &[&str])] = &[
    (Column::Description, &["description", "desc", "name", "product"]),
    (Column::Quantity, &["quantity", "qty", "amount"]),
    (Column::UnitPrice, &["price", "cost", "unit_price"]),
    (Column::OrderCode, &["order", "code"]),
    (Column::Model, &["model", "part", "sku"]),
    (Column::Unit, &["unit", "uom"]),
];

const POSITIONAL: &[Column] = &[Column::Description, Column::Quantity, Column::UnitPrice];

pub fn classify_header(header: &str) -> Option<Column> {
    let header = header.trim().to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| header.contains(keyword)))
        .map(|(column, _)| *column)
}

/// Assigns a field to every header; falls back to description, quantity,
/// price by position when no header is recognized at all.
pub fn map_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<Option<Column>> {
    let mapped: Vec<Option<Column>> = headers.into_iter().map(classify_header).collect();

    if mapped.iter().any(Option::is_some) {
        return mapped;
    }

    (0..mapped.len())
        .map(|idx| POSITIONAL.get(idx).copied())
        .collect()
}

/// Builds an item from one record; later columns for the same field win.
pub fn parse_record<'a>(columns: &[Option<Column>], values: impl IntoIterator<Item = &'a str>) -> Option<LineItem> {
    let mut item = LineItem::default();

    for (column, value) in columns.iter().zip(values) {
        let Some(column) = column else { continue };
        if value.trim().is_empty() {
            continue;
        }

        match column {
            Column::Description => item.description = clean_text(value),
            Column::Quantity => item.set_quantity(extract_quantity(value)),
            Column::UnitPrice => item.set_unit_price(extract_price(value)),
            Column::OrderCode => item.order_code = non_blank(&clean_text(value)),
            Column::Model => item.model = non_blank(&clean_text(value)),
            Column::Unit => item.set_unit(&clean_text(value)),
        }
    }

    if item.description.is_empty() {
        None
    } else {
        Some(item)
    }
}

/// Parses CSV bytes into items plus one warning per undecodable record.
pub fn parse(data: &[u8]) -> Result<(Vec<LineItem>, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let headers: StringRecord = reader.headers()
        .context("Failed to read CSV header row")?
        .clone();
    let columns = map_columns(headers.iter());

    let mut items = Vec::new();
    let mut warnings = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let row = idx + 2;
        match record {
            Ok(record) => match parse_record(&columns, record.iter()) {
                Some(item) => items.push(item),
                None => tracing::debug!(row, "Skipping CSV row without description"),
            },
            Err(e) => {
                tracing::warn!(row, error = %e, "Skipping undecodable CSV record");
                warnings.push(format!("Row {}: {}", row, e));
            }
        }
    }

    Ok((items, warnings))
}
