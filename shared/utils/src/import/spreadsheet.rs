//! Tabular spreadsheet strategy (XLSX/XLS).
//!
//! Vendor quotation exports come in two shapes. Numbered exports carry an
//! item index in the first column and a fixed column layout; everything else
//! is scanned cell by cell for something that looks like a description, a
//! quantity, a price and a model token.

use anyhow::{Context, Result};
use quote_models::{non_blank, LineItem};
use regex::Regex;
use std::sync::LazyLock;

use super::numeric::{clean_text, extract_price, is_price_value};

/// Columns read from each row (A through S)
pub const MAX_COLUMNS: usize = 19;

/// First-cell fragments that mark title, banner and header rows
const HEADER_KEYWORDS: &[&str] = &[
    "sales document",
    "endress+hauser",
    "quote",
    "product details",
    "item",
    "quantity",
    "unit",
    "product name",
    "order code",
];

static PURE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.?[0-9]*$").unwrap());
static PURE_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static MODEL_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

// Zero-based positions of the numbered export layout
const COL_QUANTITY: usize = 1;
const COL_UNIT: usize = 2;
const COL_NAME: usize = 3;
const COL_ORDER_CODE: usize = 4;
const COL_CUSTOMER_REF: usize = 5;
const COL_MODEL: usize = 6;
const COL_CONFIG: usize = 7;
const COL_SALES_TEXT: usize = 8;
const COL_DELIVERY: usize = 9;
const COL_PRICES: std::ops::Range<usize> = 10..12;
const COL_ORIGIN: usize = 12;
const COL_DISPATCH: usize = 13;

/// Reads the first worksheet of an XLSX/XLS workbook into a grid of display
/// strings anchored at cell A1.
pub fn read_grid(data: &[u8]) -> Result<Vec<Vec<String>>> {
    use calamine::{open_workbook_auto_from_rs, DataType, Reader};

    let cursor = std::io::Cursor::new(data);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .context("Failed to open workbook")?;

    let sheet_name = workbook.sheet_names()
        .first()
        .cloned()
        .context("No sheets found in workbook")?;

    let range = workbook.worksheet_range(&sheet_name)
        .context("Failed to read worksheet")??;

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut grid: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];

    for row in range.rows() {
        let mut cells = vec![String::new(); first_col as usize];
        cells.extend(row.iter().map(|cell: &DataType| cell.to_string()));
        cells.truncate(MAX_COLUMNS);
        grid.push(cells);
    }

    Ok(grid)
}

/// Normalizes every data row of `grid`; the first row is treated as a header.
pub fn parse_rows(grid: &[Vec<String>]) -> Vec<LineItem> {
    grid.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, row)| {
            let item = parse_row(row);
            if item.is_none() {
                tracing::debug!(row = idx + 1, "Skipping spreadsheet row without description");
            }
            item
        })
        .collect()
}

/// Normalizes a single row, or `None` when it cannot yield a description.
pub fn parse_row(row: &[String]) -> Option<LineItem> {
    let mut cells: Vec<&str> = row.iter().take(MAX_COLUMNS).map(String::as_str).collect();
    cells.resize(MAX_COLUMNS, "");

    if cells.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    let first_cell = cells[0].trim().to_lowercase();
    if HEADER_KEYWORDS.iter().any(|keyword| first_cell.contains(keyword)) {
        return None;
    }

    match cells[0].trim().parse::<f64>() {
        Ok(index) if index > 0.0 => parse_numbered_row(&cells),
        _ => parse_loose_row(&cells),
    }
}

fn field(cells: &[&str], col: usize) -> Option<String> {
    non_blank(&clean_text(cells[col]))
}

fn parse_numbered_row(cells: &[&str]) -> Option<LineItem> {
    let mut item = LineItem::default();

    let quantity = cells[COL_QUANTITY].trim().parse::<f64>()
        .map(|value| value.trunc() as u32)
        .unwrap_or(1);
    item.set_quantity(quantity);
    item.set_unit(cells[COL_UNIT]);

    let name = field(cells, COL_NAME);
    item.order_code = field(cells, COL_ORDER_CODE);
    item.customer_ref = field(cells, COL_CUSTOMER_REF);
    item.model = field(cells, COL_MODEL);
    item.config = field(cells, COL_CONFIG);
    item.sales_text = field(cells, COL_SALES_TEXT);
    item.delivery_time = field(cells, COL_DELIVERY);
    item.country_origin = field(cells, COL_ORIGIN);
    item.country_dispatch = field(cells, COL_DISPATCH);

    if let Some(price) = cells[COL_PRICES].iter().find(|cell| is_price_value(cell)) {
        item.set_unit_price(extract_price(price));
    }

    item.description = render_description(name.as_deref(), &item);
    if item.description.is_empty() {
        None
    } else {
        Some(item)
    }
}

/// Builds the multi-section description shown on quotes for numbered rows.
fn render_description(name: Option<&str>, item: &LineItem) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(name) = name {
        sections.push(name.to_string());
    }
    if let Some(sales_text) = &item.sales_text {
        sections.push(format!("Description: {}", sales_text));
    }
    if let Some(delivery) = &item.delivery_time {
        sections.push(format!("Delivery time: {}", delivery));
    }
    if let Some(order_code) = &item.order_code {
        sections.push(format!("Order code description:\n{}", order_code));
    }
    if let Some(config) = &item.config {
        sections.push(format!("Product Configuration:\n{}", config));
    }

    let mut countries = Vec::new();
    if let Some(origin) = &item.country_origin {
        countries.push(format!("Origin: {}", origin));
    }
    if let Some(dispatch) = &item.country_dispatch {
        countries.push(format!("Dispatch: {}", dispatch));
    }
    if !countries.is_empty() {
        sections.push(format!("Country Information:\n{}", countries.join("\n")));
    }

    sections.join("\n\n")
}

fn parse_loose_row(cells: &[&str]) -> Option<LineItem> {
    let mut item = LineItem::default();
    let mut description = None;
    let mut quantity_found = false;
    let mut price_found = false;

    for cell in cells.iter().filter(|cell| !cell.trim().is_empty()) {
        if description.is_none() && cell.chars().count() > 10 && !PURE_NUMBER.is_match(cell) {
            description = non_blank(&clean_text(cell));
            continue;
        }

        if !quantity_found && PURE_INTEGER.is_match(cell) {
            if let Ok(quantity) = cell.parse::<u32>() {
                if quantity < 1000 {
                    item.set_quantity(quantity);
                    quantity_found = true;
                    continue;
                }
            }
        }

        if !price_found && is_price_value(cell) {
            item.set_unit_price(extract_price(cell));
            price_found = true;
            continue;
        }

        if item.model.is_none() && cell.chars().count() < 20 && MODEL_TOKEN.is_match(cell) {
            item.model = Some(cell.to_string());
        }
    }

    item.delivery_time = cells.iter()
        .rev()
        .find(|cell| cell.to_lowercase().contains("day"))
        .and_then(|cell| non_blank(&clean_text(cell)));

    item.description = description.or_else(|| non_blank(&clean_text(cells[0])))?;
    Some(item)
}
