//! Rich-text (RTF) strategy.
//!
//! RTF quotations are flattened to plain text and then read line by line.
//! Lines that look like the start of a quoted position open a new item;
//! following non-blank lines extend its description until a blank line or
//! the next item start.

use quote_models::LineItem;
use regex::Regex;
use std::sync::LazyLock;

use super::numeric::extract_price;

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\(?:par|line)\b ?\r?\n?").unwrap());
static CONTROL_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[a-z]+-?[0-9]* ?").unwrap());
static HEX_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\'[0-9a-fA-F]{2}").unwrap());
static CONTROL_SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[^a-z]").unwrap());
static BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}]").unwrap());
static INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\f\v]+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

static ITEM_START: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d+\s+\d+\s+PC",
        r"(?i)Model no\.:",
        r"(?i)Level, radar,",
        r"(?i)Qty:",
        r"(?i)Price:",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static POSITION_QUANTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s+(\d+)\s+PC").unwrap());
static LABELED_QUANTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Qty:\s*(\d+)").unwrap());
static MODEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Model no\.:\s*([^\n]+)").unwrap());
static ORDER_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static LEAD_IN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Level, radar,([^:]+)").unwrap());
static GROUPED_PRICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{1,3}(?:,\d{3})*\.\d{2})").unwrap());

/// Decodes the raw bytes of an RTF file; invalid UTF-8 sequences are replaced.
pub fn decode(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Strips RTF control sequences, leaving one text line per paragraph.
pub fn clean_rtf(content: &str) -> String {
    let text = PARAGRAPH.replace_all(content, "\n");
    let text = HEX_ESCAPE.replace_all(&text, "");
    let text = CONTROL_WORD.replace_all(&text, "");
    let text = CONTROL_SYMBOL.replace_all(&text, "");
    let text = BRACES.replace_all(&text, "");
    let text = text.replace('\r', "");
    let text = INLINE_SPACE.replace_all(&text, " ");
    BLANK_LINES.replace_all(&text, "\n\n").into_owned()
}

pub fn is_item_line(line: &str) -> bool {
    ITEM_START.iter().any(|pattern| pattern.is_match(line))
}

/// Starts an item from an item-start line.
pub fn parse_item_line(line: &str) -> LineItem {
    let mut item = LineItem::default();

    if let Some(caps) = POSITION_QUANTITY.captures(line) {
        item.set_quantity(caps[2].parse().unwrap_or(1));
    } else if let Some(caps) = LABELED_QUANTITY.captures(line) {
        item.set_quantity(caps[1].parse().unwrap_or(1));
    }

    if let Some(caps) = MODEL.captures(line) {
        item.model = quote_models::non_blank(&caps[1]);
    }

    if let Some(caps) = ORDER_CODE.captures(line) {
        item.order_code = quote_models::non_blank(&caps[1]);
    }

    if let Some(caps) = LEAD_IN.captures(line) {
        item.description = caps[1].trim().to_string();
    }

    if let Some(caps) = GROUPED_PRICE.captures(line) {
        item.set_unit_price(extract_price(&caps[1]));
    }

    item
}

/// Groups cleaned text lines into line items.
pub fn extract_items(text: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut current: Option<LineItem> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut current, &mut items);
            continue;
        }

        if is_item_line(line) {
            flush(&mut current, &mut items);
            current = Some(parse_item_line(line));
        } else if let Some(item) = current.as_mut() {
            if !item.description.is_empty() {
                item.description.push(' ');
            }
            item.description.push_str(line);
        }
    }
    flush(&mut current, &mut items);

    items
}

fn flush(current: &mut Option<LineItem>, items: &mut Vec<LineItem>) {
    if let Some(mut item) = current.take() {
        item.description = item.description.trim().to_string();
        if item.description.is_empty() {
            tracing::debug!("Dropping rich-text item without description");
        } else {
            items.push(item);
        }
    }
}

pub fn parse(data: &[u8]) -> Vec<LineItem> {
    extract_items(&clean_rtf(&decode(data)))
}
