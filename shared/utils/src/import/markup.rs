//! Markup (XML) strategy.
//!
//! The document is read into a flat element tree with namespace prefixes
//! dropped; nesting depth only grows heap vectors. Item elements are located
//! by name and their fields are taken from direct children, first non-blank
//! match winning.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use quote_models::{non_blank, LineItem};

use super::numeric::{clean_text, extract_price, extract_quantity};

/// Item element names, highest priority first
const ITEM_TAGS: &[&str] = &["product", "item", "line", "lineItem"];

const DESCRIPTION_TAGS: &[&str] = &["description", "name", "title", "productName"];
const QUANTITY_TAGS: &[&str] = &["quantity", "qty", "amount"];
const PRICE_TAGS: &[&str] = &["price", "unitPrice", "unitprice", "cost"];
const MODEL_TAGS: &[&str] = &["model", "modelNumber", "partNumber"];
const ORDER_CODE_TAGS: &[&str] = &["orderCode", "sku", "itemCode"];
const UNIT_TAGS: &[&str] = &["unit", "uom"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub text: String,
    /// Positions of direct children in [`Document::elements`]
    pub children: Vec<usize>,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

/// Element tree stored flat in document order; the root comes first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub elements: Vec<Element>,
}

impl Document {
    pub fn root(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// Every element below the root in document order.
    pub fn descendants(&self) -> &[Element] {
        self.elements.get(1..).unwrap_or(&[])
    }

    /// Cleaned text of the first direct child of `element` named by `names`
    /// (tried in order) that carries non-blank text.
    pub fn child_text(&self, element: &Element, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| {
            element.children
                .iter()
                .filter_map(|&idx| self.elements.get(idx))
                .filter(|child| child.name == *name)
                .find_map(|child| non_blank(&clean_text(&child.text)))
        })
    }
}

/// Parses `data` into a flat element tree, rejecting malformed documents.
pub fn read_tree(data: &[u8]) -> Result<Document> {
    let mut reader = Reader::from_reader(data);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut elements: Vec<Element> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)
            .with_context(|| format!("Malformed XML at byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                let idx = push_element(&mut elements, &open, name)?;
                open.push(idx);
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                push_element(&mut elements, &open, name)?;
            }
            Event::End(_) => {
                open.pop().context("Closing tag without matching opening tag")?;
            }
            Event::Text(text) => {
                if let Some(current) = open.last().and_then(|&idx| elements.get_mut(idx)) {
                    current.text.push_str(&text.unescape().context("Invalid character reference")?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = open.last().and_then(|&idx| elements.get_mut(idx)) {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last().and_then(|&idx| elements.get(idx)) {
        bail!("Unclosed element <{}>", unclosed.name);
    }
    if elements.is_empty() {
        bail!("Document has no root element");
    }

    Ok(Document { elements })
}

/// Appends an element under the innermost open one and returns its position.
fn push_element(elements: &mut Vec<Element>, open: &[usize], name: String) -> Result<usize> {
    let idx = elements.len();
    match open.last().and_then(|&parent| elements.get_mut(parent)) {
        Some(parent) => parent.children.push(idx),
        None if idx != 0 => bail!("Document has more than one root element"),
        None => {}
    }
    elements.push(Element::named(name));
    Ok(idx)
}

/// Item elements of the highest-priority tag present below the root.
pub fn item_elements(document: &Document) -> Vec<&Element> {
    for tag in ITEM_TAGS {
        let matches: Vec<&Element> = document.descendants()
            .iter()
            .filter(|element| element.name == *tag)
            .collect();
        if !matches.is_empty() {
            return matches;
        }
    }

    Vec::new()
}

pub fn parse_element(document: &Document, element: &Element) -> Option<LineItem> {
    let mut item = LineItem::new(document.child_text(element, DESCRIPTION_TAGS)?);

    if let Some(quantity) = document.child_text(element, QUANTITY_TAGS) {
        item.set_quantity(extract_quantity(&quantity));
    }
    if let Some(price) = document.child_text(element, PRICE_TAGS) {
        item.set_unit_price(extract_price(&price));
    }
    if let Some(unit) = document.child_text(element, UNIT_TAGS) {
        item.set_unit(&unit);
    }
    item.model = document.child_text(element, MODEL_TAGS);
    item.order_code = document.child_text(element, ORDER_CODE_TAGS);

    Some(item)
}

pub fn parse(data: &[u8]) -> Result<Vec<LineItem>> {
    let document = read_tree(data)?;

    let items = item_elements(&document)
        .into_iter()
        .filter_map(|element| {
            let item = parse_element(&document, element);
            if item.is_none() {
                tracing::debug!(tag = %element.name, "Skipping XML element without description");
            }
            item
        })
        .collect();

    Ok(items)
}
