//! Quote Import Module
//!
//! Normalizes vendor quotation files (XLSX/XLS, RTF, XML, CSV) into
//! canonical line items. Rows that cannot be read are skipped rather than
//! failing the whole import.

pub mod numeric;
pub mod spreadsheet;
pub mod rich_text;
pub mod markup;
pub mod delimited;
pub mod parser;

pub use numeric::{clean_text, extract_price, extract_quantity, is_price_value};
pub use parser::{parse, ImportFormat, ImportNormalizer, ParsedImport};
