//! Quote Import Parser
//!
//! Picks a strategy from the file extension and normalizes vendor files into
//! canonical line items.

use anyhow::Context;
use quote_models::LineItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

use super::{delimited, markup, rich_text, spreadsheet};
use crate::error::{QuoteError, QuoteResult};

/// Supported import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    Spreadsheet, // XLSX/XLS
    RichText,    // RTF
    Markup,      // XML
    Delimited,   // CSV
}

impl ImportFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        Self::from_extension_str(path.extension()?.to_str()?)
    }

    pub fn from_extension_str(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "rtf" => Some(Self::RichText),
            "xml" => Some(Self::Markup),
            "csv" => Some(Self::Delimited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "spreadsheet",
            Self::RichText => "rich_text",
            Self::Markup => "markup",
            Self::Delimited => "delimited",
        }
    }

    /// Label used in import error messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Excel",
            Self::RichText => "RTF",
            Self::Markup => "XML",
            Self::Delimited => "CSV",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of `filename`, empty when there is none
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Normalized import with metadata
#[derive(Debug, Clone, Serialize)]
pub struct ParsedImport {
    pub id: Uuid,
    pub filename: String,
    pub format: ImportFormat,
    pub items: Vec<LineItem>,
    pub warnings: Vec<String>,
}

/// Main import normalizer
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportNormalizer;

impl ImportNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize an uploaded file; `format` overrides extension detection.
    pub fn parse_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<ImportFormat>,
    ) -> QuoteResult<ParsedImport> {
        let format = match format.or_else(|| ImportFormat::from_extension(Path::new(filename))) {
            Some(format) => format,
            None => return Err(QuoteError::unsupported_format(extension_of(filename))),
        };

        let (items, warnings) = self.dispatch(format, data)
            .map_err(|e| QuoteError::import(format.label(), e))?;

        tracing::info!(
            filename,
            format = %format,
            items = items.len(),
            warnings = warnings.len(),
            "Normalized quote import"
        );

        Ok(ParsedImport {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            format,
            items,
            warnings,
        })
    }

    fn dispatch(&self, format: ImportFormat, data: &[u8]) -> anyhow::Result<(Vec<LineItem>, Vec<String>)> {
        match format {
            ImportFormat::Spreadsheet => {
                let grid = spreadsheet::read_grid(data)?;
                Ok((spreadsheet::parse_rows(&grid), Vec::new()))
            }
            ImportFormat::RichText => Ok((rich_text::parse(data), Vec::new())),
            ImportFormat::Markup => Ok((markup::parse(data)?, Vec::new())),
            ImportFormat::Delimited => delimited::parse(data),
        }
    }
}

/// Reads and normalizes the file at `path`.
///
/// Unknown extensions are rejected before the file is opened.
pub fn parse(path: impl AsRef<Path>) -> QuoteResult<Vec<LineItem>> {
    let path = path.as_ref();
    let filename = path.to_string_lossy();

    let format = ImportFormat::from_extension(path)
        .ok_or_else(|| QuoteError::unsupported_format(extension_of(&filename)))?;

    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", filename))
        .map_err(|e| QuoteError::import(format.label(), e))?;

    ImportNormalizer::new()
        .parse_bytes(&filename, &data, Some(format))
        .map(|parsed| parsed.items)
}
