//! Quote Import Handler
//!
//! Accepts vendor quotation uploads and returns the normalized line items.

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use quote_models::LineItem;
use quote_utils::{validate_file_size, validate_file_type, ImportFormat, ImportNormalizer, QuoteError};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, metrics, AppState};

/// Import response
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub import_id: Uuid,
    pub filename: String,
    pub format: ImportFormat,
    pub item_count: usize,
    pub items: Vec<LineItem>,
    pub warnings: Vec<String>,
}

/// Upload and normalize a quotation file
///
/// POST /api/v1/imports
pub async fn upload_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let field = multipart.next_field().await
        .map_err(|e| QuoteError::validation("file", format!("Failed to read upload: {}", e)))?
        .ok_or_else(|| QuoteError::validation("file", "No file provided"))?;

    let filename = field.file_name()
        .map(|name| name.to_string())
        .ok_or_else(|| QuoteError::validation("file", "Upload has no file name"))?;

    if let Err(e) = validate_file_type(&filename, &state.config.import.allowed_extensions) {
        metrics::IMPORTS_TOTAL.with_label_values(&["unknown", "unsupported"]).inc();
        return Err(e.into());
    }

    let data = field.bytes().await
        .map_err(|e| QuoteError::validation("file", format!("Failed to read file data: {}", e)))?;
    validate_file_size(data.len() as u64, state.config.import.max_file_size)?;

    let parsed = match ImportNormalizer::new().parse_bytes(&filename, &data, None) {
        Ok(parsed) => parsed,
        Err(e) => {
            let format = ImportFormat::from_extension(std::path::Path::new(&filename))
                .map(|format| format.as_str())
                .unwrap_or("unknown");
            metrics::IMPORTS_TOTAL.with_label_values(&[format, "failed"]).inc();
            return Err(e.into());
        }
    };

    metrics::IMPORTS_TOTAL
        .with_label_values(&[parsed.format.as_str(), "succeeded"])
        .inc();
    metrics::IMPORTED_ITEMS_TOTAL
        .with_label_values(&[parsed.format.as_str()])
        .inc_by(parsed.items.len() as u64);

    Ok(Json(ImportResponse {
        import_id: parsed.id,
        filename: parsed.filename,
        format: parsed.format,
        item_count: parsed.items.len(),
        items: parsed.items,
        warnings: parsed.warnings,
    }))
}
