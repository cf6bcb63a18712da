use crate::error::{QuoteError, QuoteResult};
use quote_models::LineItem;
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> QuoteResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(QuoteError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, &error.code) {
                (Some(message), _) => format!("{}: {}", field, message),
                (None, code) if code == "email" => "Invalid email format".to_string(),
                (None, code) if code == "length" => {
                    format!("Length validation failed for field '{}'", field)
                }
                (None, code) if code == "range" => {
                    format!("Value out of range for field '{}'", field)
                }
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Validates every item, naming the first offending line (1-based)
pub fn validate_line_items(items: &[LineItem]) -> QuoteResult<()> {
    for (idx, item) in items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            return Err(QuoteError::validation(
                format!("items[{}]", idx + 1),
                format_validation_errors(&errors),
            ));
        }
    }

    Ok(())
}

pub fn validate_file_type(file_name: &str, allowed_types: &[String]) -> QuoteResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !allowed_types.iter().any(|allowed| allowed.eq_ignore_ascii_case(&extension)) {
        return Err(QuoteError::unsupported_format(extension));
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, max_size: u64) -> QuoteResult<()> {
    if file_size > max_size {
        return Err(QuoteError::validation(
            "file_size",
            format!("File size {} bytes exceeds maximum allowed size {} bytes", file_size, max_size),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["xlsx".to_string(), "csv".to_string()]
    }

    #[test]
    fn test_validate_file_type() {
        assert!(validate_file_type("quote.XLSX", &allowed()).is_ok());
        assert!(validate_file_type("quote.csv", &allowed()).is_ok());

        let err = validate_file_type("quote.docx", &allowed()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(validate_file_type("no_extension", &allowed()).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(10, 10).is_ok());
        assert!(validate_file_size(11, 10).is_err());
    }

    #[test]
    fn test_validate_line_items_names_offending_line() {
        let items = vec![LineItem::new("Valve"), LineItem::default()];
        match validate_line_items(&items) {
            Err(QuoteError::Validation { field, message }) => {
                assert_eq!(field, "items[2]");
                assert!(message.contains("description"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_line_items_rejects_blank_description() {
        match validate_line_items(&[LineItem::new("   ")]) {
            Err(QuoteError::Validation { field, message }) => {
                assert_eq!(field, "items[1]");
                assert_eq!(message, "description: Description must not be empty");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_model() {
        assert!(validate_model(&LineItem::new("Valve")).is_ok());
        assert!(validate_model(&LineItem::default()).is_err());
    }
}
