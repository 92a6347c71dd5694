//! Field validators shared by the model constructors.
//!
//! Each validator names the offending field in its error so that a caller
//! assembling a challenge from user input can report exactly what is wrong.

use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Require a non-empty string.
pub fn non_empty_str(value: &str, field: &str) -> ModelResult<()> {
    if value.is_empty() {
        return Err(ModelError::Empty {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Require a list with at least one element.
pub fn non_empty_list<T>(values: &[T], field: &str) -> ModelResult<()> {
    if values.is_empty() {
        return Err(ModelError::NoElements {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Require a non-empty list of non-empty strings.
pub fn non_empty_str_list<S: AsRef<str>>(values: &[S], field: &str) -> ModelResult<()> {
    non_empty_list(values, field)?;
    if let Some(index) = values.iter().position(|v| v.as_ref().is_empty()) {
        return Err(ModelError::EmptyElement {
            field: field.to_string(),
            index,
        });
    }
    Ok(())
}

/// Require a JSON value other than `null`.
pub fn not_null(value: &Value, field: &str) -> ModelResult<()> {
    if value.is_null() {
        return Err(ModelError::NullValue {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_string_rejected() {
        let err = non_empty_str("", "name").unwrap_err();
        assert_eq!(err.to_string(), "name is an empty string");
    }

    #[test]
    fn whitespace_string_accepted() {
        assert!(non_empty_str(" ", "name").is_ok());
    }

    #[test]
    fn empty_list_rejected() {
        let err = non_empty_list::<u8>(&[], "inputs").unwrap_err();
        assert!(matches!(err, ModelError::NoElements { .. }));
    }

    #[test]
    fn empty_element_reports_index() {
        let err = non_empty_str_list(&["a", "", "c"], "constraints").unwrap_err();
        assert_eq!(
            err,
            ModelError::EmptyElement {
                field: "constraints".into(),
                index: 1
            }
        );
        assert_eq!(err.to_string(), "constraints[1] is an empty string");
    }

    #[test]
    fn null_rejected_but_falsy_values_accepted() {
        assert!(not_null(&Value::Null, "expected output").is_err());
        assert!(not_null(&json!(0), "expected output").is_ok());
        assert!(not_null(&json!(false), "expected output").is_ok());
        assert!(not_null(&json!(""), "expected output").is_ok());
    }
}
