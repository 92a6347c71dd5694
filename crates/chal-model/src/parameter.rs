use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::validate;

/// Types the solver receives as plain values rather than collections.
const SCALAR_TYPES: &[&str] = &["bool", "int", "float", "string"];

/// A single parameter of a challenge method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    constraints: Vec<String>,
}

impl Parameter {
    /// Construct a parameter. Name and type must be non-empty and there must
    /// be at least one (non-empty) constraint.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        constraints: Vec<String>,
    ) -> ModelResult<Self> {
        let parameter = Self {
            name: name.into(),
            type_name: type_name.into(),
            constraints,
        };
        parameter.validate()?;
        Ok(parameter)
    }

    /// Re-check every field invariant.
    pub fn validate(&self) -> ModelResult<()> {
        validate::non_empty_str(&self.name, "name")?;
        validate::non_empty_str(&self.type_name, "type")?;
        validate::non_empty_str_list(&self.constraints, "constraints")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Returns `true` for `bool`, `int`, `float` and `string` parameters.
    pub fn is_scalar(&self) -> bool {
        SCALAR_TYPES.contains(&self.type_name.as_str())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn constraints(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scalar_parameter() {
        let p = Parameter::new("test-1", "int", constraints(&["test is in range [0..50]"])).unwrap();
        assert_eq!(p.name(), "test-1");
        assert_eq!(p.type_name(), "int");
        assert_eq!(p.constraints().len(), 1);
        assert!(p.is_scalar());
        assert_eq!(p.to_string(), "int test-1");
    }

    #[test]
    fn array_parameter_is_not_scalar() {
        let p = Parameter::new(
            "test-3",
            "array",
            constraints(&[
                "test is a non-empty array of strings",
                "each element of test is a string of length 10",
            ]),
        )
        .unwrap();
        assert!(!p.is_scalar());
        assert_eq!(p.to_string(), "array test-3");
    }

    #[test]
    fn empty_name_rejected() {
        let err = Parameter::new("", "int", constraints(&["c"])).unwrap_err();
        assert_eq!(err, ModelError::Empty { field: "name".into() });
    }

    #[test]
    fn empty_type_rejected() {
        let err = Parameter::new("test", "", constraints(&["c"])).unwrap_err();
        assert_eq!(err, ModelError::Empty { field: "type".into() });
    }

    #[test]
    fn missing_constraints_rejected() {
        let err = Parameter::new("test", "int", vec![]).unwrap_err();
        assert!(matches!(err, ModelError::NoElements { .. }));
    }

    #[test]
    fn type_field_serialized_as_type() {
        let p = Parameter::new("n", "int", constraints(&["n > 0"])).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "int");
    }
}
