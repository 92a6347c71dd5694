use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::parameter::Parameter;
use crate::validate;

/// The method signature a challenge solution must implement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    name: String,
    return_type: String,
    parameters: Vec<Parameter>,
    constraints: Vec<String>,
}

impl Method {
    /// Construct a method. Requires a name, a return type, at least one
    /// parameter and at least one constraint.
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<Parameter>,
        constraints: Vec<String>,
    ) -> ModelResult<Self> {
        let method = Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters,
            constraints,
        };
        method.validate()?;
        Ok(method)
    }

    /// Re-check every field invariant, including those of each parameter.
    pub fn validate(&self) -> ModelResult<()> {
        validate::non_empty_str(&self.name, "name")?;
        validate::non_empty_str(&self.return_type, "return type")?;
        validate::non_empty_list(&self.parameters, "parameters")?;
        for parameter in &self.parameters {
            parameter.validate()?;
        }
        validate::non_empty_str_list(&self.constraints, "constraints")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }
}

/// Renders the signature, e.g. `count(string[] words, int limit) : int`.
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ") : {}", self.return_type)
    }
}
