use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelResult;
use crate::validate;

/// Inputs and expected output for one run of a challenge method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    is_example: bool,
    inputs: Vec<Value>,
    expected_output: Value,
    #[serde(default)]
    explanation: String,
}

impl TestCase {
    /// Construct a test case. Requires at least one input and a non-null
    /// expected output. The explanation may be empty.
    pub fn new(
        is_example: bool,
        inputs: Vec<Value>,
        expected_output: Value,
        explanation: impl Into<String>,
    ) -> ModelResult<Self> {
        let test_case = Self {
            is_example,
            inputs,
            expected_output,
            explanation: explanation.into(),
        };
        test_case.validate()?;
        Ok(test_case)
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate::non_empty_list(&self.inputs, "inputs")?;
        validate::not_null(&self.expected_output, "expected output")
    }

    /// Example cases are shown to the solver; the rest are hidden.
    pub fn is_example(&self) -> bool {
        self.is_example
    }

    pub fn inputs(&self) -> &[Value] {
        &self.inputs
    }

    pub fn expected_output(&self) -> &Value {
        &self.expected_output
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Strings render without JSON quoting so `("abc", 2)` shows as `(abc, 2)`.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_value(f, input)?;
        }
        f.write_str(") : ")?;
        write_value(f, &self.expected_output)
    }
}
