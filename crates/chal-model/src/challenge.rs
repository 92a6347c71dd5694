use std::fmt;

use chal_types::{Entity, EntityId};
use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::method::Method;
use crate::test_case::TestCase;
use crate::validate;

/// A programming challenge (puzzle).
///
/// The `id` is absent until the challenge is first stored; the store assigns
/// it. Every other field is validated on construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    name: String,
    description: String,
    class_name: String,
    method: Method,
    test_cases: Vec<TestCase>,
}

impl Challenge {
    /// Construct an unpersisted challenge.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        class_name: impl Into<String>,
        method: Method,
        test_cases: Vec<TestCase>,
    ) -> ModelResult<Self> {
        let challenge = Self {
            id: None,
            name: name.into(),
            description: description.into(),
            class_name: class_name.into(),
            method,
            test_cases,
        };
        challenge.validate()?;
        Ok(challenge)
    }

    /// Re-check every invariant of the challenge and its nested values.
    ///
    /// Deserialization does not validate, so challenges read from outside the
    /// store should pass through here before being created.
    pub fn validate(&self) -> ModelResult<()> {
        validate::non_empty_str(&self.name, "name")?;
        validate::non_empty_str(&self.description, "description")?;
        validate::non_empty_str(&self.class_name, "class name")?;
        self.method.validate()?;
        validate::non_empty_list(&self.test_cases, "test cases")?;
        for test_case in &self.test_cases {
            test_case.validate()?;
        }
        Ok(())
    }

    /// Rename the challenge. The name must be non-empty.
    pub fn update_name(&mut self, name: impl Into<String>) -> ModelResult<()> {
        let name = name.into();
        validate::non_empty_str(&name, "name")?;
        self.name = name;
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }
}

impl Entity for Challenge {
    const KIND: &'static str = "challenge";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}->{}", self.name, self.class_name, self.method)
    }
}
