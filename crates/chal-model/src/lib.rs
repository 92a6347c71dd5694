//! Domain model for programming challenges.
//!
//! A [`Challenge`] describes a puzzle: a name and description, the class the
//! solver must implement, the [`Method`] signature it must expose (with its
//! [`Parameter`]s), and the [`TestCase`]s used to check a solution.
//!
//! All types validate their fields on construction and derive serde traits so
//! the entity store can encode them. Only [`Challenge`] is a storable
//! [`Entity`](chal_types::Entity); the other types are carried inside it.

pub mod challenge;
pub mod error;
pub mod method;
pub mod parameter;
pub mod test_case;
pub mod validate;

pub use challenge::Challenge;
pub use error::{ModelError, ModelResult};
pub use method::Method;
pub use parameter::Parameter;
pub use test_case::TestCase;
