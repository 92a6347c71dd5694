use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier assigned to an entity by the store on first creation.
///
/// IDs are issued from a monotonically increasing counter starting at 1.
/// An issued ID is never reused, even after the record is deleted, so a stale
/// reference can never resolve to a different record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The ID that follows this one, or `None` if the ID space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| TypeError::InvalidId(s.to_string()))?;
        if value == 0 {
            return Err(TypeError::ZeroId);
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_is_decimal() {
        assert_eq!(EntityId::new(42).to_string(), "42");
    }

    #[test]
    fn parse_rejects_zero() {
        assert_eq!("0".parse::<EntityId>().unwrap_err(), TypeError::ZeroId);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "abc".parse::<EntityId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidId(_)));
    }

    #[test]
    fn parse_trims_line_terminator() {
        assert_eq!("17\n".parse::<EntityId>().unwrap(), EntityId::new(17));
    }

    #[test]
    fn next_overflows_to_none() {
        assert_eq!(EntityId::new(u64::MAX).next(), None);
        assert_eq!(EntityId::new(1).next(), Some(EntityId::new(2)));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&EntityId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    proptest! {
        #[test]
        fn ordering_follows_counter(a in 1u64..u64::MAX, b in 1u64..u64::MAX) {
            prop_assert_eq!(EntityId::new(a) < EntityId::new(b), a < b);
        }
    }
}
