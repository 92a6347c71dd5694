use std::path::PathBuf;

use chal_types::EntityId;

/// Broad category of a [`StoreError`].
///
/// Callers use this to tell "your request was invalid" apart from "the store
/// is unhealthy". Configuration errors are fatal at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    InvalidArgument,
    Storage,
}

/// Errors from entity store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store directory does not exist or is not a directory.
    #[error("invalid store directory {path}: {reason}")]
    InvalidDirectory { path: PathBuf, reason: String },

    /// The store configuration could not be parsed or is inconsistent.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// `update` was called on an entity that has no ID.
    #[error("entity to update does not have an ID")]
    MissingId,

    /// The entity carries an ID this store never issued.
    #[error("entity id {0} was never issued by this store")]
    NotIssued(EntityId),

    /// No record exists for the ID.
    #[error("entity does not exist: {0}")]
    NotFound(EntityId),

    /// The record file exists but holds no data.
    #[error("empty record for entity {0}")]
    EmptyRecord(EntityId),

    /// The record file could not be interpreted as the requested entity.
    #[error("corrupt record for entity {id}: {reason}")]
    CorruptRecord { id: EntityId, reason: String },

    /// The counter file holds something other than a decimal ID.
    #[error("corrupt id counter {path}: {reason}")]
    CorruptCounter { path: PathBuf, reason: String },

    /// The counter reached `u64::MAX`.
    #[error("entity id space exhausted")]
    IdSpaceExhausted,

    /// Serialization or deserialization failure.
    #[error("codec error: {0}")]
    Codec(String),

    /// The record was written by an unknown envelope format.
    #[error("unsupported record format {found} (supported: {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    /// The record holds a different kind of entity than requested.
    #[error("record kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: String, found: String },

    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// The category this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidDirectory { .. } | Self::Config(_) => ErrorClass::Configuration,
            Self::MissingId | Self::NotIssued(_) | Self::NotFound(_) => {
                ErrorClass::InvalidArgument
            }
            Self::EmptyRecord(_)
            | Self::CorruptRecord { .. }
            | Self::CorruptCounter { .. }
            | Self::IdSpaceExhausted
            | Self::Codec(_)
            | Self::UnsupportedFormat { .. }
            | Self::KindMismatch { .. }
            | Self::Io(_) => ErrorClass::Storage,
        }
    }

    /// The ID names no record: either it was never issued or its record is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotIssued(_))
    }

    /// The entity has no ID this store assigned.
    pub fn is_missing_id(&self) -> bool {
        matches!(self, Self::MissingId | Self::NotIssued(_))
    }

    /// True for I/O failures and unreadable records or counters.
    pub fn is_storage(&self) -> bool {
        self.class() == ErrorClass::Storage
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_invalid_argument() {
        let id = EntityId::new(9);
        for err in [StoreError::MissingId, StoreError::NotIssued(id), StoreError::NotFound(id)] {
            assert_eq!(err.class(), ErrorClass::InvalidArgument, "{err}");
        }
    }

    #[test]
    fn never_issued_is_both_not_found_and_missing_id() {
        let err = StoreError::NotIssued(EntityId::new(999_999));
        assert!(err.is_not_found());
        assert!(err.is_missing_id());
    }

    #[test]
    fn deleted_record_is_not_missing_id() {
        let err = StoreError::NotFound(EntityId::new(1));
        assert!(err.is_not_found());
        assert!(!err.is_missing_id());
    }

    #[test]
    fn io_is_storage() {
        let err: StoreError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_storage());
        assert!(!err.is_not_found());
    }

    #[test]
    fn directory_errors_are_configuration() {
        let err = StoreError::InvalidDirectory {
            path: "/nope".into(),
            reason: "does not exist".into(),
        };
        assert_eq!(err.class(), ErrorClass::Configuration);
        assert!(err.to_string().contains("/nope"));
    }
}
