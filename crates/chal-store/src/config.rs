use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::JsonLinesCodec;
use crate::error::{StoreError, StoreResult};
use crate::file::FileEntityStore;

/// Flush/sync strategy for record and counter writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// `fsync` after every write (safest, highest latency).
    EveryWrite,
    /// Rely on OS page-cache buffering (fastest, least durable).
    #[default]
    OsDefault,
}

/// Configuration for a [`FileEntityStore`].
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// dir = "/var/lib/challenges"
/// sync_mode = "every-write"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the counter file and one record file per entity.
    pub dir: PathBuf,
    /// Name of the ID counter file inside `dir`.
    pub counter_file: String,
    /// Record file extension, without the dot.
    pub extension: String,
    /// Sync strategy.
    pub sync_mode: SyncMode,
    /// Create `dir` on open if it does not exist.
    pub create_dir: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/tmp/cc"),
            counter_file: "iep.lock".into(),
            extension: "rec".into(),
            sync_mode: SyncMode::default(),
            create_dir: false,
        }
    }
}

impl StoreConfig {
    /// Default configuration rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check that the file names derived from this config are usable.
    pub fn validate(&self) -> StoreResult<()> {
        if self.counter_file.is_empty() || self.counter_file.contains(['/', '\\']) {
            return Err(StoreError::Config(format!(
                "counter_file must be a plain file name, got {:?}",
                self.counter_file
            )));
        }
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(StoreError::Config(format!(
                "extension must be non-empty and contain no '.' or path separators, got {:?}",
                self.extension
            )));
        }
        // A counter file named like a record would be mistaken for one.
        if Path::new(&self.counter_file).extension().and_then(|e| e.to_str())
            == Some(self.extension.as_str())
        {
            return Err(StoreError::Config(format!(
                "counter_file {:?} must not use the record extension",
                self.counter_file
            )));
        }
        Ok(())
    }
}

/// Open the default file-backed store described by `config`.
pub fn open_store(config: &StoreConfig) -> StoreResult<FileEntityStore<JsonLinesCodec>> {
    FileEntityStore::with_config(config, JsonLinesCodec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.dir, PathBuf::from("/tmp/cc"));
        assert_eq!(c.counter_file, "iep.lock");
        assert_eq!(c.extension, "rec");
        assert_eq!(c.sync_mode, SyncMode::OsDefault);
        assert!(!c.create_dir);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c = StoreConfig::from_toml_str(
            r#"
            dir = "/var/lib/challenges"
            sync_mode = "every-write"
            "#,
        )
        .unwrap();
        assert_eq!(c.dir, PathBuf::from("/var/lib/challenges"));
        assert_eq!(c.sync_mode, SyncMode::EveryWrite);
        assert_eq!(c.extension, "rec");
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = StoreConfig::from_toml_str("dir = ").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn dotted_extension_rejected() {
        let err = StoreConfig::from_toml_str(r#"extension = ".rec""#).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn counter_with_record_extension_rejected() {
        let err = StoreConfig::from_toml_str(r#"counter_file = "ids.rec""#).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "create_dir = true\n").unwrap();
        let c = StoreConfig::load(&path).unwrap();
        assert!(c.create_dir);
    }
}
