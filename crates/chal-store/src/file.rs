//! File-backed entity store.
//!
//! Every entity lives in `<dir>/<id>.<ext>` as one codec-encoded line. The
//! filesystem is the index: a record exists exactly when its file does.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chal_types::{Entity, EntityId};
use tracing::{debug, warn};

use crate::allocator::IdAllocator;
use crate::codec::{Codec, JsonLinesCodec};
use crate::config::{StoreConfig, SyncMode};
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// Durable entity store over a flat directory.
///
/// ID allocation goes through an [`IdAllocator`] and is safe for concurrent
/// callers in this and other processes. Record files are not locked: two
/// callers updating or deleting the same ID at the same time is not
/// supported.
#[derive(Debug)]
pub struct FileEntityStore<C = JsonLinesCodec> {
    dir: PathBuf,
    extension: String,
    sync_mode: SyncMode,
    allocator: IdAllocator,
    codec: C,
}

impl FileEntityStore<JsonLinesCodec> {
    /// Open a store in an existing directory with the default settings.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::with_config(&StoreConfig::in_dir(dir), JsonLinesCodec)
    }
}

impl<C> FileEntityStore<C> {
    /// Open a store as described by `config`, encoding records with `codec`.
    ///
    /// Fails with `InvalidDirectory` if the directory does not exist (and
    /// `create_dir` is off) or is not a directory.
    pub fn with_config(config: &StoreConfig, codec: C) -> StoreResult<Self> {
        config.validate()?;
        let dir = config.dir.clone();

        if config.create_dir && !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| StoreError::InvalidDirectory {
                path: dir.clone(),
                reason: format!("cannot create: {e}"),
            })?;
            debug!(path = %dir.display(), "created store directory");
        }

        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(StoreError::InvalidDirectory {
                    path: dir,
                    reason: "not a directory".into(),
                })
            }
            Err(e) => {
                return Err(StoreError::InvalidDirectory {
                    path: dir,
                    reason: e.to_string(),
                })
            }
        }

        let allocator = IdAllocator::new(dir.join(&config.counter_file), config.sync_mode);
        debug!(path = %dir.display(), counter = %allocator.path().display(), "opened entity store");

        Ok(Self {
            dir,
            extension: config.extension.clone(),
            sync_mode: config.sync_mode,
            allocator,
            codec,
        })
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `id`.
    pub fn record_path(&self, id: EntityId) -> PathBuf {
        self.dir.join(format!("{id}.{}", self.extension))
    }

    /// Write one record plus its line terminator, truncating any previous
    /// contents. `create` controls whether a missing file may be created.
    fn write_record(&self, id: EntityId, bytes: &[u8], create: bool) -> StoreResult<()> {
        if bytes.contains(&b'\n') {
            return Err(StoreError::Codec(format!(
                "encoded entity {id} contains a line terminator"
            )));
        }

        let path = self.record_path(id);
        let mut file = OpenOptions::new()
            .write(true)
            .create(create)
            .truncate(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound && !create {
                    StoreError::NotFound(id)
                } else {
                    StoreError::Io(e)
                }
            })?;

        let mut record = Vec::with_capacity(bytes.len() + 1);
        record.extend_from_slice(bytes);
        record.push(b'\n');
        file.write_all(&record)?;
        file.flush()?;
        if self.sync_mode == SyncMode::EveryWrite {
            file.sync_all()?;
        }

        debug!(%id, path = %path.display(), len = record.len(), "wrote record");
        Ok(())
    }
}

impl<E, C> EntityStore<E> for FileEntityStore<C>
where
    E: Entity,
    C: Codec<E>,
{
    fn create(&self, entity: &mut E) -> StoreResult<EntityId> {
        let id = self.allocator.allocate()?;
        entity.set_id(id);
        let bytes = self.codec.encode(entity)?;
        self.write_record(id, &bytes, true)?;
        debug!(%id, kind = E::KIND, name = entity.name(), "created entity");
        Ok(id)
    }

    fn load(&self, id: EntityId) -> StoreResult<E> {
        let path = self.record_path(id);
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(id),
            _ => StoreError::Io(e),
        })?;

        let mut line = Vec::new();
        let read = BufReader::new(file).read_until(b'\n', &mut line)?;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if read == 0 || line.is_empty() {
            warn!(%id, path = %path.display(), "empty record");
            return Err(StoreError::EmptyRecord(id));
        }

        let entity: E = self.codec.decode(&line)?;
        if entity.id() != Some(id) {
            warn!(%id, found = ?entity.id(), path = %path.display(), "record id does not match its file name");
            return Err(StoreError::CorruptRecord {
                id,
                reason: format!("record carries id {:?}", entity.id()),
            });
        }

        debug!(%id, kind = E::KIND, "loaded entity");
        Ok(entity)
    }

    fn update(&self, entity: &E) -> StoreResult<()> {
        let id = entity.id().ok_or(StoreError::MissingId)?;
        match self.allocator.last_issued()? {
            Some(last) if id <= last => {}
            _ => return Err(StoreError::NotIssued(id)),
        }
        if !self.record_path(id).is_file() {
            return Err(StoreError::NotFound(id));
        }

        let bytes = self.codec.encode(entity)?;
        self.write_record(id, &bytes, false)?;
        debug!(%id, kind = E::KIND, "updated entity");
        Ok(())
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Err(StoreError::NotFound(id));
        }
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(id),
            _ => StoreError::Io(e),
        })?;
        debug!(%id, path = %path.display(), "deleted entity");
        Ok(())
    }

    fn exists(&self, id: EntityId) -> StoreResult<bool> {
        match fs::metadata(self.record_path(id)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
