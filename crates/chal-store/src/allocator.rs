//! Entity ID allocation.
//!
//! The counter file holds the last issued ID as one decimal line. Allocation
//! is a read-increment-write of that file, serialized by an in-process mutex
//! and an exclusive OS file lock (`flock` on Unix, `LockFileEx` on Windows),
//! so it is safe across threads and across processes sharing the directory.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chal_types::EntityId;
use fs2::FileExt;
use tracing::{debug, error, warn};

use crate::config::SyncMode;
use crate::error::{StoreError, StoreResult};

/// Hands out strictly increasing entity IDs backed by a counter file.
///
/// The counter file is created lazily by the first [`allocate`] call and is
/// never deleted. IDs are never reused.
///
/// [`allocate`]: IdAllocator::allocate
#[derive(Debug)]
pub struct IdAllocator {
    path: PathBuf,
    sync_mode: SyncMode,
    /// Serializes allocations within this process. The file lock covers
    /// other processes.
    guard: Mutex<()>,
}

/// Holds an OS lock on the counter file; released on drop, on every path.
struct CounterLock<'a> {
    file: File,
    path: &'a Path,
}

impl<'a> CounterLock<'a> {
    fn exclusive(file: File, path: &'a Path) -> io::Result<Self> {
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file, path })
    }

    fn shared(file: File, path: &'a Path) -> io::Result<Self> {
        FileExt::lock_shared(&file)?;
        Ok(Self { file, path })
    }
}

impl Drop for CounterLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            // Closing the handle right after this releases the lock anyway.
            error!(path = %self.path.display(), error = %e, "failed to release id counter lock");
        }
    }
}

impl IdAllocator {
    /// Create an allocator for the counter file at `path`. Nothing is touched
    /// on disk until the first allocation.
    pub fn new(path: impl Into<PathBuf>, sync_mode: SyncMode) -> Self {
        Self {
            path: path.into(),
            sync_mode,
            guard: Mutex::new(()),
        }
    }

    /// Path of the counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Allocate the next ID.
    ///
    /// Opens (or creates) the counter file without truncating it, takes an
    /// exclusive lock, reads the last issued value (an empty file counts as
    /// 0), increments it, and rewrites the file from the start. The lock is
    /// held for the whole sequence.
    pub fn allocate(&self) -> StoreResult<EntityId> {
        let _in_process = self.guard.lock().unwrap_or_else(PoisonError::into_inner);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let mut lock = CounterLock::exclusive(file, &self.path)?;

        let current = read_counter(&mut lock.file, &self.path)?;
        let next = EntityId::new(current)
            .next()
            .ok_or(StoreError::IdSpaceExhausted)?;

        lock.file.seek(SeekFrom::Start(0))?;
        lock.file.set_len(0)?;
        lock.file.write_all(format!("{next}\n").as_bytes())?;
        lock.file.flush()?;
        if self.sync_mode == SyncMode::EveryWrite {
            lock.file.sync_all()?;
        }
        drop(lock);

        debug!(id = %next, path = %self.path.display(), "allocated entity id");
        Ok(next)
    }

    /// The last ID issued, or `None` if nothing has been allocated yet.
    pub fn last_issued(&self) -> StoreResult<Option<EntityId>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut lock = CounterLock::shared(file, &self.path)?;
        let current = read_counter(&mut lock.file, &self.path)?;
        Ok((current > 0).then(|| EntityId::new(current)))
    }
}

/// Read the first decimal token of the counter file; empty means 0.
fn read_counter(file: &mut File, path: &Path) -> StoreResult<u64> {
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| {
        if e.kind() == io::ErrorKind::InvalidData {
            StoreError::CorruptCounter {
                path: path.to_path_buf(),
                reason: "not valid UTF-8".into(),
            }
        } else {
            StoreError::Io(e)
        }
    })?;

    let Some(token) = text.split_whitespace().next() else {
        return Ok(0);
    };
    token.parse::<u64>().map_err(|e| {
        warn!(path = %path.display(), token, "id counter holds a non-numeric value");
        StoreError::CorruptCounter {
            path: path.to_path_buf(),
            reason: format!("{token:?}: {e}"),
        }
    })
}
