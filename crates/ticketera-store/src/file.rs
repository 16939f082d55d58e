//! Session store persisted as a JSON file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use ticketera_core::error::{Error, StorageError};
use ticketera_core::{Result, SessionStore, SessionUpdate, StoredSession};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        message: err.to_string(),
    })
}

/// A [`SessionStore`] backed by a single JSON file.
///
/// Writes go to a temporary file that is renamed over the session file, so
/// a crash never leaves a half-written session behind. Every read-modify-write
/// holds an exclusive lock on a sibling `.lock` file, which keeps concurrent
/// processes sharing the same session file from losing each other's updates.
/// On Unix the session file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store for the given session file path.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;
        Ok(lock_file)
    }

    fn read(&self) -> Result<StoredSession> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(map_io(e)),
        };

        if json.trim().is_empty() {
            return Ok(StoredSession::default());
        }

        serde_json::from_str(&json).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })
        })
    }

    fn write(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string_pretty(session).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        let temp_path = self.temp_path();
        // A leftover from a crash may carry looser permissions; never reuse it.
        match fs::remove_file(&temp_path) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(map_io(e)),
            _ => {}
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).map_err(map_io)?;
        file.write_all(json.as_bytes()).map_err(map_io)?;
        file.sync_all().map_err(map_io)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(map_io)?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<StoredSession> {
        let lock = self.lock()?;
        let session = self.read();
        lock.unlock().map_err(map_io)?;
        session
    }

    #[instrument(skip(self, apply), fields(path = %self.path.display()))]
    async fn update(&self, apply: &SessionUpdate<'_>) -> Result<()> {
        let lock = self.lock()?;

        let result = self.read().and_then(|mut session| {
            apply(&mut session);
            self.write(&session)
        });

        lock.unlock().map_err(map_io)?;

        if result.is_ok() {
            debug!("Session file updated");
        }
        result
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<()> {
        let lock = self.lock()?;

        let result = match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to remove session file");
                Err(map_io(e))
            }
        };

        lock.unlock().map_err(map_io)?;

        if result.is_ok() {
            debug!("Session file cleared");
        }
        result
    }
}
