use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::debug;

use crate::config::env::store_dir;
use crate::domain::snapshot::MatchSnapshot;
use crate::persistence::{MatchStore, StoreError};

/// One JSON file per match.
///
/// Writes go to a temporary sibling and are renamed into place while an
/// exclusive lock file is held.
///
/// The `<match>.lock` sibling is left in place after each save. Every writer
/// must lock the same file; deleting it would let a later writer lock a fresh
/// inode while an earlier one still holds the old.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<match_id>.json`
    pub fn in_dir(dir: impl AsRef<Path>, match_id: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{match_id}.json")))
    }

    /// File under `COURTSIDE_STORE_DIR`.
    pub fn from_env(match_id: &str) -> Self {
        Self::in_dir(store_dir(), match_id)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn acquire_lock(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        // try_lock_exclusive() returns io::Result<bool>
        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => Ok(file),
            Ok(false) => Err(StoreError::Locked(lock_path.display().to_string())),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

impl MatchStore for JsonFileStore {
    fn save(&self, snapshot: &MatchSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let lock = self.acquire_lock()?;

        let temp = self.temp_path();
        let result = (|| -> Result<(), StoreError> {
            let mut writer = BufWriter::new(File::create(&temp)?);
            serde_json::to_writer(&mut writer, snapshot)?;
            writer.flush()?;
            fs::rename(&temp, &self.path)?;
            Ok(())
        })();

        if let Err(e) = FileExt::unlock(&lock) {
            debug!(
                error = %e,
                path = %self.lock_path().display(),
                "unlock returned error (may be benign)"
            );
        }
        if result.is_ok() {
            debug!(path = %self.path.display(), "snapshot written");
        }
        result
    }

    fn load(&self) -> Result<Option<MatchSnapshot>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}
