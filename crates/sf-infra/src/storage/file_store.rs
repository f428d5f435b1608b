//! File-based key/value store
//!
//! Each key is a file inside one directory, written atomically through a
//! temporary file and a rename.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use sf_core::ports::KeyValueStorePort;

pub const DEFAULT_STORE_DIR: &str = "socialflow";

pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create store in the default sub-directory of `base_dir`.
    pub fn with_defaults(base_dir: impl AsRef<Path>) -> Self {
        Self::new(base_dir.as_ref().join(DEFAULT_STORE_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            bail!("invalid storage key: {key:?}");
        }
        Ok(self.dir.join(key))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create storage dir failed: {}", self.dir.display()))
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("read storage key failed: {}", path.display()))
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;

        let tmp_path = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp_path, value)
            .with_context(|| format!("write temp storage file failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &path).with_context(|| {
            format!(
                "rename temp storage file failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        debug!(key, bytes = value.len(), "Stored key");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("delete storage key failed: {}", path.display()))
            }
        }
    }
}
