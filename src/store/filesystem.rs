use super::storage::KeyValueStore;
use crate::error::{LensError, Result};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each key as `<key>.json` inside a data directory.
pub struct FilesystemStore {
    data_dir: PathBuf,
}

impl FilesystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `$LENS_DATA_DIR`, else `<data dir>/minimalist-lens`, else `./.minimalist-lens`.
    pub fn default_data_dir() -> PathBuf {
        if let Ok(dir) = env::var("LENS_DATA_DIR") {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        dirs::data_dir()
            .map(|dir| dir.join("minimalist-lens"))
            .unwrap_or_else(|| PathBuf::from(".minimalist-lens"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(LensError::StorageError(format!("invalid key '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl Default for FilesystemStore {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}

impl KeyValueStore for FilesystemStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key).ok()?;
        fs::read_to_string(path).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        // Replace via rename; readers never see a partial file
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
