//! File-backed plugin data persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{PluginData, PluginDataStore};

/// Stores the whole plugin blob as one pretty-printed JSON file.
pub struct FileDataStore {
    path: PathBuf,
}

impl FileDataStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> io::Result<Self> {
        let path = super::paths::get_data_file_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Cannot determine data directory")
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PluginDataStore for FileDataStore {
    fn load(&self) -> io::Result<Option<PluginData>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Ok(Some(data)),
            Err(err) => {
                // A corrupt file must not brick the plugin; start fresh and
                // leave the bytes on disk for inspection.
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "plugin data unreadable, starting fresh"
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, data: &PluginData) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(data)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, raw)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/data.rs"]
mod tests;
