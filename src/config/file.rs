//! Filesystem-based configuration source.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::properties;
use super::source::Source;
use super::ConfigError;

/// A configuration source that loads a properties file from the filesystem.
///
/// The resolved location is the canonical absolute path, recorded once the
/// file has been read and parsed successfully.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    declared: String,
    resolved: OnceLock<String>,
}

impl FileSource {
    /// Creates a new filesystem source for the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let declared = path.display().to_string();
        Self {
            path,
            declared,
            resolved: OnceLock::new(),
        }
    }
}

impl Source for FileSource {
    fn kind(&self) -> &'static str {
        "filesystem"
    }

    fn declared(&self) -> &str {
        &self.declared
    }

    fn resolved(&self) -> Option<&str> {
        self.resolved.get().map(String::as_str)
    }

    fn load(&self) -> Result<HashMap<String, String>, ConfigError> {
        let io_err = |source| ConfigError::Io {
            location: self.declared.clone(),
            source,
        };

        let canonical = fs::canonicalize(&self.path).map_err(io_err)?;
        let text = fs::read_to_string(&canonical).map_err(io_err)?;
        let entries = properties::parse(&text, &self.declared)?;

        let _ = self.resolved.set(canonical.display().to_string());
        Ok(entries)
    }
}
