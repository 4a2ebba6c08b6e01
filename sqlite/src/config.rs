//! Connection configuration.
//!
//! Defines the YAML-serializable settings applied when a connection is
//! opened: the row-buffer (chunk) size and dynamic extension loading.
//!
//! # Example YAML
//!
//! ```yaml
//! buffer_size: 5000
//! enable_extensions: true
//! extensions:
//!   - path: /usr/lib/sqlite3/pcre.so
//!     entry_point: sqlite3_pcre_init
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use rsqlite_core::DEFAULT_CHUNK_CAPACITY;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A dynamic extension to load right after opening.
///
/// # Examples
///
/// ```
/// # use rsqlite_connection::ExtensionConfig;
/// let ext = ExtensionConfig::new("/usr/lib/sqlite3/pcre.so");
/// assert!(ext.entry_point.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Path to the shared library.
    pub path: PathBuf,
    /// Entry point symbol; SQLite derives one from the file name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
}

impl ExtensionConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entry_point: None,
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }
}

/// Settings for opening a read-only connection.
///
/// # Examples
///
/// ```
/// use rsqlite_connection::Config;
///
/// let config = Config::default();
/// assert_eq!(config.buffer_size, 5000);
/// assert!(config.enable_extensions);
///
/// let small = Config::default().with_buffer_size(64);
/// assert_eq!(small.buffer_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows per result chunk. Must be at least 1.
    pub buffer_size: usize,
    /// Allow dynamic extensions to be loaded into the connection.
    pub enable_extensions: bool,
    /// Extensions loaded when the connection opens.
    pub extensions: Vec<ExtensionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_CHUNK_CAPACITY.get(),
            enable_extensions: true,
            extensions: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConnectionError::Io) if the file cannot be
    /// read, or [`Yaml`](crate::ConnectionError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_extension(mut self, extension: ExtensionConfig) -> Self {
        self.extensions.push(extension);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
buffer_size: 250
enable_extensions: true
extensions:
  - path: /opt/ext/pcre.so
    entry_point: sqlite3_pcre_init
  - path: /opt/ext/csv.so
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: Config = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.buffer_size, 250);
        assert!(config.enable_extensions);
        assert_eq!(config.extensions.len(), 2);
        assert_eq!(
            config.extensions[0].entry_point.as_deref(),
            Some("sqlite3_pcre_init")
        );
        assert_eq!(config.extensions[1].path, PathBuf::from("/opt/ext/csv.so"));
        assert!(config.extensions[1].entry_point.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_yaml::from_str("enable_extensions: false\n").unwrap();
        assert_eq!(config.buffer_size, 5000);
        assert!(!config.enable_extensions);
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsqlite.yml");

        let original = Config::default()
            .with_buffer_size(12)
            .with_extension(ExtensionConfig::new("/opt/ext/a.so").with_entry_point("init_a"));
        original.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/rsqlite.yml").unwrap_err();
        assert!(matches!(err, crate::ConnectionError::Io(_)));
    }
}
