//! Run configuration.
//!
//! Defaults reproduce the fixed file names the tool has always used, so
//! running `ruler` in a directory containing them needs no options.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cache::DEFAULT_CACHE_FILE;
use crate::domain::UnitConvention;
use crate::error::RulerError;

pub const DEFAULT_KEY_FILE: &str = "key.txt";
pub const DEFAULT_ADDRESSES_FILE: &str = "addresses.yaml";
pub const DEFAULT_LOG_FILE: &str = "data.txt";
pub const DEFAULT_REPORT_FILE: &str = "kilometers.csv";

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// File holding the routing API key
    pub key_file: PathBuf,
    /// Address directory (YAML)
    pub addresses: PathBuf,
    /// Distance cache, read at start and rewritten on success
    pub distances: PathBuf,
    /// Trip log
    pub log: PathBuf,
    /// CSV report
    pub report: PathBuf,
    /// How reported distances are scaled
    pub units: UnitConvention,
    /// Routing API base URL; `None` for the production endpoint
    pub base_url: Option<String>,
    /// Routing request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            key_file: DEFAULT_KEY_FILE.into(),
            addresses: DEFAULT_ADDRESSES_FILE.into(),
            distances: DEFAULT_CACHE_FILE.into(),
            log: DEFAULT_LOG_FILE.into(),
            report: DEFAULT_REPORT_FILE.into(),
            units: UnitConvention::default(),
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl RunConfig {
    /// Resolve every default file name against `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self {
            key_file: dir.join(defaults.key_file),
            addresses: dir.join(defaults.addresses),
            distances: dir.join(defaults.distances),
            log: dir.join(defaults.log),
            report: dir.join(defaults.report),
            ..defaults
        }
    }

    pub fn with_units(mut self, units: UnitConvention) -> Self {
        self.units = units;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Read the routing API key. The file must exist and hold a non-blank key.
pub fn read_api_key(path: &Path) -> Result<String, RulerError> {
    info!(path = %path.display(), "Reading key file");

    let contents = std::fs::read_to_string(path).map_err(|e| RulerError::Configuration {
        message: format!(
            "{} file (routing API key) can't be read: {e}. \
             Please create the file and paste your key in it",
            path.display()
        ),
    })?;

    let key = contents.trim();
    if key.is_empty() {
        return Err(RulerError::Configuration {
            message: format!(
                "{} is empty. Please paste your routing API key in it",
                path.display()
            ),
        });
    }

    Ok(key.to_string())
}
