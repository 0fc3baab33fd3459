//! Address directory: location name to routable address.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::domain::LocationName;
use crate::error::RulerError;

/// Read-only lookup from location name to postal address.
///
/// Loaded from a YAML mapping such as:
///
/// ```yaml
/// Home: 1 Main St, Springfield
/// Head_Office: 2 Oak Ave, Springfield
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressDirectory {
    addresses: HashMap<String, String>,
}

impl AddressDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, address: impl Into<String>) {
        self.addresses.insert(name.into(), address.into());
    }

    /// Parse a directory from YAML. An empty or `null` document is an empty
    /// directory.
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(Self::new());
        }
        let addresses: Option<HashMap<String, String>> = serde_yaml::from_str(input)?;
        Ok(Self {
            addresses: addresses.unwrap_or_default(),
        })
    }

    /// Load a directory file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, RulerError> {
        info!(path = %path.display(), "Reading addresses file");
        let contents =
            std::fs::read_to_string(path).map_err(|e| RulerError::from_read(path, e))?;

        let directory =
            Self::from_yaml_str(&contents).map_err(|e| RulerError::MalformedPersistedData {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        info!(addresses = directory.len(), "Imported addresses");
        Ok(directory)
    }

    /// Look up the address of a location.
    pub fn address(&self, name: &LocationName) -> Option<&str> {
        self.addresses.get(name.as_str()).map(String::as_str)
    }

    /// Whether a location is known.
    pub fn contains(&self, name: &LocationName) -> bool {
        self.addresses.contains_key(name.as_str())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
