//! Resolved trips, their cache keys, and report rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::distance::Distance;
use super::name::LocationName;

/// Error returned when a trip would start and end at the same place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("departure and arrival cannot both be {0}")]
pub struct SameEndpoints(pub LocationName);

/// A trip between two distinct named locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub departure: LocationName,
    pub arrival: LocationName,
}

impl Trip {
    /// Create a trip. Departure and arrival must differ.
    pub fn new(departure: LocationName, arrival: LocationName) -> Result<Self, SameEndpoints> {
        if departure == arrival {
            return Err(SameEndpoints(departure));
        }
        Ok(Self { departure, arrival })
    }

    /// The direction-sensitive cache key for this trip.
    pub fn key(&self) -> TripKey {
        TripKey::new(&self.departure, &self.arrival)
    }

    /// Human-readable label, underscores rendered as spaces.
    pub fn label(&self) -> String {
        format!(
            "{} > {}",
            self.departure.display_name(),
            self.arrival.display_name()
        )
    }
}

/// Canonical distance cache key, `"<departure> > <arrival>"`.
///
/// # Examples
///
/// ```
/// use trip_ruler::domain::{LocationName, TripKey};
///
/// let home = LocationName::parse("Home").unwrap();
/// let work = LocationName::parse("Work").unwrap();
///
/// assert_eq!(TripKey::new(&home, &work).as_str(), "Home > Work");
/// assert_ne!(TripKey::new(&home, &work), TripKey::new(&work, &home));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripKey(String);

impl TripKey {
    pub fn new(departure: &LocationName, arrival: &LocationName) -> Self {
        TripKey(format!("{departure} > {arrival}"))
    }

    /// Wrap a key read back from a persisted cache.
    pub fn from_raw(key: impl Into<String>) -> Self {
        TripKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the output report.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTripRow {
    /// 1-based position of the trip line in the whole log.
    pub position: usize,
    /// Date as `D/M/Y`.
    pub date: String,
    pub departure_address: String,
    pub arrival_address: String,
    pub label: String,
    pub distance: Distance,
}
