//! Distances and unit normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kilometres per statute mile.
const KM_PER_MILE: f64 = 1.609344;

/// Kilometres per international foot.
const KM_PER_FOOT: f64 = 0.0003048;

/// Error returned when a distance unit is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance unit: {0}")]
pub struct InvalidDistanceUnit(pub String);

/// A unit a routing service may report a distance in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Kilometres,
    Metres,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Parse a unit abbreviation (`km`, `m`, `mi`, `ft`).
    pub fn parse(s: &str) -> Result<Self, InvalidDistanceUnit> {
        match s {
            "km" => Ok(DistanceUnit::Kilometres),
            "m" => Ok(DistanceUnit::Metres),
            "mi" => Ok(DistanceUnit::Miles),
            "ft" => Ok(DistanceUnit::Feet),
            other => Err(InvalidDistanceUnit(other.to_string())),
        }
    }
}

/// How reported distances are scaled before caching.
///
/// `Metric` converts every unit to kilometres. `Legacy` reproduces the
/// scaling older distance caches were written with: metres divided by 100,
/// every other unit kept as reported. Mixing conventions against one cache
/// file makes its entries inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitConvention {
    #[default]
    Metric,
    Legacy,
}

impl UnitConvention {
    /// Scale a reported value according to this convention.
    pub fn normalize(self, value: f64, unit: DistanceUnit) -> Distance {
        let km = match (self, unit) {
            (_, DistanceUnit::Kilometres) => value,
            (UnitConvention::Metric, DistanceUnit::Metres) => value / 1000.0,
            (UnitConvention::Metric, DistanceUnit::Miles) => value * KM_PER_MILE,
            (UnitConvention::Metric, DistanceUnit::Feet) => value * KM_PER_FOOT,
            (UnitConvention::Legacy, DistanceUnit::Metres) => value / 100.0,
            (UnitConvention::Legacy, _) => value,
        };
        Distance::from_km(km)
    }
}

/// One route alternative as reported by a routing service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRoute {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl CandidateRoute {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    pub fn km(value: f64) -> Self {
        Self::new(value, DistanceUnit::Kilometres)
    }
}

/// A driving distance, in kilometres under the metric convention.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    pub fn from_km(km: f64) -> Self {
        Distance(km)
    }

    pub fn km(self) -> f64 {
        self.0
    }

    /// The shortest of several route alternatives, after normalization.
    ///
    /// Returns `None` when there are no candidates.
    pub fn shortest(candidates: &[CandidateRoute], convention: UnitConvention) -> Option<Self> {
        candidates
            .iter()
            .map(|c| convention.normalize(c.value, c.unit))
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units() {
        assert_eq!(DistanceUnit::parse("km"), Ok(DistanceUnit::Kilometres));
        assert_eq!(DistanceUnit::parse("m"), Ok(DistanceUnit::Metres));
        assert_eq!(DistanceUnit::parse("mi"), Ok(DistanceUnit::Miles));
        assert_eq!(DistanceUnit::parse("ft"), Ok(DistanceUnit::Feet));
        assert!(DistanceUnit::parse("KM").is_err());
        assert!(DistanceUnit::parse("").is_err());
    }

    #[test]
    fn metric_normalization() {
        let metric = UnitConvention::Metric;
        assert_eq!(metric.normalize(12.3, DistanceUnit::Kilometres).km(), 12.3);
        assert_eq!(metric.normalize(850.0, DistanceUnit::Metres).km(), 0.85);
        assert!((metric.normalize(10.0, DistanceUnit::Miles).km() - 16.09344).abs() < 1e-9);
        assert!((metric.normalize(1000.0, DistanceUnit::Feet).km() - 0.3048).abs() < 1e-9);
    }

    #[test]
    fn legacy_normalization() {
        let legacy = UnitConvention::Legacy;
        assert_eq!(legacy.normalize(850.0, DistanceUnit::Metres).km(), 8.5);
        assert_eq!(legacy.normalize(12.3, DistanceUnit::Kilometres).km(), 12.3);
        assert_eq!(legacy.normalize(7.0, DistanceUnit::Miles).km(), 7.0);
    }

    #[test]
    fn shortest_picks_minimum() {
        let candidates = [
            CandidateRoute::km(12.3),
            CandidateRoute::km(9.8),
            CandidateRoute::km(15.0),
        ];
        let shortest = Distance::shortest(&candidates, UnitConvention::Metric).unwrap();
        assert_eq!(shortest.km(), 9.8);
    }

    #[test]
    fn shortest_compares_after_normalization() {
        let candidates = [
            CandidateRoute::km(1.2),
            CandidateRoute::new(900.0, DistanceUnit::Metres),
        ];
        let metric = Distance::shortest(&candidates, UnitConvention::Metric).unwrap();
        assert_eq!(metric.km(), 0.9);

        // 900 m scales to 9 under the legacy convention, so 1.2 km wins
        let legacy = Distance::shortest(&candidates, UnitConvention::Legacy).unwrap();
        assert_eq!(legacy.km(), 1.2);
    }

    #[test]
    fn shortest_of_nothing() {
        assert_eq!(Distance::shortest(&[], UnitConvention::Metric), None);
    }

    #[test]
    fn display() {
        assert_eq!(Distance::from_km(9.8).to_string(), "9.8");
        assert_eq!(Distance::from_km(12.0).to_string(), "12");
    }
}
