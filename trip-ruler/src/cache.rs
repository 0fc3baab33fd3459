//! Distance cache and the routing client wrapper that fills it.
//!
//! Distances are keyed by canonical trip key (`"A > B"`), so each named
//! route costs at most one routing request across runs as long as the cache
//! file is kept. Entries are never overwritten: the first distance recorded
//! for a key wins.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{Distance, TripKey, UnitConvention};
use crate::error::RulerError;
use crate::routing::{RoutingError, RoutingService};

/// Default cache file name.
pub const DEFAULT_CACHE_FILE: &str = "distances.yaml";

/// In-memory distance cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceCache {
    entries: BTreeMap<TripKey, Distance>,

    /// Entries inserted since load.
    added: usize,
}

impl DistanceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted cache. An empty or `null` document is an empty cache.
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(Self::new());
        }
        let entries: Option<BTreeMap<TripKey, Distance>> = serde_yaml::from_str(input)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
            added: 0,
        })
    }

    /// Get a cached distance.
    pub fn get(&self, key: &TripKey) -> Option<Distance> {
        self.entries.get(key).copied()
    }

    /// Insert a distance unless the key is already cached.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn put(&mut self, key: TripKey, distance: Distance) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, distance);
        self.added += 1;
        true
    }

    /// Render every entry as `<key>: <value>` lines, sorted by key.
    pub fn serialize_all(&self) -> String {
        let mut out = String::new();
        for (key, distance) in &self.entries {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{key}: {distance}");
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries inserted since the cache was loaded.
    pub fn added_count(&self) -> usize {
        self.added
    }
}

/// Location of the persisted distance cache.
#[derive(Debug, Clone)]
pub struct DistanceCacheFile {
    path: PathBuf,
}

impl DistanceCacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the cache. A missing file is an empty cache; unreadable or
    /// malformed content is an error.
    pub fn load(&self) -> Result<DistanceCache, RulerError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No distances file, starting empty");
                return Ok(DistanceCache::new());
            }
            Err(e) => return Err(RulerError::from_read(&self.path, e)),
        };

        info!(path = %self.path.display(), "Importing distances");
        DistanceCache::from_yaml_str(&contents).map_err(|e| RulerError::MalformedPersistedData {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Rewrite the whole cache file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, cache: &DistanceCache) -> Result<(), RulerError> {
        let write_err = |source| RulerError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        std::fs::write(&self.path, cache.serialize_all()).map_err(write_err)?;

        info!(
            path = %self.path.display(),
            entries = cache.len(),
            added = cache.added_count(),
            "Saved distances"
        );
        Ok(())
    }
}

/// Failure to obtain a distance for a trip.
#[derive(Debug, thiserror::Error)]
pub enum DistanceLookupError {
    /// The service returned no usable route
    #[error("no route found")]
    NoRoute,

    /// The service request failed
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Routing service with a distance cache in front of it.
///
/// Wraps a [`RoutingService`] and only calls it for trip keys not cached yet.
pub struct CachedRouter<R> {
    router: R,
    cache: DistanceCache,
    convention: UnitConvention,
    routing_calls: usize,
}

impl<R: RoutingService> CachedRouter<R> {
    /// Create a new cached router.
    pub fn new(router: R, cache: DistanceCache, convention: UnitConvention) -> Self {
        Self {
            router,
            cache,
            convention,
            routing_calls: 0,
        }
    }

    /// Distance for a trip, using the cache if available.
    ///
    /// On a miss, asks the routing service for alternatives between the two
    /// addresses and caches the shortest one.
    pub async fn distance(
        &mut self,
        key: &TripKey,
        from_address: &str,
        to_address: &str,
    ) -> Result<Distance, DistanceLookupError> {
        if let Some(cached) = self.cache.get(key) {
            debug!(trip = %key, distance = %cached, "distance cache hit");
            return Ok(cached);
        }

        info!(trip = %key, "Calculating distance with the routing service");
        self.routing_calls += 1;
        let candidates = self.router.routes(from_address, to_address).await?;

        let distance = Distance::shortest(&candidates, self.convention)
            .ok_or(DistanceLookupError::NoRoute)?;

        debug!(
            trip = %key,
            alternatives = candidates.len(),
            distance = %distance,
            "picked shortest alternative"
        );
        self.cache.put(key.clone(), distance);

        Ok(distance)
    }

    /// Access the underlying routing service.
    pub fn router(&self) -> &R {
        &self.router
    }

    /// Access the cache.
    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    /// Take back the cache, e.g. to persist it.
    pub fn into_cache(self) -> DistanceCache {
        self.cache
    }

    /// Number of routing requests issued.
    pub fn routing_calls(&self) -> usize {
        self.routing_calls
    }
}
