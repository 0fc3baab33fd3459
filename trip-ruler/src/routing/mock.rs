//! Mock routing service for testing without API access.
//!
//! Serves a fixed table of address pairs to route alternatives and records
//! every request it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::CandidateRoute;

use super::RoutingService;
use super::error::RoutingError;

/// Routing service backed by an in-memory table.
///
/// Unknown address pairs answer with no routes.
#[derive(Debug, Default)]
pub struct MockRoutingService {
    routes: HashMap<(String, String), Vec<CandidateRoute>>,
    reject_key: bool,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockRoutingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that rejects every request as unauthorized.
    pub fn rejecting() -> Self {
        Self {
            reject_key: true,
            ..Self::default()
        }
    }

    /// Register the alternatives returned for `from` -> `to`.
    pub fn with_route(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        candidates: Vec<CandidateRoute>,
    ) -> Self {
        self.routes.insert((from.into(), to.into()), candidates);
        self
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Every (from, to) pair requested so far, in order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl RoutingService for MockRoutingService {
    async fn routes(&self, from: &str, to: &str) -> Result<Vec<CandidateRoute>, RoutingError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((from.to_string(), to.to_string()));
        }

        if self.reject_key {
            return Err(RoutingError::Unauthorized);
        }

        Ok(self
            .routes
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_routes() {
        let mock = MockRoutingService::new()
            .with_route("1 Main St", "2 Oak Ave", vec![CandidateRoute::km(4.2)]);

        let routes = mock.routes("1 Main St", "2 Oak Ave").await.unwrap();
        assert_eq!(routes, vec![CandidateRoute::km(4.2)]);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn unknown_pair_has_no_routes() {
        let mock = MockRoutingService::new()
            .with_route("1 Main St", "2 Oak Ave", vec![CandidateRoute::km(4.2)]);

        // Direction matters
        let routes = mock.routes("2 Oak Ave", "1 Main St").await.unwrap();
        assert!(routes.is_empty());
        assert_eq!(
            mock.requests(),
            vec![("2 Oak Ave".to_string(), "1 Main St".to_string())]
        );
    }

    #[tokio::test]
    async fn rejecting_service() {
        let mock = MockRoutingService::rejecting();
        let result = mock.routes("a", "b").await;
        assert!(matches!(result, Err(RoutingError::Unauthorized)));
    }
}
