//! Routing service clients.
//!
//! A routing service answers "how far is it to drive from this address to
//! that one?" with one or more route alternatives. The trip resolver only
//! sees the [`RoutingService`] trait; [`DirectionsClient`] talks to a
//! Directions-style HTTP API and [`MockRoutingService`] serves a fixed table.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DirectionsClient, RoutingConfig, next_departure_time};
pub use convert::{candidates_from_response, parse_distance_text};
pub use error::RoutingError;
pub use mock::MockRoutingService;
pub use types::{DirectionsResponse, Leg, Route, TextValue};

use crate::domain::CandidateRoute;

/// Source of driving route alternatives between two addresses.
///
/// This abstraction allows the resolver to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait RoutingService {
    /// Route alternatives from `from` to `to`. An empty list means the
    /// service found no route.
    async fn routes(&self, from: &str, to: &str) -> Result<Vec<CandidateRoute>, RoutingError>;
}
