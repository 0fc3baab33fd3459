//! Directions API response DTOs.
//!
//! These types map to the JSON returned by a Directions-style endpoint.
//! Only the fields needed to read route distances are modelled; unknown
//! fields are ignored.

use serde::Deserialize;

/// Top-level response from the `directions/json` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...
    pub status: String,

    /// Route alternatives. Empty unless status is `OK`.
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Explanation accompanying a non-`OK` status.
    pub error_message: Option<String>,
}

/// One route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Short description of the roads taken.
    pub summary: Option<String>,

    /// Legs of the route. A route without waypoints has exactly one.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// A leg between two consecutive waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// A quantity with its human-readable rendering, e.g. `{"text": "12.3 km", "value": 12345}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}
