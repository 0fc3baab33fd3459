//! Conversion from Directions DTOs to candidate routes.

use crate::domain::{CandidateRoute, DistanceUnit};

use super::error::RoutingError;
use super::types::DirectionsResponse;

/// Parse a rendered distance such as `"12.3 km"`, `"850 m"` or `"1,204 km"`.
pub fn parse_distance_text(text: &str) -> Result<CandidateRoute, RoutingError> {
    let invalid = || RoutingError::InvalidDistance(text.to_string());

    let mut parts = text.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let value: f64 = value.replace(',', "").parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    let unit = DistanceUnit::parse(unit).map_err(|_| invalid())?;

    Ok(CandidateRoute::new(value, unit))
}

/// Extract one candidate per route from a response.
///
/// `ZERO_RESULTS` and `NOT_FOUND` yield an empty list; the caller decides
/// whether that is fatal. A route without a readable distance fails the
/// whole response.
pub fn candidates_from_response(
    response: &DirectionsResponse,
) -> Result<Vec<CandidateRoute>, RoutingError> {
    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Ok(Vec::new()),
        "REQUEST_DENIED" => return Err(RoutingError::Unauthorized),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => return Err(RoutingError::RateLimited),
        other => {
            return Err(RoutingError::Status {
                status: other.to_string(),
                message: response.error_message.clone().unwrap_or_default(),
            });
        }
    }

    response
        .routes
        .iter()
        .enumerate()
        .map(|(idx, route)| {
            let distance = route
                .legs
                .first()
                .and_then(|leg| leg.distance.as_ref())
                .ok_or_else(|| {
                    RoutingError::InvalidDistance(format!("route {idx} has no distance"))
                })?;
            parse_distance_text(&distance.text)
        })
        .collect()
}
