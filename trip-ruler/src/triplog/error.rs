//! Trip log error types.
//!
//! Every error carries the 1-based number of the line that caused it.

use std::fmt;

use crate::domain::{LocationName, TripKey};
use crate::routing::RoutingError;

/// Which end of a trip an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripSide {
    Departure,
    Arrival,
}

impl fmt::Display for TripSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripSide::Departure => f.write_str("departure"),
            TripSide::Arrival => f.write_str("arrival"),
        }
    }
}

/// Broad class of a trip log failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The line matches no known format
    Syntax,
    /// The line is well-formed but inconsistent with the log so far
    Semantic,
    /// The routing service could not provide a distance
    Routing,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Syntax => f.write_str("syntax"),
            ErrorCategory::Semantic => f.write_str("semantic"),
            ErrorCategory::Routing => f.write_str("routing"),
        }
    }
}

/// Errors raised while resolving a trip log.
#[derive(Debug, thiserror::Error)]
pub enum TripLogError {
    #[error("unknown line format (line {line})")]
    UnknownLineFormat { line: usize },

    #[error("a complete date (ex: 31/12/1970) must be set before the first trip (line {line})")]
    IncompleteDate { line: usize },

    #[error("incorrect date, a month must be followed by a year (line {line})")]
    IncorrectDate { line: usize },

    #[error("unknown address for home {name} (line {line})")]
    UnknownHome { name: LocationName, line: usize },

    #[error("incorrect departure, no previous arrival or home to leave from (line {line})")]
    IncorrectDeparture { line: usize },

    #[error("incorrect arrival, no home to return to (line {line})")]
    IncorrectArrival { line: usize },

    #[error("the departure and the arrival cannot be the same: {name} (line {line})")]
    SameDepartureAndArrival { name: LocationName, line: usize },

    #[error("address of {side} {name} is unknown (line {line})")]
    UnknownAddress {
        side: TripSide,
        name: LocationName,
        line: usize,
    },

    #[error("the routing service couldn't calculate the distance of {trip} (line {line})")]
    NoRoute { trip: TripKey, line: usize },

    #[error("routing {trip} failed: {source} (line {line})")]
    Routing {
        trip: TripKey,
        line: usize,
        source: RoutingError,
    },
}

impl TripLogError {
    /// The 1-based line the error occurred on.
    pub fn line(&self) -> usize {
        match self {
            TripLogError::UnknownLineFormat { line }
            | TripLogError::IncompleteDate { line }
            | TripLogError::IncorrectDate { line }
            | TripLogError::UnknownHome { line, .. }
            | TripLogError::IncorrectDeparture { line }
            | TripLogError::IncorrectArrival { line }
            | TripLogError::SameDepartureAndArrival { line, .. }
            | TripLogError::UnknownAddress { line, .. }
            | TripLogError::NoRoute { line, .. }
            | TripLogError::Routing { line, .. } => *line,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TripLogError::UnknownLineFormat { .. } => ErrorCategory::Syntax,
            TripLogError::NoRoute { .. } | TripLogError::Routing { .. } => ErrorCategory::Routing,
            _ => ErrorCategory::Semantic,
        }
    }
}
