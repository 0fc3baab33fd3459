//! Domain types for the trip ruler.
//!
//! This module contains the validated building blocks of a trip log:
//! location names, dates, trips with their cache keys, and distances.
//! Types enforce their invariants at construction time.

mod date;
mod distance;
mod name;
mod trip;

pub use date::{CalendarDate, DateLine, MonthWithoutYear};
pub use distance::{CandidateRoute, Distance, DistanceUnit, InvalidDistanceUnit, UnitConvention};
pub use name::{InvalidLocationName, LocationName};
pub use trip::{ResolvedTripRow, SameEndpoints, Trip, TripKey};
