//! Trip log parsing and resolution.
//!
//! A trip log is a plain text file:
//!
//! ```text
//! # January
//! 3/1/2024
//! home = Home
//! -> Head_Office
//! -> Client_Site
//! ->
//! 4
//! Home > Gym
//! ```
//!
//! Date lines set the current date (a bare day keeps the month and year),
//! `home =` lines set the location used for elided trip ends, and every
//! other non-comment line is a trip.

mod error;
mod line;
mod resolver;


pub use error::{ErrorCategory, TripLogError, TripSide};
pub use line::{LogLine, strip_whitespace};
pub use resolver::{RunningContext, TripResolver, resolve_log};
