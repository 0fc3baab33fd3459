//! Trip ruler.
//!
//! Turns a plain-text travel log into a mileage report: each trip line is
//! resolved to two addresses, measured with a routing service (once per
//! named route, then cached), and written out as a CSV row.

pub mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod report;
pub mod routing;
pub mod run;
pub mod triplog;
