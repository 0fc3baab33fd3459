//! Trip log resolution.
//!
//! Reads a log one line at a time, keeping track of the current date, the
//! home location, and where the previous trip ended. Each trip line becomes
//! a report row with both addresses and a driving distance.
//!
//! Elided sides are inferred:
//! - departure: the previous trip's arrival (since the last date line),
//!   otherwise home
//! - arrival: home
//!
//! The first error aborts the whole log; no rows are returned in that case.

use tracing::debug;

use crate::cache::{CachedRouter, DistanceLookupError};
use crate::directory::AddressDirectory;
use crate::domain::{CalendarDate, LocationName, ResolvedTripRow, Trip};
use crate::routing::RoutingService;

use super::error::{TripLogError, TripSide};
use super::line::LogLine;

/// State threaded through a log.
#[derive(Debug, Clone, Default)]
pub struct RunningContext {
    date: CalendarDate,
    home: Option<LocationName>,
    /// Arrival of the previous trip, reset by date lines.
    pending_departure: Option<LocationName>,
    /// Lines read so far.
    line: usize,
    /// Trip lines read so far.
    trips: usize,
}

impl RunningContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines read so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of trip lines read so far.
    pub fn trips(&self) -> usize {
        self.trips
    }

    /// Fill in elided sides of a trip line and check the ends differ.
    pub fn resolve_trip(
        &self,
        departure: Option<LocationName>,
        arrival: Option<LocationName>,
        line: usize,
    ) -> Result<Trip, TripLogError> {
        let departure = departure
            .or_else(|| self.pending_departure.clone())
            .or_else(|| self.home.clone())
            .ok_or(TripLogError::IncorrectDeparture { line })?;

        let arrival = arrival
            .or_else(|| self.home.clone())
            .ok_or(TripLogError::IncorrectArrival { line })?;

        Trip::new(departure, arrival)
            .map_err(|e| TripLogError::SameDepartureAndArrival { name: e.0, line })
    }
}

/// Resolves trip log lines against an address directory and a cached router.
pub struct TripResolver<'a, R> {
    directory: &'a AddressDirectory,
    router: &'a mut CachedRouter<R>,
    context: RunningContext,
}

impl<'a, R: RoutingService> TripResolver<'a, R> {
    pub fn new(directory: &'a AddressDirectory, router: &'a mut CachedRouter<R>) -> Self {
        Self {
            directory,
            router,
            context: RunningContext::new(),
        }
    }

    pub fn context(&self) -> &RunningContext {
        &self.context
    }

    /// Process the next line of the log.
    ///
    /// Returns the resolved row for trip lines and `None` for every other kind.
    pub async fn process_line(
        &mut self,
        raw: &str,
    ) -> Result<Option<ResolvedTripRow>, TripLogError> {
        self.context.line += 1;
        let line = self.context.line;

        match LogLine::classify(raw) {
            LogLine::Date(date) => {
                self.context
                    .date
                    .apply(&date)
                    .map_err(|_| TripLogError::IncorrectDate { line })?;
                self.context.pending_departure = None;
                debug!(line, date = %self.context.date, "date changed");
                Ok(None)
            }
            LogLine::Home(name) => {
                if !self.directory.contains(&name) {
                    return Err(TripLogError::UnknownHome { name, line });
                }
                debug!(line, home = %name, "home changed");
                self.context.home = Some(name);
                Ok(None)
            }
            LogLine::Trip { departure, arrival } => {
                let row = self.process_trip(departure, arrival, line).await?;
                Ok(Some(row))
            }
            LogLine::Skip => Ok(None),
            LogLine::Invalid => Err(TripLogError::UnknownLineFormat { line }),
        }
    }

    async fn process_trip(
        &mut self,
        departure: Option<LocationName>,
        arrival: Option<LocationName>,
        line: usize,
    ) -> Result<ResolvedTripRow, TripLogError> {
        self.context.trips += 1;
        let position = self.context.trips;

        let date = self
            .context
            .date
            .formatted()
            .ok_or(TripLogError::IncompleteDate { line })?;

        let trip = self.context.resolve_trip(departure, arrival, line)?;

        let directory = self.directory;
        let departure_address = lookup(directory, &trip.departure, TripSide::Departure, line)?;
        let arrival_address = lookup(directory, &trip.arrival, TripSide::Arrival, line)?;

        let key = trip.key();
        let distance = self
            .router
            .distance(&key, departure_address, arrival_address)
            .await
            .map_err(|e| match e {
                DistanceLookupError::NoRoute => TripLogError::NoRoute {
                    trip: key.clone(),
                    line,
                },
                DistanceLookupError::Routing(source) => TripLogError::Routing {
                    trip: key.clone(),
                    line,
                    source,
                },
            })?;

        debug!(line, position, trip = %key, distance = %distance, "resolved trip");

        let row = ResolvedTripRow {
            position,
            date,
            departure_address: departure_address.to_string(),
            arrival_address: arrival_address.to_string(),
            label: trip.label(),
            distance,
        };

        self.context.pending_departure = Some(trip.arrival);
        Ok(row)
    }
}

fn lookup<'d>(
    directory: &'d AddressDirectory,
    name: &LocationName,
    side: TripSide,
    line: usize,
) -> Result<&'d str, TripLogError> {
    directory
        .address(name)
        .ok_or_else(|| TripLogError::UnknownAddress {
            side,
            name: name.clone(),
            line,
        })
}

/// Resolve a whole log, returning one row per trip line in log order.
pub async fn resolve_log<R: RoutingService>(
    log: &str,
    directory: &AddressDirectory,
    router: &mut CachedRouter<R>,
) -> Result<Vec<ResolvedTripRow>, TripLogError> {
    let mut resolver = TripResolver::new(directory, router);
    let mut rows = Vec::new();

    for raw in log.lines() {
        if let Some(row) = resolver.process_line(raw).await? {
            rows.push(row);
        }
    }

    debug!(
        lines = resolver.context().line(),
        trips = resolver.context().trips(),
        "log resolved"
    );
    Ok(rows)
}
