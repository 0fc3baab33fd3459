//! CSV report output.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::info;

use crate::domain::ResolvedTripRow;
use crate::error::RulerError;

/// Column headings of the report.
pub const HEADER: [&str; 5] = ["date", "departure", "arrival", "trip", "distance_km"];

/// Write rows as CSV, header first.
pub fn write_report<W: io::Write>(rows: &[ResolvedTripRow], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    for row in rows {
        let distance = row.distance.to_string();
        out.write_record([
            row.date.as_str(),
            row.departure_address.as_str(),
            row.arrival_address.as_str(),
            row.label.as_str(),
            distance.as_str(),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Create (or truncate) the report file and write every row.
pub fn write_report_to_path(rows: &[ResolvedTripRow], path: &Path) -> Result<(), RulerError> {
    let file = File::create(path).map_err(|source| RulerError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    write_report(rows, BufWriter::new(file)).map_err(|source| RulerError::Report {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "Wrote report");
    Ok(())
}
