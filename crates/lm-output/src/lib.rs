//! `lm-output` — presentation of sequenced routes.
//!
//! A [`RouteReport`] flattens a `RouteResult` into rows with coordinates.
//! From there:
//!
//! | Feature   | Backend     | Files created                                      |
//! |-----------|-------------|----------------------------------------------------|
//! | *(none)*  | CSV         | `route_legs.csv`, `route_points.csv`, `stops.csv`  |
//! | *(none)*  | GeoJSON map | `route.geojson` (via [`write_geojson`])            |
//! | `sqlite`  | SQLite      | `route.db`                                         |
//!
//! Table backends implement [`OutputWriter`].  [`format_summary`] renders the
//! terminal breakdown.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lm_output::{CsvWriter, OutputWriter, RouteReport, write_geojson};
//!
//! let report = RouteReport::new(&result, &stops, &network);
//! CsvWriter::new(Path::new("./output"))?.write_report(&report)?;
//! write_geojson(Path::new("./output/route.geojson"), &report)?;
//! ```

pub mod csv;
pub mod error;
pub mod map;
pub mod report;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use map::{route_map, write_geojson};
pub use report::RouteReport;
pub use row::{LegRow, RoutePointRow, StopRow};
pub use summary::format_summary;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
