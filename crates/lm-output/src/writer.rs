//! The `OutputWriter` trait implemented by all table backends.

use crate::{LegRow, OutputResult, RouteReport, RoutePointRow, StopRow};

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    /// Write the per-leg breakdown.
    fn write_legs(&mut self, rows: &[LegRow]) -> OutputResult<()>;

    /// Write the route polyline, one row per node.
    fn write_route_points(&mut self, rows: &[RoutePointRow]) -> OutputResult<()>;

    /// Write the stop markers.
    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every table of `report`, then [`finish`](Self::finish).
    fn write_report(&mut self, report: &RouteReport) -> OutputResult<()> {
        self.write_legs(&report.legs)?;
        self.write_route_points(&report.points)?;
        self.write_stops(&report.stops)?;
        self.finish()
    }
}
