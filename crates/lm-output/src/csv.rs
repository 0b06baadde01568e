//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `route_legs.csv`
//! - `route_points.csv`
//! - `stops.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LegRow, OutputResult, RoutePointRow, StopRow};

pub const LEG_HEADER:   [&str; 5] = ["step", "from_node", "to_node", "raw_secs", "est_time_mins"];
pub const POINT_HEADER: [&str; 4] = ["seq", "node", "lat", "lon"];
pub const STOP_HEADER:  [&str; 5] = ["label", "node", "visit_order", "lat", "lon"];

/// Writes route output to three CSV files.
pub struct CsvWriter {
    legs:     Writer<File>,
    points:   Writer<File>,
    stops:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut legs = Writer::from_path(dir.join("route_legs.csv"))?;
        legs.write_record(LEG_HEADER)?;

        let mut points = Writer::from_path(dir.join("route_points.csv"))?;
        points.write_record(POINT_HEADER)?;

        let mut stops = Writer::from_path(dir.join("stops.csv"))?;
        stops.write_record(STOP_HEADER)?;

        Ok(Self { legs, points, stops, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_legs(&mut self, rows: &[LegRow]) -> OutputResult<()> {
        for row in rows {
            self.legs.write_record(&[
                row.step.to_string(),
                row.from_node.to_string(),
                row.to_node.to_string(),
                row.raw_secs.to_string(),
                format!("{:.2}", row.est_time_mins),
            ])?;
        }
        Ok(())
    }

    fn write_route_points(&mut self, rows: &[RoutePointRow]) -> OutputResult<()> {
        for row in rows {
            self.points.write_record(&[
                row.seq.to_string(),
                row.node.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()> {
        for row in rows {
            self.stops.write_record(&[
                row.label.to_string(),
                row.node.to_string(),
                row.visit_order.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.legs.flush()?;
        self.points.flush()?;
        self.stops.flush()?;
        Ok(())
    }
}
