//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `route.db` file in the configured output directory with
//! three tables: `route_legs`, `route_points`, and `stops`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{LegRow, OutputResult, RoutePointRow, StopRow};

/// Writes route output to an SQLite database.
///
/// Each run replaces the previous contents of the tables.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `route.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("route.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS route_legs (
                 step          INTEGER PRIMARY KEY,
                 from_node     INTEGER NOT NULL,
                 to_node       INTEGER NOT NULL,
                 raw_secs      REAL    NOT NULL,
                 est_time_mins REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS route_points (
                 seq  INTEGER PRIMARY KEY,
                 node INTEGER NOT NULL,
                 lat  REAL    NOT NULL,
                 lon  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS stops (
                 label       INTEGER PRIMARY KEY,
                 node        INTEGER NOT NULL,
                 visit_order INTEGER NOT NULL,
                 lat         REAL    NOT NULL,
                 lon         REAL    NOT NULL
             );
             DELETE FROM route_legs;
             DELETE FROM route_points;
             DELETE FROM stops;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_legs(&mut self, rows: &[LegRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO route_legs (step, from_node, to_node, raw_secs, est_time_mins) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.step,
                    row.from_node,
                    row.to_node,
                    row.raw_secs,
                    row.est_time_mins,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_route_points(&mut self, rows: &[RoutePointRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO route_points (seq, node, lat, lon) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq,
                    row.node,
                    f64::from(row.lat),
                    f64::from(row.lon),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO stops (label, node, visit_order, lat, lon) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.label,
                    row.node,
                    row.visit_order,
                    f64::from(row.lat),
                    f64::from(row.lon),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
