//! Tests for lm-output.

#[cfg(test)]
mod fixture {
    use lm_core::{GeoPoint, NodeId};
    use lm_route::{RouteSequencer, SequencerConfig, StopSet};
    use lm_spatial::{DijkstraRouter, RoadNetwork, RoadNetworkBuilder};

    use crate::RouteReport;

    /// Line 0 - 1 - 2 - 3, 30 s per segment; stops [0, 3, 1] so the visit
    /// order is 0, 1, 3.
    pub fn report() -> (RouteReport, RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let n: Vec<NodeId> = (0..4)
            .map(|i| b.add_node(GeoPoint::new(12.97 + i as f32 * 0.001, 77.64)))
            .collect();
        for w in n.windows(2) {
            b.add_road(w[0], w[1], 80.0, 30_000);
        }
        let net = b.build();
        let nodes = [n[0], n[1], n[2], n[3]];

        let stops = StopSet::new(&net, vec![n[0], n[3], n[1]]).unwrap();
        let seq = RouteSequencer::new(DijkstraRouter, SequencerConfig::with_congestion(1.0)).unwrap();
        let result = seq.sequence(&net, &stops).unwrap();
        (RouteReport::new(&result, &stops, &net), net, nodes)
    }

    pub fn tmp() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp dir")
    }
}

// ── RouteReport ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use lm_core::GeoPoint;

    #[test]
    fn legs_points_and_stops() {
        let (report, net, [n0, n1, n2, n3]) = super::fixture::report();

        assert_eq!(report.legs.len(), 2);
        assert_eq!((report.legs[0].step, report.legs[0].from_node, report.legs[0].to_node), (1, n0.0, n1.0));
        assert_eq!((report.legs[1].step, report.legs[1].from_node, report.legs[1].to_node), (2, n1.0, n3.0));
        assert_eq!(report.legs[1].raw_secs, 60.0);
        assert_eq!(report.legs[1].est_time_mins, 1.0);
        assert_eq!(report.total_time_mins, 1.5);

        let nodes: Vec<u32> = report.points.iter().map(|p| p.node).collect();
        assert_eq!(nodes, vec![n0.0, n1.0, n2.0, n3.0]);
        let seqs: Vec<u32> = report.points.iter().map(|p| p.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3]);
        assert_eq!(report.points[2].lat, net.position(n2).unwrap().lat);

        // Stops keep input order; visit_order reflects the route.
        let stops: Vec<(u32, u32, u32)> =
            report.stops.iter().map(|s| (s.label, s.node, s.visit_order)).collect();
        assert_eq!(stops, vec![(0, n0.0, 0), (1, n3.0, 2), (2, n1.0, 1)]);
        assert!(report.stops[0].is_depot());
        assert!(!report.stops[1].is_depot());

        assert_eq!(report.depot(), Some(GeoPoint::new(12.97, 77.64)));
    }

    #[test]
    fn bounds_cover_route() {
        let (report, net, [n0, .., n3]) = super::fixture::report();
        let b = report.bounds().unwrap();
        assert_eq!(b.min, net.position(n0).unwrap());
        assert_eq!(b.max, net.position(n3).unwrap());
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = super::fixture::tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("route_legs.csv").exists());
        assert!(dir.path().join("route_points.csv").exists());
        assert!(dir.path().join("stops.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = super::fixture::tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(
            headers(dir.path().join("route_legs.csv")),
            ["step", "from_node", "to_node", "raw_secs", "est_time_mins"]
        );
        assert_eq!(headers(dir.path().join("route_points.csv")), ["seq", "node", "lat", "lon"]);
        assert_eq!(
            headers(dir.path().join("stops.csv")),
            ["label", "node", "visit_order", "lat", "lon"]
        );
    }

    #[test]
    fn csv_report_rows() {
        let (report, _, _) = super::fixture::report();
        let dir = super::fixture::tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_report(&report).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("route_legs.csv")).unwrap();
        let legs: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(legs.len(), 2);
        assert_eq!(&legs[0][0], "1");
        assert_eq!(&legs[0][3], "30");
        assert_eq!(&legs[0][4], "0.50");
        assert_eq!(&legs[1][4], "1.00");

        let mut rdr = csv::Reader::from_path(dir.path().join("route_points.csv")).unwrap();
        assert_eq!(rdr.records().count(), 4);

        let mut rdr = csv::Reader::from_path(dir.path().join("stops.csv")).unwrap();
        let stops: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(stops.len(), 3);
        assert_eq!(&stops[1][0], "1"); // label
        assert_eq!(&stops[1][2], "2"); // visit_order
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = super::fixture::tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_rows_ok() {
        let dir = super::fixture::tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_legs(&[]).unwrap();
        w.write_route_points(&[]).unwrap();
        w.write_stops(&[]).unwrap();
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = super::fixture::tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("route.db").exists());
    }

    #[test]
    fn sqlite_report_rows() {
        let (report, _, [_, _, _, n3]) = super::fixture::report();
        let dir = super::fixture::tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_report(&report).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("route.db")).unwrap();
        assert_eq!(count(&conn, "route_legs"), 2);
        assert_eq!(count(&conn, "route_points"), 4);
        assert_eq!(count(&conn, "stops"), 3);

        let last: i64 = conn
            .query_row("SELECT to_node FROM route_legs WHERE step = 2", [], |r| r.get(0))
            .unwrap();
        assert_eq!(last, i64::from(n3.0));
    }

    #[test]
    fn sqlite_reopen_replaces_rows() {
        let (report, _, _) = super::fixture::report();
        let dir = super::fixture::tmp();
        for _ in 0..2 {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_report(&report).unwrap();
        }
        let conn = rusqlite::Connection::open(dir.path().join("route.db")).unwrap();
        assert_eq!(count(&conn, "route_legs"), 2);
    }
}

// ── GeoJSON map ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod map {
    use geojson::{GeoJson, Value};

    use crate::{route_map, write_geojson};

    #[test]
    fn route_line_then_stop_markers() {
        let (report, net, [n0, .., n3]) = super::fixture::report();
        let fc = route_map(&report);
        assert_eq!(fc.features.len(), 1 + 3);

        let line = fc.features[0].geometry.as_ref().unwrap();
        let Value::LineString(coords) = &line.value else {
            panic!("expected LineString, got {:?}", line.value);
        };
        assert_eq!(coords.len(), 4);
        let start = net.position(n0).unwrap();
        assert_eq!(coords[0], vec![f64::from(start.lon), f64::from(start.lat)]);
        let end = net.position(n3).unwrap();
        assert_eq!(coords[3], vec![f64::from(end.lon), f64::from(end.lat)]);
        assert_eq!(fc.features[0].property("stroke").unwrap(), "#2A81CB");
    }

    #[test]
    fn marker_labels_and_colours() {
        let (report, _, _) = super::fixture::report();
        let fc = route_map(&report);
        let markers = &fc.features[1..];

        let labels: Vec<u64> = markers
            .iter()
            .map(|f| f.property("label").unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(labels, vec![0, 1, 2]);

        assert_eq!(markers[0].property("marker_color").unwrap(), "red");
        assert_eq!(markers[0].property("role").unwrap(), "depot");
        for m in &markers[1..] {
            assert_eq!(m.property("marker_color").unwrap(), "blue");
            assert_eq!(m.property("role").unwrap(), "stop");
        }
        assert_eq!(markers[1].property("visit_order").unwrap(), 2);
        assert!(matches!(
            markers[0].geometry.as_ref().unwrap().value,
            Value::Point(_)
        ));
    }

    #[test]
    fn viewport_members() {
        let (report, _, _) = super::fixture::report();
        let fc = route_map(&report);
        let depot = report.depot().unwrap();

        let bbox = fc.bbox.as_ref().unwrap();
        assert_eq!(bbox.len(), 4);
        assert!(bbox[0] <= bbox[2] && bbox[1] <= bbox[3]);

        let foreign = fc.foreign_members.as_ref().unwrap();
        assert_eq!(foreign["center"], serde_json::json!(depot.lon_lat()));
        assert_eq!(foreign["zoom"], 15);
    }

    #[test]
    fn open_single_segment_route_has_no_line() {
        use lm_core::GeoPoint;
        use lm_route::{RouteSequencer, SequencerConfig, StopSet};
        use lm_spatial::{DijkstraRouter, RoadNetworkBuilder};

        use crate::RouteReport;

        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(12.97, 77.64));
        let c = b.add_node(GeoPoint::new(12.971, 77.64));
        b.add_road(a, c, 110.0, 40_000);
        let net = b.build();

        let stops = StopSet::new(&net, vec![a, c]).unwrap();
        let config = SequencerConfig { congestion_factor: 1.0, close_route: false };
        let result = RouteSequencer::new(DijkstraRouter, config)
            .unwrap()
            .sequence(&net, &stops)
            .unwrap();
        let report = RouteReport::new(&result, &stops, &net);
        assert_eq!(report.points.len(), 1);

        let fc = route_map(&report);
        assert_eq!(fc.features.len(), 2);
        for f in &fc.features {
            assert!(matches!(f.geometry.as_ref().unwrap().value, Value::Point(_)));
        }
        let nodes: Vec<u64> = fc
            .features
            .iter()
            .map(|f| f.property("node").unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(nodes, vec![u64::from(a.0), u64::from(c.0)]);
    }

    #[test]
    fn written_file_parses_back() {
        let (report, _, _) = super::fixture::report();
        let dir = super::fixture::tmp();
        let path = dir.path().join("route.geojson");
        write_geojson(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        match text.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 4),
            other => panic!("expected FeatureCollection, got {other:?}"),
        }
    }
}

// ── Terminal summary ──────────────────────────────────────────────────────────

#[cfg(test)]
mod summary {
    use crate::format_summary;

    #[test]
    fn total_and_steps() {
        let (report, _, [n0, n1, _, n3]) = super::fixture::report();
        let text = format_summary(&report);
        assert!(text.starts_with("Total travel time: 1.50 mins (congestion x1.00)"), "{text}");
        assert!(text.contains("Est. Time (min)"));
        assert!(text.contains(&format!("{} → {}", n0.0, n1.0)));
        assert!(text.contains(&format!("{} → {}", n1.0, n3.0)));
        assert!(text.contains("0.50"));
        assert_eq!(text.lines().count(), 3 + report.legs.len());
    }
}
