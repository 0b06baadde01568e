//! `RouteReport` — flattens a `RouteResult` into output rows.

use lm_core::{BoundingBox, GeoPoint};
use lm_route::{RouteResult, StopSet};
use lm_spatial::RoadNetwork;

use crate::row::{LegRow, RoutePointRow, StopRow};

/// Everything the writers and the map need, resolved to coordinates.
///
/// Build once per sequenced route with [`RouteReport::new`], then hand it to
/// any [`OutputWriter`](crate::OutputWriter), [`route_map`](crate::route_map),
/// or [`format_summary`](crate::format_summary).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub legs:              Vec<LegRow>,
    pub points:            Vec<RoutePointRow>,
    /// In input order, depot first.
    pub stops:             Vec<StopRow>,
    pub total_time_mins:   f64,
    pub congestion_factor: f64,
}

impl RouteReport {
    /// Resolve `result` against the network it was sequenced on.
    ///
    /// Nodes missing from `network` are skipped.
    pub fn new(result: &RouteResult, stops: &StopSet, network: &RoadNetwork) -> Self {
        let legs = result
            .legs
            .iter()
            .map(|leg| LegRow {
                step:          leg.step as u32,
                from_node:     leg.from.0,
                to_node:       leg.to.0,
                raw_secs:      leg.raw_secs,
                est_time_mins: leg.est_time_mins,
            })
            .collect();

        let points = result
            .route
            .iter()
            .filter_map(|&node| network.position(node).map(|p| (node, p)))
            .enumerate()
            .map(|(seq, (node, p))| RoutePointRow {
                seq:  seq as u32,
                node: node.0,
                lat:  p.lat,
                lon:  p.lon,
            })
            .collect();

        let stops = stops
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(|(label, &node)| {
                let p = network.position(node)?;
                let visit_order = result.visit_position(node)?;
                Some(StopRow {
                    label:       label as u32,
                    node:        node.0,
                    visit_order: visit_order as u32,
                    lat:         p.lat,
                    lon:         p.lon,
                })
            })
            .collect();

        Self {
            legs,
            points,
            stops,
            total_time_mins:   result.total_time_mins,
            congestion_factor: result.congestion_factor,
        }
    }

    /// The depot's position, used as the map centre.
    pub fn depot(&self) -> Option<GeoPoint> {
        self.stops
            .iter()
            .find(|s| s.is_depot())
            .map(|s| GeoPoint::new(s.lat, s.lon))
    }

    /// Bounds of the route polyline, or of the stops if the polyline is
    /// empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.points.iter().map(|p| GeoPoint::new(p.lat, p.lon)))
            .or_else(|| BoundingBox::enclosing(self.stops.iter().map(|s| GeoPoint::new(s.lat, s.lon))))
    }
}
