//! Route map as a GeoJSON `FeatureCollection`.
//!
//! The collection holds one `LineString` for the driven route followed by
//! one `Point` per stop.  An open route of a single one-segment leg has only
//! one point, so it gets no line feature.  Styling uses simplestyle-like property names so
//! common viewers draw the route blue and the depot marker red.
//!
//! Foreign members on the collection describe the initial viewport:
//! `center` (`[lon, lat]` of the depot), `zoom`, and `tiles`.  The `bbox`
//! member holds the fit-bounds box of the route.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::{OutputResult, RouteReport, StopRow};

pub const ROUTE_COLOR:   &str = "#2A81CB";
pub const DEPOT_COLOR:   &str = "red";
pub const STOP_COLOR:    &str = "blue";
pub const DEFAULT_ZOOM:  u8   = 15;
pub const DEFAULT_TILES: &str = "cartodbpositron";

/// Build the map document for `report`.
pub fn route_map(report: &RouteReport) -> FeatureCollection {
    let mut features = Vec::with_capacity(report.stops.len() + 1);
    features.extend(route_feature(report));
    features.extend(report.stops.iter().map(stop_feature));

    let mut foreign = JsonObject::new();
    if let Some(depot) = report.depot() {
        foreign.insert("center".into(), json!(depot.lon_lat()));
    }
    foreign.insert("zoom".into(), json!(DEFAULT_ZOOM));
    foreign.insert("tiles".into(), json!(DEFAULT_TILES));

    FeatureCollection {
        bbox: report.bounds().map(|b| b.to_geojson_bbox()),
        features,
        foreign_members: Some(foreign),
    }
}

/// Write [`route_map`] to `path` as pretty-printed JSON.
pub fn write_geojson(path: &Path, report: &RouteReport) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &route_map(report))?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// `None` when there are fewer than the two positions a `LineString` needs.
fn route_feature(report: &RouteReport) -> Option<Feature> {
    if report.points.len() < 2 {
        return None;
    }
    let coords: Vec<Vec<f64>> = report
        .points
        .iter()
        .map(|p| vec![f64::from(p.lon), f64::from(p.lat)])
        .collect();

    let mut props = JsonObject::new();
    props.insert("kind".into(), json!("route"));
    props.insert("total_time_mins".into(), json!(report.total_time_mins));
    props.insert("congestion_factor".into(), json!(report.congestion_factor));
    props.insert("legs".into(), json!(report.legs.len()));
    props.insert("stroke".into(), json!(ROUTE_COLOR));
    props.insert("stroke-width".into(), json!(5));
    props.insert("stroke-opacity".into(), json!(0.8));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coords))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}

fn stop_feature(stop: &StopRow) -> Feature {
    let (role, color) = if stop.is_depot() {
        ("depot", DEPOT_COLOR)
    } else {
        ("stop", STOP_COLOR)
    };

    let mut props = JsonObject::new();
    props.insert("kind".into(), json!("stop"));
    props.insert("label".into(), json!(stop.label));
    props.insert("visit_order".into(), json!(stop.visit_order));
    props.insert("node".into(), json!(stop.node));
    props.insert("role".into(), json!(role));
    props.insert("marker_color".into(), json!(color));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            f64::from(stop.lon),
            f64::from(stop.lat),
        ]))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}
