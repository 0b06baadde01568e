//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use lm_spatial::{osm::load_from_pbf, SpeedProfile};
//!
//! let network = load_from_pbf(Path::new("koramangala-bangalore.osm.pbf"), &SpeedProfile::default())?;
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways (see [`is_drivable`]).  Edge speed is
//! the way's `maxspeed` when it parses, else the [`SpeedProfile`] class
//! speed.  One-way rules follow [`Oneway::from_tags`].
//!
//! Node ids are assigned in ascending OSM id order, so the same extract
//! always produces the same `NodeId`s.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use lm_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::speed::{Oneway, SpeedProfile, is_drivable, tag, travel_ms};
use crate::SpatialError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a drivable road network from an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on parse errors and
/// [`SpatialError::Io`] when the file cannot be opened.
pub fn load_from_pbf(path: &Path, profile: &SpeedProfile) -> Result<RoadNetwork, SpatialError> {
    let file = std::fs::File::open(path)?;
    let reader = ElementReader::new(std::io::BufReader::new(file));

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();
    let mut skipped_ways = 0usize;

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                match OsmWay::drivable(w.refs().collect(), &tags, profile) {
                    Some(way) => road_ways.push(way),
                    None => skipped_ways += 1,
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    debug!(ways = road_ways.len(), skipped_ways, "collected drivable ways");

    let network = assemble(&all_nodes, &road_ways);
    info!(
        path = %path.display(),
        nodes = network.node_count(),
        edges = network.edge_count(),
        "imported OSM road network"
    );
    Ok(network)
}

/// Turn drivable ways into a network.  Ways may reference nodes missing from
/// `all_nodes` (clipped extracts); segments touching them are dropped.
pub(crate) fn assemble(all_nodes: &FxHashMap<i64, GeoPoint>, ways: &[OsmWay]) -> RoadNetwork {
    // Sorted, de-duplicated road node ids give a stable NodeId assignment.
    let mut road_node_ids: Vec<i64> = ways.iter().flat_map(|w| w.refs.iter().copied()).collect();
    road_node_ids.sort_unstable();
    road_node_ids.dedup();

    let mut builder =
        RoadNetworkBuilder::with_capacity(road_node_ids.len(), road_node_ids.len() * 2);
    let mut osm_to_lm: FxHashMap<i64, NodeId> = FxHashMap::default();
    osm_to_lm.reserve(road_node_ids.len());

    for osm_id in &road_node_ids {
        if let Some(&pos) = all_nodes.get(osm_id) {
            osm_to_lm.insert(*osm_id, builder.add_node(pos));
        }
    }

    for way in ways {
        for window in way.refs.windows(2) {
            let (Some(&a), Some(&b)) = (osm_to_lm.get(&window[0]), osm_to_lm.get(&window[1]))
            else {
                continue;
            };
            if a == b {
                continue;
            }
            let len_m = builder.node_pos(a).distance_m(builder.node_pos(b));
            let ms = travel_ms(len_m, way.speed_kmh);

            if way.oneway.forward() {
                builder.add_directed_edge(a, b, len_m, ms);
            }
            if way.oneway.backward() {
                builder.add_directed_edge(b, a, len_m, ms);
            }
        }
    }

    builder.build()
}

// ── Internal types ────────────────────────────────────────────────────────────

pub(crate) struct OsmWay {
    refs:      Vec<i64>,
    speed_kmh: f32,
    oneway:    Oneway,
}

impl OsmWay {
    /// `None` unless the tags describe a car-drivable `highway=*` way.
    pub(crate) fn drivable(
        refs: Vec<i64>,
        tags: &[(&str, &str)],
        profile: &SpeedProfile,
    ) -> Option<Self> {
        let highway = tag(tags, "highway")?;
        if !is_drivable(highway, tags) {
            return None;
        }
        Some(Self {
            refs,
            speed_kmh: profile.edge_speed_kmh(highway, tag(tags, "maxspeed")),
            oneway:    Oneway::from_tags(highway, tags),
        })
    }
}
