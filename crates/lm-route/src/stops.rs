//! Validated stop sets, random sampling, and the stop CSV loader.
//!
//! # CSV format
//!
//! One row per stop; the first row is the depot.  Each row gives either a
//! road-network node id or a coordinate that is snapped to the nearest node.
//!
//! ```csv
//! node,lat,lon
//! 17,,
//! ,12.9352,77.6245
//! 42,,
//! ```
//!
//! Either column group may be omitted from the header entirely.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lm_core::{GeoPoint, NodeId, SampleRng};
use lm_spatial::RoadNetwork;

use crate::{RouteError, StopSetError};

// ── StopSet ───────────────────────────────────────────────────────────────────

/// Ordered, distinct delivery stops; the first element is the depot.
///
/// Constructed only through [`StopSet::new`] (or [`sample`](Self::sample)),
/// which checks that there are at least two stops, that every stop is a node
/// of the network, and that no stop repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StopSet {
    stops: Vec<NodeId>,
}

impl StopSet {
    pub fn new(network: &RoadNetwork, stops: Vec<NodeId>) -> Result<Self, StopSetError> {
        validate(network, &stops)?;
        Ok(Self { stops })
    }

    /// Pick `k` distinct random nodes of `network`.  The first pick is the
    /// depot.
    ///
    /// Fails with [`StopSetError::TooFewStops`] when `k < 2` or the network
    /// has fewer than `k` nodes.
    pub fn sample(
        network: &RoadNetwork,
        k: usize,
        rng: &mut SampleRng,
    ) -> Result<Self, StopSetError> {
        if k < 2 {
            return Err(StopSetError::TooFewStops { got: k });
        }
        if network.node_count() < k {
            return Err(StopSetError::TooFewStops { got: network.node_count() });
        }
        let stops = rng
            .sample_distinct(network.node_count(), k)
            .into_iter()
            .map(|i| NodeId(i as u32))
            .collect();
        Self::new(network, stops)
    }

    /// Re-check this set against a (possibly different) network.
    pub fn validate_for(&self, network: &RoadNetwork) -> Result<(), StopSetError> {
        validate(network, &self.stops)
    }

    pub fn depot(&self) -> NodeId {
        self.stops[0]
    }

    /// Every stop after the depot, in input order.
    pub fn deliveries(&self) -> &[NodeId] {
        &self.stops[1..]
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.stops
    }

    /// Input-order label of `node` (depot = 0).
    pub fn label_of(&self, node: NodeId) -> Option<usize> {
        self.stops.iter().position(|&n| n == node)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`: a valid stop set has at least two stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn validate(network: &RoadNetwork, stops: &[NodeId]) -> Result<(), StopSetError> {
    if stops.len() < 2 {
        return Err(StopSetError::TooFewStops { got: stops.len() });
    }
    let mut seen = HashSet::with_capacity(stops.len());
    for &stop in stops {
        if !network.contains(stop) {
            return Err(StopSetError::UnknownNode(stop));
        }
        if !seen.insert(stop) {
            return Err(StopSetError::DuplicateStop(stop));
        }
    }
    Ok(())
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    #[serde(default)]
    node: Option<u32>,
    #[serde(default)]
    lat:  Option<f32>,
    #[serde(default)]
    lon:  Option<f32>,
}

/// Load a [`StopSet`] from a CSV file (see the module docs for the format).
pub fn load_stops_csv(path: &Path, network: &RoadNetwork) -> Result<StopSet, RouteError> {
    let file = std::fs::File::open(path)?;
    load_stops_reader(file, network)
}

/// Like [`load_stops_csv`] but accepts any `Read` source.
pub fn load_stops_reader<R: Read>(reader: R, network: &RoadNetwork) -> Result<StopSet, RouteError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut stops = Vec::new();

    for (i, result) in csv_reader.deserialize::<StopRecord>().enumerate() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        let line = i + 2; // 1-based, after the header
        let node = match row {
            StopRecord { node: Some(n), .. } => NodeId(n),
            StopRecord { lat: Some(lat), lon: Some(lon), .. } => network
                .snap_to_node(GeoPoint::new(lat, lon))
                .ok_or_else(|| {
                    RouteError::Parse(format!("line {line}: cannot snap to an empty network"))
                })?,
            _ => {
                return Err(RouteError::Parse(format!(
                    "line {line}: expected a `node` id or both `lat` and `lon`"
                )));
            }
        };
        stops.push(node);
    }

    Ok(StopSet::new(network, stops)?)
}
