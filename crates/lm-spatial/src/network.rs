//! The street graph a delivery route is planned over.
//!
//! Nodes are junctions (and therefore stop candidates); edges are directed
//! street segments weighted by free-flow travel time.  Segments are grouped
//! by tail node, so the outgoing segments of node `n` are
//!
//! ```text
//! segments[ offsets[n] .. offsets[n + 1] ]
//! ```
//!
//! and a segment's `EdgeId` is its position in that array.  Stop coordinates
//! from a CSV file are snapped to the closest junction through an R-tree.

use rstar::RTree;
use rstar::primitives::GeomWithData;
use tracing::debug;

use lm_core::{EdgeId, GeoPoint, NodeId};

/// `[lat, lon]` keyed by the junction it belongs to.
type Junction = GeomWithData<[f32; 2], NodeId>;

// ── Segment ───────────────────────────────────────────────────────────────────

/// One directed street segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from:      NodeId,
    pub to:        NodeId,
    pub length_m:  f32,
    /// Free-flow cost used by the shortest-path search.
    pub travel_ms: u32,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Read-only street graph for one place.
///
/// Built once by [`RoadNetworkBuilder`] and handed out as
/// `Arc<RoadNetwork>` by the graph cache.
pub struct RoadNetwork {
    points:    Vec<GeoPoint>,
    /// Length `node_count + 1`; monotone.
    offsets:   Vec<u32>,
    segments:  Vec<Segment>,
    junctions: RTree<Junction>,
}

impl RoadNetwork {
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every junction id, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.points.len()).map(|i| NodeId(i as u32))
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.points.len()
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.points.get(node.index()).copied()
    }

    /// Coordinates along a node path, e.g. a route polyline.  Ids outside
    /// the network are skipped.
    pub fn positions(&self, nodes: &[NodeId]) -> Vec<GeoPoint> {
        nodes.iter().filter_map(|&n| self.position(n)).collect()
    }

    /// Panics if `edge` was not issued by this network.
    #[inline]
    pub fn segment(&self, edge: EdgeId) -> &Segment {
        &self.segments[edge.index()]
    }

    /// Segments leaving `node`, with their ids.
    #[inline]
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &Segment)> + '_ {
        let start = self.offsets[node.index()] as usize;
        let end   = self.offsets[node.index() + 1] as usize;
        (start..end)
            .zip(&self.segments[start..end])
            .map(|(i, seg)| (EdgeId(i as u32), seg))
    }

    /// Closest junction to `pos` (planar lat/lon distance, fine at
    /// neighbourhood scale).  `None` only for an empty network.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.junctions
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|j| j.data)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Collects junctions and segments, then freezes them with
/// [`build`](Self::build).
///
/// ```
/// use lm_core::GeoPoint;
/// use lm_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let depot = b.add_node(GeoPoint::new(12.971, 77.641));
/// let stop = b.add_node(GeoPoint::new(12.975, 77.640));
/// b.add_road(depot, stop, 450.0, 162_000); // 450 m at 10 km/h
/// let net = b.build();
/// assert_eq!(net.outgoing(depot).count(), 1);
/// assert_eq!(net.edge_count(), 2);
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    points:   Vec<GeoPoint>,
    segments: Vec<Segment>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, segments: usize) -> Self {
        Self {
            points:   Vec::with_capacity(nodes),
            segments: Vec::with_capacity(segments),
        }
    }

    /// Ids are handed out sequentially from 0.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.points.len() as u32);
        self.points.push(pos);
        id
    }

    /// One-way segment `from → to`.  Both ends must already be added.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f32, travel_ms: u32) {
        debug_assert!(from.index() < self.points.len() && to.index() < self.points.len());
        self.segments.push(Segment { from, to, length_m, travel_ms });
    }

    /// Two-way street: one segment each way with the same cost.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f32, travel_ms: u32) {
        self.add_directed_edge(a, b, length_m, travel_ms);
        self.add_directed_edge(b, a, length_m, travel_ms);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.points[id.index()]
    }

    pub fn build(self) -> RoadNetwork {
        let Self { points, mut segments } = self;

        // Stable, so parallel segments keep insertion order and ties in the
        // search resolve the same way on every build.
        segments.sort_by_key(|s| s.from.0);
        let offsets: Vec<u32> = (0..=points.len())
            .map(|n| segments.partition_point(|s| s.from.index() < n) as u32)
            .collect();

        let junctions = RTree::bulk_load(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| Junction::new([p.lat, p.lon], NodeId(i as u32)))
                .collect(),
        );

        debug!(nodes = points.len(), segments = segments.len(), "built road network");

        RoadNetwork { points, offsets, segments, junctions }
    }
}
