//! Shortest-path oracle trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `lm-route` calls routing via the [`Router`] trait, so applications can
//! swap in custom implementations (contraction hierarchies, A*, a remote
//! routing service) without touching the sequencer.
//!
//! # Cost units
//!
//! Edge weights are free-flow travel times in **milliseconds** (u32).  Path
//! totals accumulate in `u64` and are exposed in seconds through
//! [`Route::travel_secs`] and [`Router::cost`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use lm_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the ordered edges from `from` to `to` and
/// the total free-flow travel time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub from: NodeId,
    pub to: NodeId,
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Cumulative travel time in milliseconds.
    pub total_travel_ms: u64,
}

impl Route {
    /// Total travel time in seconds.
    #[inline]
    pub fn travel_secs(&self) -> f64 {
        self.total_travel_ms as f64 / 1000.0
    }

    /// Node sequence from `from` to `to`, both endpoints included.
    ///
    /// A trivial route (`from == to`) yields `[from]`.
    pub fn nodes(&self, network: &RoadNetwork) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        nodes.push(self.from);
        nodes.extend(self.edges.iter().map(|&e| network.segment(e).to));
        nodes
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path oracle.
///
/// For a fixed network the answers must be deterministic: ties between
/// equal-cost paths may resolve either way, but always the same way.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can be shared by
/// batch sequencing across Rayon worker threads.
pub trait Router: Send + Sync {
    /// Compute the shortest route from `from` to `to`.
    ///
    /// `from == to` is an empty route with zero cost.  Returns
    /// [`SpatialError::NoRoute`] when `to` is unreachable and
    /// [`SpatialError::NodeNotFound`] for ids outside the network.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;

    /// Shortest routes from `from` to each of `targets`, in `targets` order.
    ///
    /// Each entry must equal what [`route`](Self::route) returns for the same
    /// pair.  The default simply loops; implementations that can answer
    /// several targets with one search should override it.
    fn route_many(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        targets: &[NodeId],
    ) -> Vec<SpatialResult<Route>> {
        targets.iter().map(|&to| self.route(network, from, to)).collect()
    }

    /// Shortest-path cost in seconds.  Always non-negative.
    fn cost(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<f64> {
        Ok(self.route(network, from, to)?.travel_secs())
    }

    /// Shortest-path node sequence, `from` and `to` inclusive.
    fn path(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Vec<NodeId>> {
        Ok(self.route(network, from, to)?.nodes(network))
    }
}

impl<R: Router + ?Sized> Router for &R {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        (**self).route(network, from, to)
    }

    fn route_many(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        targets: &[NodeId],
    ) -> Vec<SpatialResult<Route>> {
        (**self).route_many(network, from, targets)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the road graph, weighted by
/// [`Segment::travel_ms`](crate::network::Segment::travel_ms).
///
/// [`route_many`](Router::route_many) answers every target with a single
/// search that only stops once all targets are settled.  Predecessor
/// pointers change only on strict improvement and a settled node's pointer
/// is final, so each route is identical to the one-to-one answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        dijkstra(network, from, &[to])
            .pop()
            .unwrap_or(Err(SpatialError::NoRoute { from, to }))
    }

    fn route_many(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        targets: &[NodeId],
    ) -> Vec<SpatialResult<Route>> {
        dijkstra(network, from, targets)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    network: &RoadNetwork,
    from: NodeId,
    targets: &[NodeId],
) -> Vec<SpatialResult<Route>> {
    if !network.contains(from) {
        return targets.iter().map(|_| Err(SpatialError::NodeNotFound(from))).collect();
    }

    let n = network.node_count();
    // dist[v] = best known cost (ms) to reach v.
    let mut dist      = vec![u64::MAX; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    // Targets not yet settled; duplicates and the origin count once.
    let mut pending   = vec![false; n];
    let mut remaining = 0usize;
    for &t in targets {
        if network.contains(t) && t != from && !pending[t.index()] {
            pending[t.index()] = true;
            remaining += 1;
        }
    }

    dist[from.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));
    let mut settled = 0usize;

    while remaining > 0 {
        let Some(Reverse((cost, node))) = heap.pop() else {
            break;
        };

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        settled += 1;

        if pending[node.index()] {
            pending[node.index()] = false;
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for (edge, seg) in network.outgoing(node) {
            let neighbor = seg.to;
            let new_cost = cost.saturating_add(u64::from(seg.travel_ms));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    debug!(%from, targets = targets.len(), settled, "dijkstra search finished");

    targets
        .iter()
        .map(|&to| {
            if !network.contains(to) {
                Err(SpatialError::NodeNotFound(to))
            } else if to == from {
                Ok(Route { from, to, edges: vec![], total_travel_ms: 0 })
            } else if dist[to.index()] == u64::MAX {
                Err(SpatialError::NoRoute { from, to })
            } else {
                Ok(reconstruct(network, &prev_edge, from, to, dist[to.index()]))
            }
        })
        .collect()
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    total_ms: u64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.segment(e).from;
    }
    edges.reverse();
    Route { from, to, edges, total_travel_ms: total_ms }
}
