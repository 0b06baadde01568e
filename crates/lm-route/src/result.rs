//! Sequencing output types.

use lm_core::NodeId;

/// Round to two decimal places, halves away from zero.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One driven segment between consecutive stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    /// 1-based position of this leg in the route.
    pub step: usize,
    pub from: NodeId,
    pub to:   NodeId,
    /// Shortest path `from ..= to`.
    pub path: Vec<NodeId>,
    /// Free-flow shortest-path cost in seconds.
    pub raw_secs: f64,
    /// `raw_secs / 60 * congestion_factor`, unrounded.
    pub scaled_mins: f64,
    /// `scaled_mins` rounded to 2 decimals, for display.
    pub est_time_mins: f64,
}

/// A sequenced delivery route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Concatenated leg paths with shared boundary nodes kept once.
    pub route: Vec<NodeId>,
    pub legs: Vec<RouteLeg>,
    /// Sum of the unrounded leg times, rounded to 2 decimals.
    pub total_time_mins: f64,
    /// Stops in visiting order, depot first.
    pub visit_order: Vec<NodeId>,
    pub congestion_factor: f64,
}

impl RouteResult {
    /// Unrounded total of all leg estimates in minutes.
    pub fn exact_total_mins(&self) -> f64 {
        self.legs.iter().map(|l| l.scaled_mins).sum()
    }

    /// Total free-flow time in seconds.
    pub fn raw_total_secs(&self) -> f64 {
        self.legs.iter().map(|l| l.raw_secs).sum()
    }

    /// Position of `stop` in the visiting order (depot = 0), or `None` if the
    /// route never visits it.
    pub fn visit_position(&self, stop: NodeId) -> Option<usize> {
        self.visit_order.iter().position(|&n| n == stop)
    }
}
