//! Plain data row types written by output backends.

/// One leg of the sequenced route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegRow {
    /// 1-based leg number.
    pub step:          u32,
    pub from_node:     u32,
    pub to_node:       u32,
    /// Free-flow shortest-path time in seconds.
    pub raw_secs:      f64,
    /// Congestion-scaled estimate, rounded to 2 decimals.
    pub est_time_mins: f64,
}

/// One vertex of the route polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePointRow {
    /// 0-based position along the route.
    pub seq:  u32,
    pub node: u32,
    pub lat:  f32,
    pub lon:  f32,
}

/// One stop marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRow {
    /// Input-order label shown on the marker; the depot is 0.
    pub label:       u32,
    pub node:        u32,
    /// Position in the visiting order; the depot is 0.
    pub visit_order: u32,
    pub lat:         f32,
    pub lon:         f32,
}

impl StopRow {
    pub fn is_depot(&self) -> bool {
        self.label == 0
    }
}
