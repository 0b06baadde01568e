//! Sequencer configuration.

use crate::RouteError;

/// Tunables for [`RouteSequencer`](crate::RouteSequencer).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequencerConfig {
    /// Multiplier applied to free-flow travel time.  `1.0` = empty roads.
    /// Must be finite and `>= 1.0`.
    pub congestion_factor: f64,

    /// Append the final stop to [`RouteResult::route`](crate::RouteResult)
    /// after the last leg.  With `false` the route ends one node short of the
    /// last stop, matching the way the legs are concatenated.
    pub close_route: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self { congestion_factor: 1.0, close_route: true }
    }
}

impl SequencerConfig {
    pub fn with_congestion(congestion_factor: f64) -> Self {
        Self { congestion_factor, ..Self::default() }
    }

    /// Check the congestion factor.
    pub fn validate(&self) -> Result<(), RouteError> {
        let f = self.congestion_factor;
        if f.is_finite() && f >= 1.0 {
            Ok(())
        } else {
            Err(RouteError::InvalidCongestionFactor(f))
        }
    }
}
