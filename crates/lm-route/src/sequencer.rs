//! Greedy nearest-neighbour route construction.

use tracing::{debug, info, warn};

use lm_core::NodeId;
use lm_spatial::{RoadNetwork, Route, Router};

use crate::observer::{NoopObserver, SequenceObserver};
use crate::result::{RouteLeg, RouteResult, round2};
use crate::{RouteError, SequenceResult, SequencerConfig, StopSet};

// ── RouteSequencer ────────────────────────────────────────────────────────────

/// Orders delivery stops with the nearest-neighbour heuristic.
///
/// Starting at the depot, each step runs one search from the current
/// position to every unvisited stop and drives to the cheapest one.  Ties go
/// to the stop listed first in the input.  The path and cost of the winner
/// come from the same search, so nothing is recomputed.
///
/// The result is a good, fast visiting order, not an optimal tour.
///
/// A sequencer holds no per-run state; one instance can serve any number of
/// networks and stop sets, concurrently if `R` allows.
pub struct RouteSequencer<R: Router> {
    router: R,
    config: SequencerConfig,
}

impl<R: Router> RouteSequencer<R> {
    /// # Errors
    ///
    /// [`RouteError::InvalidCongestionFactor`] when the factor is not finite
    /// or below `1.0`.
    pub fn new(router: R, config: SequencerConfig) -> SequenceResult<Self> {
        config.validate()?;
        Ok(Self { router, config })
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Sequence `stops` over `network`.
    pub fn sequence(&self, network: &RoadNetwork, stops: &StopSet) -> SequenceResult<RouteResult> {
        self.sequence_with(network, stops, &mut NoopObserver)
    }

    /// Validate raw node ids into a [`StopSet`], then sequence it.
    ///
    /// Validation failures are reported before any shortest-path search.
    pub fn sequence_nodes(
        &self,
        network: &RoadNetwork,
        stops: &[NodeId],
    ) -> SequenceResult<RouteResult> {
        let stops = StopSet::new(network, stops.to_vec())?;
        self.sequence(network, &stops)
    }

    /// Sequence `stops`, reporting progress to `observer` and stopping early
    /// if it asks to.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidStopSet`] if `stops` does not fit `network`.
    /// - [`RouteError::Unreachable`] if any remaining stop cannot be reached
    ///   from the current position.
    /// - [`RouteError::Cancelled`] if the observer stopped the run.
    ///
    /// No partial result is returned on failure.
    pub fn sequence_with<O: SequenceObserver + ?Sized>(
        &self,
        network: &RoadNetwork,
        stops: &StopSet,
        observer: &mut O,
    ) -> SequenceResult<RouteResult> {
        stops.validate_for(network)?;
        let factor = self.config.congestion_factor;
        info!(stops = stops.len(), congestion_factor = factor, "sequencing route");
        observer.on_start(stops);

        let mut current = stops.depot();
        let mut unvisited: Vec<NodeId> = stops.deliveries().to_vec();
        let mut route: Vec<NodeId> = Vec::new();
        let mut legs: Vec<RouteLeg> = Vec::with_capacity(unvisited.len());
        let mut visit_order: Vec<NodeId> = Vec::with_capacity(stops.len());
        let mut total_mins = 0.0;
        visit_order.push(current);

        while !unvisited.is_empty() {
            if observer.should_stop() {
                warn!(completed_legs = legs.len(), "sequencing cancelled");
                return Err(RouteError::Cancelled { completed_legs: legs.len() });
            }

            let (idx, winner) = self.nearest(network, current, &unvisited)?;
            let next = unvisited.remove(idx);

            let path = winner.nodes(network);
            if let Some((_, head)) = path.split_last() {
                route.extend_from_slice(head);
            }

            let raw_secs = winner.travel_secs();
            let scaled_mins = raw_secs / 60.0 * factor;
            total_mins += scaled_mins;

            let leg = RouteLeg {
                step: legs.len() + 1,
                from: current,
                to: next,
                path,
                raw_secs,
                scaled_mins,
                est_time_mins: round2(scaled_mins),
            };
            debug!(
                step = leg.step,
                from = %leg.from,
                to = %leg.to,
                raw_secs,
                est_time_mins = leg.est_time_mins,
                "leg chosen"
            );
            observer.on_leg(&leg);
            legs.push(leg);

            visit_order.push(next);
            current = next;
        }

        if self.config.close_route {
            route.push(current);
        }

        let result = RouteResult {
            route,
            legs,
            total_time_mins: round2(total_mins),
            visit_order,
            congestion_factor: factor,
        };
        info!(
            legs = result.legs.len(),
            total_time_mins = result.total_time_mins,
            "route sequenced"
        );
        observer.on_finish(&result);
        Ok(result)
    }

    /// Index into `unvisited` and route of the cheapest candidate from
    /// `current`.  The first candidate wins ties.
    fn nearest(
        &self,
        network: &RoadNetwork,
        current: NodeId,
        unvisited: &[NodeId],
    ) -> SequenceResult<(usize, Route)> {
        let candidates = self.router.route_many(network, current, unvisited);
        let mut best: Option<(usize, Route)> = None;

        for (i, (result, &to)) in candidates.into_iter().zip(unvisited).enumerate() {
            let route = result.map_err(|e| {
                warn!(from = %current, to = %to, "candidate stop unreachable");
                match RouteError::from(e) {
                    RouteError::Unreachable { .. } => RouteError::Unreachable { from: current, to },
                    other => other,
                }
            })?;
            let better = match &best {
                None => true,
                Some((_, b)) => route.total_travel_ms < b.total_travel_ms,
            };
            if better {
                best = Some((i, route));
            }
        }

        best.ok_or(RouteError::Unreachable { from: current, to: unvisited[0] })
    }

    /// Sequence several independent stop sets over the same network.
    ///
    /// Results are in `batch` order and identical to calling
    /// [`sequence`](Self::sequence) on each set.  With the `parallel` feature
    /// the sets are processed on the Rayon thread pool.
    pub fn sequence_batch(
        &self,
        network: &RoadNetwork,
        batch: &[StopSet],
    ) -> Vec<SequenceResult<RouteResult>> {
        self.sequence_batch_with(network, batch, || NoopObserver)
    }

    /// [`sequence_batch`](Self::sequence_batch) with a fresh observer from
    /// `make_observer` for every set.
    pub fn sequence_batch_with<F, O>(
        &self,
        network: &RoadNetwork,
        batch: &[StopSet],
        make_observer: F,
    ) -> Vec<SequenceResult<RouteResult>>
    where
        F: Fn() -> O + Sync,
        O: SequenceObserver,
    {
        let run = |stops: &StopSet| self.sequence_with(network, stops, &mut make_observer());

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            batch.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            batch.iter().map(run).collect()
        }
    }
}
