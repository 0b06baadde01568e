//! `lm-route` — delivery stop sequencing.
//!
//! Given a road network and a [`StopSet`] (depot first), [`RouteSequencer`]
//! builds a visiting order with the greedy nearest-neighbour heuristic: from
//! the current position always drive to the cheapest unvisited stop.  Each
//! leg's free-flow time is scaled by a congestion factor into a minutes
//! estimate.
//!
//! This is a construction heuristic, not an optimal TSP solver.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`stops`]     | `StopSet` (validated, depot first), sampling, CSV loader |
//! | [`config`]    | `SequencerConfig`                                        |
//! | [`sequencer`] | `RouteSequencer`                                         |
//! | [`result`]    | `RouteLeg`, `RouteResult`, `round2`                      |
//! | [`observer`]  | `SequenceObserver`, `CancelFlag`, `Deadline`             |
//! | [`error`]     | `RouteError`, `StopSetError`                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `sequence_batch` runs on the Rayon thread pool.          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and results. |

pub mod config;
pub mod error;
pub mod observer;
pub mod result;
pub mod sequencer;
pub mod stops;


pub use config::SequencerConfig;
pub use error::{RouteError, SequenceResult, StopSetError};
pub use observer::{CancelFlag, Deadline, NoopObserver, SequenceObserver};
pub use result::{RouteLeg, RouteResult, round2};
pub use sequencer::RouteSequencer;
pub use stops::{StopSet, load_stops_csv, load_stops_reader};
