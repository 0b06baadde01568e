//! `lm-core` — foundational types for the `lastmile` route planner.
//!
//! This crate is a dependency of every other `lm-*` crate.  It has no `lm-*`
//! dependencies and a single required external one (`rand`), plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `GeoPoint`, haversine distance, `BoundingBox`         |
//! | [`rng`]         | `SampleRng` (seeded, for test-data generation)        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{BoundingBox, GeoPoint};
pub use ids::{EdgeId, NodeId};
pub use rng::SampleRng;
