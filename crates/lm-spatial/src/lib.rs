//! `lm-spatial` — road network, shortest paths, and graph providers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork`, `Segment`, `RoadNetworkBuilder`              |
//! | [`router`]   | `Router` trait (shortest-path oracle), `Route`, `DijkstraRouter` |
//! | [`speed`]    | `SpeedProfile`, `maxspeed` parsing, drivability and one-way rules |
//! | [`provider`] | `GraphProvider` trait, `StaticProvider`, `GraphCache`       |
//! | [`osm`]      | `load_from_pbf` (feature = `"osm"` only)                   |
//! | [`error`]    | `SpatialError`, `ProviderError`, `SpatialResult<T>`        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading and `PbfDirectoryProvider`.          |
//! | `serde` | Derives `Serialize`/`Deserialize` on public config types.    |

pub mod error;
pub mod network;
pub mod provider;
pub mod router;
pub mod speed;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{ProviderError, SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder, Segment};
pub use provider::{Eviction, GraphCache, GraphProvider, StaticProvider, normalize_place, place_slug};
pub use router::{DijkstraRouter, Route, Router};
pub use speed::{Oneway, SpeedProfile};

#[cfg(feature = "osm")]
pub use provider::PbfDirectoryProvider;
