//! Spatial-subsystem error types.

use thiserror::Error;

use lm_core::NodeId;

/// Errors produced by routing and graph import.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

/// Failures of a [`GraphProvider`](crate::GraphProvider).
///
/// Kept separate from [`SpatialError`] so callers can tell "could not get a
/// map for this place" apart from "could not route on the map".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no road network available for place {0:?}")]
    UnknownPlace(String),

    #[error("road network for place {0:?} has no drivable nodes")]
    EmptyNetwork(String),

    #[error("failed to load road network for place {place:?}: {source}")]
    Load {
        place:  String,
        #[source]
        source: SpatialError,
    },
}
