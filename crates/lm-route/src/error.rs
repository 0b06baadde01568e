use thiserror::Error;

use lm_core::NodeId;
use lm_spatial::SpatialError;

/// Why a list of stops is not a valid [`StopSet`](crate::StopSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StopSetError {
    #[error("need a depot and at least one delivery stop, got {got} stop(s)")]
    TooFewStops { got: usize },

    #[error("stop {0} appears more than once")]
    DuplicateStop(NodeId),

    #[error("stop {0} is not a node of the road network")]
    UnknownNode(NodeId),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("stop {to} is unreachable from {from}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("invalid stop set: {0}")]
    InvalidStopSet(#[from] StopSetError),

    #[error("congestion factor must be finite and at least 1.0, got {0}")]
    InvalidCongestionFactor(f64),

    #[error("sequencing cancelled after {completed_legs} leg(s)")]
    Cancelled { completed_legs: usize },

    #[error("routing error: {0}")]
    Spatial(SpatialError),

    #[error("stop file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SpatialError> for RouteError {
    fn from(e: SpatialError) -> Self {
        match e {
            SpatialError::NoRoute { from, to } => RouteError::Unreachable { from, to },
            other => RouteError::Spatial(other),
        }
    }
}

pub type SequenceResult<T> = Result<T, RouteError>;
