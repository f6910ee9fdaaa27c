use thiserror::Error;

use crate::graph::WaypointId;

/// Structural and lookup failures of the waypoint graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("malformed graph: {0}")]
    MalformedGraph(String),
    #[error("waypoint {id} out of range (graph holds {count} waypoints)")]
    OutOfRange { id: WaypointId, count: usize },
    #[error("graph is empty")]
    Empty,
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        GraphError::MalformedGraph(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("no path found ({reason})")]
    NoPathFound { reason: &'static str },
    #[error("path reconstruction failed: {0}")]
    Reconstruction(String),
}

impl NavError {
    /// Routine outcomes that callers render as an empty route.
    pub fn is_no_path(&self) -> bool {
        matches!(self, NavError::NoPathFound { .. } | NavError::Reconstruction(_))
    }
}
