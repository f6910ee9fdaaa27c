pub mod error;
pub mod graph;
pub mod engine;
pub mod models;
pub mod navigator;
pub mod options;

pub use error::{GraphError, NavError};
pub use graph::{Graph, GraphDocument, Waypoint, WaypointId, WaypointMeta, INVALID_DISTANCE};
pub use engine::{PathCache, RouteKey, SearchContext, SearchOutcome};
pub use models::Route;
pub use navigator::Navigator;
pub use options::SearchOptions;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
