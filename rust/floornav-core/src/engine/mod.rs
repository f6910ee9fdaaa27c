pub mod cache;
pub mod queue;
pub mod reconstruct;
pub mod search;

pub use cache::{PathCache, RouteKey};
pub use queue::QueueNode;
pub use reconstruct::{backtrack, encode_segments, filter_floor, polyline_length};
pub use search::{astar, SearchContext, SearchOutcome};
