use serde::{Deserialize, Serialize};

use crate::graph::WaypointId;

/// A resolved route ready for the map renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub from: WaypointId,
    pub to: WaypointId,
    /// Floor the route was filtered to; `None` keeps every floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    /// Kept waypoint ids, start first.
    pub waypoints: Vec<WaypointId>,
    /// Pixel-space strokes `[x0,y0,x1,y1, x1,y1,x2,y2, ...]`.
    pub segments: Vec<f32>,
    /// Drawn length of `segments`.
    pub length: f32,
    pub expanded: u64,
}

impl Route {
    /// Stroke endpoints in emission order, duplicates included.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.segments.chunks_exact(2).map(|c| (c[0], c[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
