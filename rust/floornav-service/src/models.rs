use floornav_core::{Route, WaypointId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: WaypointId,
    pub finish: WaypointId,
    #[serde(default = "default_floor")]
    pub floor: i32,
}

fn default_floor() -> i32 { 1 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub found: bool,
    pub segments: Vec<f32>,
    pub waypoints: Vec<WaypointId>,
    pub length: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RouteResponse {
    pub fn found(route: &Route) -> Self {
        Self {
            found: true,
            segments: route.segments.clone(),
            waypoints: route.waypoints.clone(),
            length: route.length,
            reason: None,
        }
    }

    pub fn not_found(reason: String) -> Self {
        Self { found: false, segments: Vec::new(), waypoints: Vec::new(), length: 0.0, reason: Some(reason) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LengthQuery {
    pub start: WaypointId,
    pub finish: WaypointId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthResponse {
    pub length: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub waypoints: usize,
    pub levels: Vec<i32>,
    pub width: u32,
    pub height: u32,
}
