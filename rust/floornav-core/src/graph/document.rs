use serde::{Deserialize, Serialize};

pub type WaypointId = u32;

/// Descriptive fields carried through untouched for marker callouts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(rename = "photoUrls", default, skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<String>,
}

/// One "dot" of the location document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    /// Normalized to the full map bitmap width.
    pub x: f32,
    /// Normalized to the full map bitmap height.
    pub y: f32,
    pub level: i32,
    #[serde(rename = "connected")]
    pub neighbors: Vec<WaypointId>,
    #[serde(flatten)]
    pub meta: WaypointMeta,
}

impl Waypoint {
    pub fn new(id: WaypointId, x: f32, y: f32, level: i32, neighbors: Vec<WaypointId>) -> Self {
        Self { id, x, y, level, neighbors, meta: WaypointMeta::default() }
    }
}

/// The per-location graph description as shipped in `map.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub width: u32,
    pub height: u32,
    pub dots: Vec<Waypoint>,
}
