//! Waypoint graph of one location.
//!
//! Waypoints are stored in document order inside an `IndexMap`, which doubles
//! as the explicit id -> dense index table. The search engine works on dense
//! indices only; external ids never have to match storage positions.

pub mod adjacency;
pub mod document;

use std::collections::BTreeSet;
use std::io::Read;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::GraphError;

pub use adjacency::Adjacency;
pub use document::{GraphDocument, Waypoint, WaypointId, WaypointMeta};

/// Returned by [`Graph::distance`] when the distance cannot be computed.
pub const INVALID_DISTANCE: f32 = -1.0;

#[derive(Clone, Debug)]
pub struct Graph {
    width: u32,
    height: u32,
    waypoints: IndexMap<WaypointId, Waypoint>,
    adjacency: Adjacency,
}

impl Graph {
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: GraphDocument) -> Result<Self, GraphError> {
        if doc.width == 0 || doc.height == 0 {
            return Err(GraphError::MalformedGraph(format!(
                "map dimensions must be positive, got {}x{}",
                doc.width, doc.height
            )));
        }

        let mut waypoints: IndexMap<WaypointId, Waypoint> = IndexMap::with_capacity(doc.dots.len());
        for dot in doc.dots {
            if !(0.0..=1.0).contains(&dot.x) || !(0.0..=1.0).contains(&dot.y) {
                warn!(id = dot.id, x = dot.x, y = dot.y, "waypoint outside normalized map bounds");
            }
            let id = dot.id;
            if waypoints.insert(id, dot).is_some() {
                return Err(GraphError::MalformedGraph(format!("duplicate waypoint id {id}")));
            }
        }

        let (width, height) = (doc.width as f32, doc.height as f32);
        let pixel = |w: &Waypoint| (w.x * width, w.y * height);
        let mut src = Vec::new();
        let mut dst = Vec::new();
        let mut wts = Vec::new();
        for (u, wp) in waypoints.values().enumerate() {
            for &nid in &wp.neighbors {
                let Some((v, _, nb)) = waypoints.get_full(&nid) else {
                    return Err(GraphError::MalformedGraph(format!(
                        "waypoint {} lists unknown neighbor {nid}",
                        wp.id
                    )));
                };
                src.push(u as u32);
                dst.push(v as u32);
                wts.push(euclid(pixel(wp), pixel(nb)));
            }
        }
        let adjacency = Adjacency::build(waypoints.len(), &src, &dst, &wts);

        let graph = Graph { width: doc.width, height: doc.height, waypoints, adjacency };
        info!(
            waypoints = graph.len(),
            edges = graph.adjacency.edge_count(),
            levels = ?graph.levels(),
            width = graph.width,
            height = graph.height,
            "graph loaded"
        );
        Ok(graph)
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn len(&self) -> usize { self.waypoints.len() }

    pub fn is_empty(&self) -> bool { self.waypoints.is_empty() }

    /// Waypoints in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.values()
    }

    pub fn waypoint(&self, id: WaypointId) -> Result<&Waypoint, GraphError> {
        self.waypoints.get(&id).ok_or(GraphError::OutOfRange { id, count: self.len() })
    }

    /// Pixel-space position of a waypoint.
    pub fn position(&self, id: WaypointId) -> Result<(f32, f32), GraphError> {
        let idx = self.index_of(id)?;
        Ok(self.pixel_at(idx))
    }

    /// Euclidean distance in pixel space, or [`INVALID_DISTANCE`] when the
    /// graph is empty or either id is unknown.
    pub fn distance(&self, a: WaypointId, b: WaypointId) -> f32 {
        self.try_distance(a, b).unwrap_or(INVALID_DISTANCE)
    }

    pub fn try_distance(&self, a: WaypointId, b: WaypointId) -> Result<f32, GraphError> {
        if self.is_empty() {
            return Err(GraphError::Empty);
        }
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        Ok(self.distance_at(ia, ib))
    }

    /// Distinct floors, ascending.
    pub fn levels(&self) -> Vec<i32> {
        self.waypoints.values().map(|w| w.level).collect::<BTreeSet<_>>().into_iter().collect()
    }

    pub fn waypoints_on_level(&self, level: i32) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.values().filter(move |w| w.level == level)
    }

    pub(crate) fn index_of(&self, id: WaypointId) -> Result<usize, GraphError> {
        self.waypoints.get_index_of(&id).ok_or(GraphError::OutOfRange { id, count: self.len() })
    }

    pub(crate) fn at(&self, idx: usize) -> Option<&Waypoint> {
        self.waypoints.get_index(idx).map(|(_, w)| w)
    }

    pub(crate) fn adjacency(&self) -> &Adjacency { &self.adjacency }

    pub(crate) fn pixel_at(&self, idx: usize) -> (f32, f32) {
        match self.at(idx) {
            Some(w) => (w.x * self.width as f32, w.y * self.height as f32),
            None => (0.0, 0.0),
        }
    }

    pub(crate) fn distance_at(&self, a: usize, b: usize) -> f32 {
        euclid(self.pixel_at(a), self.pixel_at(b))
    }
}

impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Graph::from_json_str(s)
    }
}

fn euclid((ax, ay): (f32, f32), (bx, by): (f32, f32)) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}
