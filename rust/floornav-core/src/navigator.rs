//! Path engine for one loaded location.
//!
//! A `Navigator` owns the scratch table and route cache, so one instance runs
//! one search at a time. Concurrent callers either share it behind a lock or
//! each hold their own navigator over the same `Arc<Graph>`.

use std::sync::Arc;

use tracing::debug;

use crate::engine::{astar, backtrack, encode_segments, filter_floor, polyline_length};
use crate::engine::{PathCache, RouteKey, SearchContext};
use crate::error::{GraphError, NavError};
use crate::graph::{Graph, Waypoint, WaypointId};
use crate::models::Route;
use crate::options::SearchOptions;

pub struct Navigator {
    graph: Arc<Graph>,
    ctx: SearchContext,
    cache: PathCache,
    options: SearchOptions,
}

impl Navigator {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self::with_options(graph, SearchOptions::default())
    }

    pub fn with_options(graph: Arc<Graph>, options: SearchOptions) -> Self {
        let ctx = SearchContext::new(graph.len());
        let cache = PathCache::with_capacity(options.cache_capacity);
        Self { graph, ctx, cache, options }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        Ok(Self::new(Arc::new(Graph::from_json_str(json)?)))
    }

    /// Swaps in another location; cached routes of the old one are dropped.
    pub fn load_graph(&mut self, graph: Arc<Graph>) {
        self.ctx = SearchContext::new(graph.len());
        self.cache.clear();
        self.graph = graph;
    }

    pub fn graph(&self) -> &Arc<Graph> { &self.graph }

    pub fn options(&self) -> &SearchOptions { &self.options }

    pub fn search_context(&self) -> &SearchContext { &self.ctx }

    pub fn cache(&self) -> &PathCache { &self.cache }

    pub fn clear_cache(&mut self) { self.cache.clear(); }

    pub fn waypoint(&self, id: WaypointId) -> Result<&Waypoint, GraphError> {
        self.graph.waypoint(id)
    }

    /// Drawable segments from `start` to `finish` restricted to `floor`.
    /// No route is an empty array; unknown ids are an error.
    pub fn compute_path(&mut self, start: WaypointId, finish: WaypointId, floor: i32) -> Result<Vec<f32>, NavError> {
        match self.route(start, finish, floor) {
            Ok(route) => Ok(route.segments.clone()),
            Err(e) if e.is_no_path() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub fn route(&mut self, start: WaypointId, finish: WaypointId, floor: i32) -> Result<Arc<Route>, NavError> {
        self.resolve(RouteKey::new(start, finish, Some(floor)))
    }

    /// Length of the full route across every floor it touches.
    pub fn route_length(&mut self, start: WaypointId, finish: WaypointId) -> Result<f32, NavError> {
        self.resolve(RouteKey::new(start, finish, None)).map(|r| r.length)
    }

    fn resolve(&mut self, key: RouteKey) -> Result<Arc<Route>, NavError> {
        if let Some(hit) = self.cache.get(&key) {
            debug!(from = key.from, to = key.to, floor = ?key.floor, "route cache hit");
            return Ok(hit);
        }
        let start = self.graph.index_of(key.from)?;
        let goal = self.graph.index_of(key.to)?;

        let result = self.search(key, start, goal);
        self.ctx.reset(self.graph.len());

        let route = Arc::new(result?);
        self.cache.put(key, Arc::clone(&route));
        Ok(route)
    }

    fn search(&mut self, key: RouteKey, start: usize, goal: usize) -> Result<Route, NavError> {
        let outcome = astar(&self.graph, start, goal, &self.options, &mut self.ctx);
        debug!(
            from = key.from,
            to = key.to,
            found = outcome.found,
            expanded = outcome.expanded,
            reason = outcome.reason.unwrap_or(""),
            "search finished"
        );
        if !outcome.found {
            return Err(NavError::NoPathFound { reason: outcome.reason.unwrap_or("no-path") });
        }

        let goal_first = backtrack(&self.ctx, start, goal)?;
        let kept = filter_floor(&self.graph, &goal_first, key.floor);
        if kept.is_empty() {
            return Err(NavError::Reconstruction(format!(
                "route has no waypoints on floor {}",
                key.floor.unwrap_or_default()
            )));
        }

        let mut waypoints = Vec::with_capacity(kept.len());
        let mut points = Vec::with_capacity(kept.len());
        for &idx in &kept {
            let wp = self.graph.at(idx).ok_or_else(|| {
                NavError::Reconstruction(format!("index {idx} outside graph"))
            })?;
            waypoints.push(wp.id);
            points.push(self.graph.pixel_at(idx));
        }
        let segments = encode_segments(&points);
        let length = polyline_length(&segments);

        Ok(Route { from: key.from, to: key.to, floor: key.floor, waypoints, segments, length, expanded: outcome.expanded })
    }
}
