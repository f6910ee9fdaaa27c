use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use aligned_vec::AVec;

use crate::graph::Graph;
use crate::options::SearchOptions;

use super::queue::QueueNode;

const NO_PARENT: u32 = u32::MAX;
// Deadline is polled every this many expansions.
const CLOCK_STRIDE: u64 = 256;

/// Per-search scratch table indexed by dense waypoint index.
///
/// Slots are stamped with a generation; bumping the generation resets every
/// slot to the neutral state (`g = 0`, `h = 0`, not visited, no parent)
/// without touching memory.
pub struct SearchContext {
    g: AVec<f32>,
    h: AVec<f32>,
    parent: AVec<u32>,
    visited: AVec<bool>,
    stamp: AVec<u32>,
    generation: u32,
    open: BinaryHeap<QueueNode>,
}

impl SearchContext {
    pub fn new(nodes: usize) -> Self {
        Self {
            g: AVec::__from_elem(64, 0.0, nodes),
            h: AVec::__from_elem(64, 0.0, nodes),
            parent: AVec::__from_elem(64, NO_PARENT, nodes),
            visited: AVec::__from_elem(64, false, nodes),
            stamp: AVec::__from_elem(64, 0, nodes),
            generation: 1,
            open: BinaryHeap::new(),
        }
    }

    pub fn reset(&mut self, nodes: usize) {
        if self.stamp.len() != nodes {
            *self = Self::new(nodes);
        } else {
            self.generation = self.generation.wrapping_add(1);
            if self.generation == 0 {
                self.stamp.fill(0);
                self.generation = 1;
            }
            self.open.clear();
        }
    }

    pub fn generation(&self) -> u32 { self.generation }

    pub fn capacity(&self) -> usize { self.stamp.len() }

    /// True once the node has been reached during the current search.
    #[inline(always)]
    pub fn is_discovered(&self, u: usize) -> bool {
        self.stamp.get(u).is_some_and(|&s| s == self.generation)
    }

    #[inline(always)]
    pub fn g(&self, u: usize) -> f32 {
        if self.is_discovered(u) { self.g[u] } else { 0.0 }
    }

    #[inline(always)]
    pub fn h(&self, u: usize) -> f32 {
        if self.is_discovered(u) { self.h[u] } else { 0.0 }
    }

    #[inline(always)]
    pub fn is_visited(&self, u: usize) -> bool {
        self.is_discovered(u) && self.visited[u]
    }

    #[inline(always)]
    pub fn came_from(&self, u: usize) -> Option<usize> {
        if !self.is_discovered(u) { return None; }
        match self.parent[u] {
            NO_PARENT => None,
            p => Some(p as usize),
        }
    }

    fn record(&mut self, u: usize, g: f32, h: f32, parent: Option<usize>) {
        if self.stamp[u] != self.generation {
            self.stamp[u] = self.generation;
            self.visited[u] = false;
        }
        self.g[u] = g;
        self.h[u] = h;
        self.parent[u] = parent.map(|p| p as u32).unwrap_or(NO_PARENT);
    }

    fn mark_visited(&mut self, u: usize) {
        self.visited[u] = true;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub found: bool,
    pub expanded: u64,
    pub cost: f32,
    /// Why the search ended without reaching the goal.
    pub reason: Option<&'static str>,
}

impl SearchOutcome {
    fn failed(reason: &'static str, expanded: u64) -> Self {
        Self { found: false, expanded, cost: f32::INFINITY, reason: Some(reason) }
    }
}

/// Best-first search from `start` to `goal` (dense indices) using pixel
/// distance as both edge weight and heuristic. Leaves the came-from chain in
/// `ctx` for the caller to reconstruct.
pub fn astar(graph: &Graph, start: usize, goal: usize, options: &SearchOptions, ctx: &mut SearchContext) -> SearchOutcome {
    let n = graph.len();
    if start >= n || goal >= n {
        return SearchOutcome::failed("no-path", 0);
    }
    ctx.reset(n);

    let deadline = (options.timeout_ms > 0)
        .then(|| Instant::now() + Duration::from_millis(options.timeout_ms));
    let mut expanded: u64 = 0;
    let mut seq: u64 = 0;

    let h0 = graph.distance_at(start, goal);
    ctx.record(start, 0.0, h0, None);
    ctx.open.push(QueueNode::new(start as u32, 0.0, h0, seq));

    while let Some(qn) = ctx.open.pop() {
        let u = qn.idx as usize;
        // Discard stale duplicates
        if ctx.is_visited(u) || qn.g > ctx.g(u) { continue; }

        if u == goal {
            return SearchOutcome { found: true, expanded, cost: ctx.g(u), reason: None };
        }

        expanded += 1;
        if expanded > options.max_expansions {
            return SearchOutcome::failed("expansion-limit", expanded);
        }
        if let Some(deadline) = deadline {
            if expanded % CLOCK_STRIDE == 0 && Instant::now() >= deadline {
                return SearchOutcome::failed("timeout", expanded);
            }
        }

        ctx.mark_visited(u);
        let gu = ctx.g(u);
        for (v, w) in graph.adjacency().neighbors(qn.idx) {
            let v = v as usize;
            if ctx.is_visited(v) { continue; }
            let tentative_g = gu + w;
            if !ctx.is_discovered(v) || tentative_g < ctx.g(v) {
                let h = graph.distance_at(v, goal);
                ctx.record(v, tentative_g, h, Some(u));
                seq += 1;
                ctx.open.push(QueueNode::new(v as u32, tentative_g, h, seq));
            }
        }
    }

    SearchOutcome::failed("no-path", expanded)
}
