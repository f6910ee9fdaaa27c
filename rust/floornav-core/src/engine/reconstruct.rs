use crate::error::NavError;
use crate::graph::Graph;

use super::search::SearchContext;

/// Walks came-from links from `goal` back to `start`. The returned indices
/// run goal-first.
pub fn backtrack(ctx: &SearchContext, start: usize, goal: usize) -> Result<Vec<usize>, NavError> {
    let limit = ctx.capacity();
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = ctx.came_from(cur).ok_or_else(|| {
            NavError::Reconstruction(format!("came-from chain broken at index {cur}"))
        })?;
        path.push(cur);
        if path.len() > limit {
            return Err(NavError::Reconstruction("came-from chain does not terminate".into()));
        }
    }
    Ok(path)
}

/// Keeps the nodes of a goal-first path that lie on `floor` and returns them
/// start-first. The goal anchors the walk and is dropped when it sits on
/// another floor. `None` keeps every node; route length is measured on that
/// unfiltered path.
pub fn filter_floor(graph: &Graph, goal_first: &[usize], floor: Option<i32>) -> Vec<usize> {
    let on_floor = |idx: usize| match floor {
        Some(level) => graph.at(idx).is_some_and(|w| w.level == level),
        None => true,
    };
    let mut kept: Vec<usize> = Vec::with_capacity(goal_first.len());
    if let Some((&goal, ancestors)) = goal_first.split_first() {
        kept.push(goal);
        kept.extend(ancestors.iter().copied().filter(|&i| on_floor(i)));
        if !on_floor(goal) {
            kept.remove(0);
        }
    }
    kept.reverse();
    kept
}

/// Expands `n` points into `n - 1` independent two-point strokes, `4n - 4`
/// floats in total. Interior points appear twice.
pub fn encode_segments(points: &[(f32, f32)]) -> Vec<f32> {
    let mut lines = Vec::with_capacity(points.len().saturating_sub(1) * 4);
    for pair in points.windows(2) {
        let ((ax, ay), (bx, by)) = (pair[0], pair[1]);
        lines.extend_from_slice(&[ax, ay, bx, by]);
    }
    lines
}

/// Sums the distances between consecutive points of a flat coordinate array.
/// Duplicated interior points contribute zero.
pub fn polyline_length(coords: &[f32]) -> f32 {
    let mut points = coords.chunks_exact(2).map(|c| (c[0], c[1]));
    let Some(mut prev) = points.next() else { return 0.0 };
    let mut total = 0.0f32;
    for p in points {
        let dx = p.0 - prev.0;
        let dy = p.1 - prev.1;
        total += (dx * dx + dy * dy).sqrt();
        prev = p;
    }
    total
}
