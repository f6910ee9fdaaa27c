use std::cmp::Ordering;

/// Open-set entry. `BinaryHeap` is a max-heap, so ordering is inverted to pop
/// the smallest `f` first; ties go to the smaller `h`, then to insertion order.
#[derive(Clone, Copy, Debug)]
pub struct QueueNode {
    pub idx: u32,
    pub f: f32,
    pub g: f32,
    pub h: f32,
    pub seq: u64,
}

impl QueueNode {
    pub fn new(idx: u32, g: f32, h: f32, seq: u64) -> Self {
        Self { idx, f: g + h, g, h, seq }
    }
}

impl PartialEq for QueueNode {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}
impl Eq for QueueNode {}
impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}
