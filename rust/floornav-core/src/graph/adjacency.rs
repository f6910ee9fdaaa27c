/// Compressed outgoing adjacency over dense waypoint indices.
///
/// Neighbors keep the order in which the document listed them; edges are
/// one-way, a listing on `a` says nothing about `b`.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    pub offsets: Vec<usize>,
    pub dst: Vec<u32>,
    pub w: Vec<f32>,
}

impl Adjacency {
    pub fn build(nodes: usize, src: &[u32], dst: &[u32], w: &[f32]) -> Self {
        let mut counts = vec![0usize; nodes];
        for &s in src { counts[s as usize] += 1; }
        let mut offsets = vec![0usize; nodes + 1];
        for i in 0..nodes { offsets[i + 1] = offsets[i] + counts[i]; }
        let mut cur = offsets[..nodes].to_vec();
        let mut adst = vec![0u32; dst.len()];
        let mut aw = vec![0f32; w.len()];
        for i in 0..src.len() {
            let s = src[i] as usize;
            let p = cur[s];
            adst[p] = dst[i];
            aw[p] = w[i];
            cur[s] += 1;
        }
        Adjacency { offsets, dst: adst, w: aw }
    }

    pub fn neighbors(&self, u: u32) -> impl Iterator<Item = (u32, f32)> + '_ {
        let u = u as usize;
        let s = self.offsets[u];
        let e = self.offsets[u + 1];
        self.dst[s..e].iter().copied().zip(self.w[s..e].iter().copied())
    }

    pub fn edge_count(&self) -> usize {
        self.dst.len()
    }
}
