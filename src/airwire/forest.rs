use contracts::debug_ensures;
use petgraph::unionfind::UnionFind;

use super::candidate::CandidateEdge;

/// Kruskal reduction of a net's candidate edges. Copper edges are folded in for free; the
/// first air edge switches the reducer into emitting ratlines for good.
#[derive(Debug, Clone)]
pub struct SpanningForest {
    unionfind: UnionFind<usize>,
    point_count: usize,
    expected_size: usize,
    ratsnest_mode: bool,
}

impl SpanningForest {
    pub fn new(point_count: usize) -> Self {
        Self {
            unionfind: UnionFind::new(point_count),
            point_count,
            expected_size: point_count.saturating_sub(1),
            ratsnest_mode: false,
        }
    }

    /// Returns the air edges needed to join every point reachable through `edges`, cheapest
    /// first. Points no edge reaches stay disconnected.
    #[debug_ensures(ret.len() < self.point_count.max(1))]
    #[debug_ensures(ret.iter().all(|edge| edge.cost.is_air()))]
    pub fn reduce(&mut self, mut edges: Vec<CandidateEdge>) -> Vec<CandidateEdge> {
        edges.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        let mut ratlines = Vec::new();
        let mut edges = edges.into_iter();

        while ratlines.len() < self.expected_size {
            let Some(edge) = edges.next() else {
                break;
            };

            if !self
                .unionfind
                .union(edge.pair.first(), edge.pair.second())
            {
                // Would close a cycle.
                continue;
            }

            if edge.cost.is_air() {
                self.ratsnest_mode = true;
            }

            if self.ratsnest_mode {
                ratlines.push(edge);
            } else {
                self.expected_size -= 1;
            }
        }

        ratlines
    }

    /// Number of ratlines still needed to join everything, after the copper folded in so far.
    pub fn expected_size(&self) -> usize {
        self.expected_size
    }

    pub fn is_ratsnest_mode(&self) -> bool {
        self.ratsnest_mode
    }

    pub fn equiv(&self, a: usize, b: usize) -> bool {
        self.unionfind.equiv(a, b)
    }
}
