use std::{
    cmp::Ordering,
    collections::{hash_map::Entry, HashMap, HashSet},
};

use geo::Point;
use itertools::Itertools;
use log::warn;
use petgraph::unionfind::UnionFind;

use crate::{
    math,
    settings::AirwireSettings,
    triangulation::Triangulation,
};

use super::{
    collect::Ratvertices,
    connectivity::{CopperConnectivity, RatvertexPair},
};

/// What joining two ratvertices costs: nothing if copper already does it, else the squared
/// distance an airwire would span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatlineCost {
    Copper,
    Air(f64),
}

impl RatlineCost {
    /// Numeric weight, with already connected pairs weighing -1.
    pub fn weight(&self) -> f64 {
        match self {
            RatlineCost::Copper => -1.0,
            RatlineCost::Air(length_squared) => *length_squared,
        }
    }

    pub fn is_air(&self) -> bool {
        matches!(self, RatlineCost::Air(..))
    }

    /// Copper sorts before any air, air by length.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RatlineCost::Copper, RatlineCost::Copper) => Ordering::Equal,
            (RatlineCost::Copper, RatlineCost::Air(..)) => Ordering::Less,
            (RatlineCost::Air(..), RatlineCost::Copper) => Ordering::Greater,
            (RatlineCost::Air(a), RatlineCost::Air(b)) => a.total_cmp(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateEdge {
    pub pair: RatvertexPair,
    pub cost: RatlineCost,
}

/// Copper pairs first, then every geometric neighbor pair not already among them.
pub fn build_candidates(
    ratvertices: &Ratvertices,
    copper: &CopperConnectivity,
    settings: &AirwireSettings,
) -> Vec<CandidateEdge> {
    if ratvertices.len() < 2 {
        return vec![];
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for pair in copper.pairs() {
        if seen.insert(pair) {
            candidates.push(CandidateEdge {
                pair,
                cost: RatlineCost::Copper,
            });
        }
    }

    let positions = ratvertices.positions();

    for (from, to) in geometric_edges(&positions, settings) {
        if from == to {
            continue;
        }

        let pair = RatvertexPair::new(from, to);

        if seen.insert(pair) {
            candidates.push(CandidateEdge {
                pair,
                cost: RatlineCost::Air(math::distance_squared(positions[from], positions[to])),
            });
        }
    }

    candidates
}

/// Index pairs of points worth considering as airwires: all pairs of three points, Delaunay
/// neighbors of more, or a chain along the line when all points are collinear. Coincident
/// points are tied to the first point at their position so the triangulation only sees
/// distinct points.
pub fn geometric_edges(positions: &[Point], settings: &AirwireSettings) -> Vec<(usize, usize)> {
    if positions.len() < 2 {
        return vec![];
    }

    if positions.len() == 2 {
        return vec![(0, 1)];
    }

    let mut edges = Vec::new();
    let mut distinct: Vec<usize> = Vec::new();
    let mut first_at: HashMap<(u64, u64), usize> = HashMap::new();

    for (index, pos) in positions.iter().enumerate() {
        // Adding zero folds -0.0 into 0.0.
        let key = ((pos.x() + 0.0).to_bits(), (pos.y() + 0.0).to_bits());

        match first_at.entry(key) {
            Entry::Occupied(entry) => edges.push((*entry.get(), index)),
            Entry::Vacant(entry) => {
                entry.insert(index);
                distinct.push(index);
            }
        }
    }

    let distinct_positions: Vec<Point> = distinct.iter().map(|&index| positions[index]).collect();

    match distinct.len() {
        0 | 1 => (),
        2 => edges.push((distinct[0], distinct[1])),
        // Three points give at most three Delaunay edges anyway.
        3 => edges.extend([
            (distinct[0], distinct[1]),
            (distinct[1], distinct[2]),
            (distinct[0], distinct[2]),
        ]),
        _ if math::are_collinear(&distinct_positions, settings.collinear_tolerance) => {
            edges.extend(chain(&distinct, &distinct_positions))
        }
        _ => match Triangulation::with_super_scale(
            &distinct_positions,
            settings.super_triangle_scale,
        ) {
            Ok(triangulation) => {
                let local: Vec<(usize, usize)> = triangulation.edges().collect();

                if !spans_all(distinct.len(), &local) {
                    warn!(
                        "triangulation of {} points is not connected, chaining them as well",
                        distinct.len()
                    );
                    edges.extend(chain(&distinct, &distinct_positions));
                }

                edges.extend(
                    local
                        .into_iter()
                        .map(|(from, to)| (distinct[from], distinct[to])),
                );
            }
            Err(err) => {
                warn!("{}, chaining points instead", err);
                edges.extend(chain(&distinct, &distinct_positions));
            }
        },
    }

    edges
}

/// Whether `edges` join all of `count` points into one component.
fn spans_all(count: usize, edges: &[(usize, usize)]) -> bool {
    let mut unionfind = UnionFind::new(count);
    let merges = edges
        .iter()
        .filter(|&&(from, to)| unionfind.union(from, to))
        .count();

    merges + 1 >= count
}

/// Consecutive pairs of `indices` ordered along the line through the first two positions.
fn chain(indices: &[usize], positions: &[Point]) -> Vec<(usize, usize)> {
    let (origin, towards) = (positions[0], positions[1]);
    let mut order: Vec<usize> = (0..indices.len()).collect();

    order.sort_by(|&a, &b| {
        math::projection(origin, towards, positions[a])
            .total_cmp(&math::projection(origin, towards, positions[b]))
    });

    order
        .into_iter()
        .tuple_windows::<(_, _)>()
        .map(|(a, b)| (indices[a], indices[b]))
        .collect()
}
