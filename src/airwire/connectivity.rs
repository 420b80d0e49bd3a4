use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use log::trace;
use rstar::{primitives::GeomWithData, RTree, AABB};

use crate::board::{connection::ResolveConnection, Board, NetId};

use super::collect::Ratvertices;

/// Unordered pair of ratvertex indices, stored smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RatvertexPair(usize, usize);

impl RatvertexPair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> usize {
        self.0
    }

    pub fn second(&self) -> usize {
        self.1
    }
}

/// Ratvertex pairs of one net that existing copper already joins.
#[derive(Debug, Clone, Default)]
pub struct CopperConnectivity {
    pairs: BTreeSet<RatvertexPair>,
}

impl CopperConnectivity {
    /// Gathers pairs joined by tracks and, unless `fast` is set, by shared plane fragments.
    pub fn new(board: &Board, net: NetId, ratvertices: &Ratvertices, fast: bool) -> Self {
        let mut pairs: BTreeSet<RatvertexPair> = track_pairs(board, net, ratvertices).collect();

        if !fast {
            pairs.extend(FragmentClasses::new(board, net, ratvertices).chain_pairs());
        }

        Self { pairs }
    }

    pub fn pairs(&self) -> impl Iterator<Item = RatvertexPair> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pairs joined by a track of `net` whose two ends are both on the track's layer or go
/// through all layers.
pub fn track_pairs<'a>(
    board: &'a Board,
    net: NetId,
    ratvertices: &'a Ratvertices,
) -> impl Iterator<Item = RatvertexPair> + 'a {
    board.net_tracks(net).filter_map(move |track| {
        let from_layer = track.from.layer(board)?;
        let to_layer = track.to.layer(board)?;

        if !from_layer.reaches(track.layer) || !to_layer.reaches(track.layer) {
            return None;
        }

        let from = ratvertices.index_of(&track.from)?;
        let to = ratvertices.index_of(&track.to)?;

        (from != to).then(|| RatvertexPair::new(from, to))
    })
}

/// Groups a net's ratvertices by the plane fragments they sit in. Ratvertices sharing a
/// fragment, directly or through a chain of overlapping fragments, end up in one class.
#[derive(Debug, Clone)]
pub struct FragmentClasses {
    class_of: Vec<Option<usize>>,
    aliases: HashMap<usize, usize>,
    class_count: usize,
}

impl FragmentClasses {
    pub fn new(board: &Board, net: NetId, ratvertices: &Ratvertices) -> Self {
        let mut this = Self {
            class_of: vec![None; ratvertices.len()],
            aliases: HashMap::new(),
            class_count: 0,
        };

        let rtree = RTree::bulk_load(
            ratvertices
                .vertices()
                .iter()
                .map(|vertex| GeomWithData::new([vertex.pos.x(), vertex.pos.y()], vertex.index))
                .collect(),
        );

        for plane in board.net_planes(net) {
            for fragment in plane.fragments() {
                let Some(rect) = fragment.bounding_rect() else {
                    continue;
                };

                let envelope = AABB::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );

                let mut members: Vec<usize> = rtree
                    .locate_in_envelope(&envelope)
                    .map(|entry| entry.data)
                    .filter(|&index| {
                        ratvertices.get(index).map_or(false, |vertex| {
                            vertex.layer.reaches(plane.layer) && fragment.contains(vertex.pos)
                        })
                    })
                    .collect();
                members.sort_unstable();

                this.add_fragment(&members);
            }
        }

        trace!(
            "{} fragment classes, {} aliased",
            this.class_count,
            this.aliases.len()
        );

        this
    }

    fn add_fragment(&mut self, members: &[usize]) {
        if members.is_empty() {
            return;
        }

        let class = self.class_count;
        self.class_count += 1;

        for &member in members {
            match self.class_of[member] {
                None => self.class_of[member] = Some(class),
                Some(existing) => {
                    // Both ends are resolved first, so no alias ever points back at itself.
                    let from = self.resolve(class);
                    let to = self.resolve(existing);

                    if from != to {
                        self.aliases.insert(from, to);
                    }
                }
            }
        }
    }

    pub fn resolve(&self, mut class: usize) -> usize {
        while let Some(&next) = self.aliases.get(&class) {
            class = next;
        }

        class
    }

    pub fn class(&self, index: usize) -> Option<usize> {
        self.class_of
            .get(index)
            .copied()
            .flatten()
            .map(|class| self.resolve(class))
    }

    /// Joins each ratvertex to the previous one of its class, which spans every class with
    /// one chain.
    pub fn chain_pairs(&self) -> Vec<RatvertexPair> {
        let mut members: Vec<(usize, usize)> = (0..self.class_of.len())
            .filter_map(|index| Some((self.class(index)?, index)))
            .collect();
        members.sort_unstable();

        members
            .into_iter()
            .tuple_windows::<(_, _)>()
            .filter_map(|(prev, next)| {
                (prev.0 == next.0).then(|| RatvertexPair::new(prev.1, next.1))
            })
            .collect()
    }
}
