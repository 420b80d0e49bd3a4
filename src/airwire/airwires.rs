use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::{
    board::{connection::Connection, Board, NetId},
    settings::AirwireSettings,
};

use super::{
    airwire::{self, Airwire, AirwireId, AirwireIdPool},
    candidate::{self, RatlineCost},
    collect::Ratvertices,
    connectivity::{CopperConnectivity, RatvertexPair},
    forest::SpanningForest,
};

/// A connection a net still lacks, between two of its ratvertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratline {
    pub pair: RatvertexPair,
    pub from: Connection,
    pub to: Connection,
    pub cost: RatlineCost,
}

impl Ratline {
    pub fn length_squared(&self) -> f64 {
        self.cost.weight()
    }
}

/// Runs the whole pipeline for one net: collect its ratvertices, find what copper already
/// joins, propose candidates and reduce them to a spanning forest.
pub fn compute_net_ratlines(board: &Board, net: NetId, settings: &AirwireSettings) -> Vec<Ratline> {
    let ratvertices = Ratvertices::collect(board, net);

    if ratvertices.len() < 2 {
        return vec![];
    }

    let copper = CopperConnectivity::new(board, net, &ratvertices, settings.fast);
    let candidates = candidate::build_candidates(&ratvertices, &copper, settings);
    let candidate_count = candidates.len();
    let reduced = SpanningForest::new(ratvertices.len()).reduce(candidates);

    debug!(
        "net {}: {} ratvertices, {} copper pairs, {} candidates, {} ratlines",
        net,
        ratvertices.len(),
        copper.len(),
        candidate_count,
        reduced.len()
    );

    reduced
        .into_iter()
        .filter_map(|edge| {
            Some(Ratline {
                pair: edge.pair,
                from: *ratvertices.connection(edge.pair.first())?,
                to: *ratvertices.connection(edge.pair.second())?,
                cost: edge.cost,
            })
        })
        .collect()
}

/// The board's current airwires, keyed by id, with an index of which net owns which.
#[derive(Debug, Clone, Default)]
pub struct Airwires {
    airwires: HashMap<AirwireId, Airwire>,
    net_airwires: BTreeMap<NetId, Vec<AirwireId>>,
    settings: AirwireSettings,
}

impl Airwires {
    pub fn new(settings: AirwireSettings) -> Self {
        Self {
            airwires: HashMap::new(),
            net_airwires: BTreeMap::new(),
            settings,
        }
    }

    /// Replaces every airwire with a fresh computation over all nets that have points.
    pub fn update_all(&mut self, board: &Board) {
        let mut pool = AirwireIdPool::new(self.airwires.drain().map(|(id, _)| id));
        self.net_airwires.clear();

        for net in board.nets_with_points() {
            self.recompute_net(board, net, &mut pool);
        }

        debug!("{} airwires on {} nets", self.airwires.len(), self.net_airwires.len());
    }

    /// Replaces the airwires of `nets` only. Airwires of other nets are kept as they are.
    pub fn update_nets(&mut self, board: &Board, nets: &BTreeSet<NetId>) {
        let replaced: Vec<AirwireId> = nets
            .iter()
            .flat_map(|net| self.remove_net(*net))
            .collect();
        let mut pool = AirwireIdPool::new(replaced);

        for net in nets {
            self.recompute_net(board, *net, &mut pool);
        }
    }

    pub fn update_net(&mut self, board: &Board, net: NetId) {
        self.update_nets(board, &BTreeSet::from([net]));
    }

    fn recompute_net(&mut self, board: &Board, net: NetId, pool: &mut AirwireIdPool) {
        let ratlines = compute_net_ratlines(board, net, &self.settings);

        if ratlines.is_empty() {
            return;
        }

        let ids = self.net_airwires.entry(net).or_default();

        for (id, airwire) in airwire::synthesize(&ratlines, net, pool) {
            ids.push(id);
            self.airwires.insert(id, airwire);
        }
    }

    fn remove_net(&mut self, net: NetId) -> Vec<AirwireId> {
        let ids = self.net_airwires.remove(&net).unwrap_or_default();

        for id in &ids {
            self.airwires.remove(id);
        }

        ids
    }

    pub fn airwire(&self, id: AirwireId) -> Option<&Airwire> {
        self.airwires.get(&id)
    }

    pub fn airwires(&self) -> &HashMap<AirwireId, Airwire> {
        &self.airwires
    }

    pub fn net_airwires(&self, net: NetId) -> impl Iterator<Item = (AirwireId, &Airwire)> + '_ {
        self.net_airwires
            .get(&net)
            .into_iter()
            .flatten()
            .filter_map(|id| Some((*id, self.airwires.get(id)?)))
    }

    pub fn nets(&self) -> impl Iterator<Item = NetId> + '_ {
        self.net_airwires.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.airwires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airwires.is_empty()
    }
}
