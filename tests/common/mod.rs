#![allow(dead_code)]

use geo::{point, polygon, Point};
use petgraph::{algo::min_spanning_tree, data::Element, graph::UnGraph, unionfind::UnionFind};
use airwires::{
    airwire::{
        candidate::{self, CandidateEdge},
        collect::Ratvertices,
        connectivity::CopperConnectivity,
        Ratline,
    },
    board::{
        connection::Connection,
        layer::Layer,
        plane::{Fragment, Plane},
        Board, Junction, JunctionId, NetId, Track,
    },
    settings::AirwireSettings,
};

pub fn junction(board: &mut Board, net: NetId, x: f64, y: f64) -> Connection {
    junction_on(board, net, x, y, Layer::TOP)
}

pub fn junction_on(board: &mut Board, net: NetId, x: f64, y: f64, layer: Layer) -> Connection {
    Connection::junction(add_junction(board, net, x, y, layer, false))
}

pub fn via(board: &mut Board, net: NetId, x: f64, y: f64) -> Connection {
    Connection::junction(add_junction(board, net, x, y, Layer::TOP, true))
}

fn add_junction(
    board: &mut Board,
    net: NetId,
    x: f64,
    y: f64,
    layer: Layer,
    has_via: bool,
) -> JunctionId {
    board
        .add_junction(Junction {
            position: point! {x: x, y: y},
            layer,
            has_via,
            net: Some(net),
        })
        .unwrap()
}

pub fn track(board: &mut Board, net: NetId, from: Connection, to: Connection, layer: Layer) {
    board
        .add_track(Track {
            net: Some(net),
            layer,
            from,
            to,
        })
        .unwrap();
}

pub fn rect_fragment(x0: f64, y0: f64, x1: f64, y1: f64) -> Fragment {
    Fragment::new(polygon![
        (x: x0, y: y0),
        (x: x1, y: y0),
        (x: x1, y: y1),
        (x: x0, y: y1),
    ])
}

pub fn plane(board: &mut Board, net: NetId, layer: Layer, fragments: Vec<Fragment>) {
    board
        .add_plane(Plane {
            net,
            layer,
            fragments,
        })
        .unwrap();
}

/// Pseudo-random, pairwise distinct points, in general position for all practical purposes.
pub fn scattered_points(count: usize, seed: u64) -> Vec<Point> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64 * 1000.0
    };

    (0..count)
        .map(|_| {
            let x = next();
            let y = next();
            point! {x: x, y: y}
        })
        .collect()
}

pub fn ratline_touches(ratline: &Ratline, connection: Connection) -> bool {
    ratline.from == connection || ratline.to == connection
}

pub fn joins(ratline: &Ratline, a: Connection, b: Connection) -> bool {
    (ratline.from == a && ratline.to == b) || (ratline.from == b && ratline.to == a)
}

pub fn total_length_squared(ratlines: &[Ratline]) -> f64 {
    ratlines.iter().map(|ratline| ratline.length_squared()).sum()
}

/// Panics if `ratlines` close a cycle among `point_count` ratvertices.
pub fn assert_forest(ratlines: &[Ratline], point_count: usize) {
    let mut unionfind = UnionFind::new(point_count);

    for ratline in ratlines {
        assert!(
            unionfind.union(ratline.pair.first(), ratline.pair.second()),
            "{:?} closes a cycle",
            ratline
        );
    }
}

pub fn candidates(board: &Board, net: NetId, settings: &AirwireSettings) -> (usize, Vec<CandidateEdge>) {
    let ratvertices = Ratvertices::collect(board, net);
    let copper = CopperConnectivity::new(board, net, &ratvertices, settings.fast);
    let candidates = candidate::build_candidates(&ratvertices, &copper, settings);
    (ratvertices.len(), candidates)
}

/// Total air length of a reference minimum spanning forest over the same candidates.
pub fn reference_air_length_squared(point_count: usize, candidates: &[CandidateEdge]) -> f64 {
    let mut graph = UnGraph::<(), f64>::new_undirected();
    let nodes: Vec<_> = (0..point_count).map(|_| graph.add_node(())).collect();

    for candidate in candidates {
        graph.add_edge(
            nodes[candidate.pair.first()],
            nodes[candidate.pair.second()],
            candidate.cost.weight(),
        );
    }

    min_spanning_tree(&graph)
        .filter_map(|element| match element {
            Element::Edge { weight, .. } if weight >= 0.0 => Some(weight),
            _ => None,
        })
        .sum()
}

/// Number of classes the candidate graph's copper edges split the points into.
pub fn copper_class_count(point_count: usize, candidates: &[CandidateEdge]) -> usize {
    let mut unionfind = UnionFind::new(point_count);
    let mut classes = point_count;

    for candidate in candidates.iter().filter(|candidate| !candidate.cost.is_air()) {
        if unionfind.union(candidate.pair.first(), candidate.pair.second()) {
            classes -= 1;
        }
    }

    classes
}
