use bimap::BiHashMap;
use geo::Point;
use log::warn;

use crate::board::{
    connection::{Connection, ResolveConnection},
    layer::Layer,
    Board, NetId,
};

/// A location of a net that has to end up electrically joined to the net's other locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratvertex {
    pub index: usize,
    pub pos: Point,
    pub connection: Connection,
    pub layer: Layer,
}

#[derive(Debug, Clone, Default)]
pub struct Ratvertices {
    vertices: Vec<Ratvertex>,
    connection_index: BiHashMap<Connection, usize>,
}

impl Ratvertices {
    /// Junctions of `net` first, then its pads, each indexed in that order.
    pub fn collect(board: &Board, net: NetId) -> Self {
        let mut this = Self::default();

        for junction in board.net_junctions(net) {
            this.push(board, Connection::junction(junction));
        }

        for (package, pad) in board.net_pads(net) {
            this.push(board, Connection::pad(package, pad));
        }

        this
    }

    fn push(&mut self, board: &Board, connection: Connection) {
        let (Some(pos), Some(layer)) = (connection.position(board), connection.layer(board))
        else {
            warn!("{:?} does not resolve on the board, skipping it", connection);
            return;
        };

        let index = self.vertices.len();
        self.vertices.push(Ratvertex {
            index,
            pos,
            connection,
            layer,
        });
        self.connection_index.insert(connection, index);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ratvertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[Ratvertex] {
        &self.vertices
    }

    pub fn index_of(&self, connection: &Connection) -> Option<usize> {
        self.connection_index.get_by_left(connection).copied()
    }

    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connection_index.get_by_right(&index)
    }

    pub fn positions(&self) -> Vec<Point> {
        self.vertices.iter().map(|vertex| vertex.pos).collect()
    }
}
