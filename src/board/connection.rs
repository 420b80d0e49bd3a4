use enum_dispatch::enum_dispatch;
use geo::Point;
use serde::{Deserialize, Serialize};

use super::{layer::Layer, Board, JunctionId, PackageId, PadId};

/// Resolves a connection endpoint against the board it refers into. Both accessors return
/// `None` when the referenced object is not on the board.
#[enum_dispatch]
pub trait ResolveConnection {
    fn position(&self, board: &Board) -> Option<Point>;
    fn layer(&self, board: &Board) -> Option<Layer>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JunctionRef {
    pub junction: JunctionId,
}

impl ResolveConnection for JunctionRef {
    fn position(&self, board: &Board) -> Option<Point> {
        Some(board.junction(self.junction)?.position)
    }

    fn layer(&self, board: &Board) -> Option<Layer> {
        Some(board.junction(self.junction)?.layer())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PadRef {
    pub package: PackageId,
    pub pad: PadId,
}

impl ResolveConnection for PadRef {
    fn position(&self, board: &Board) -> Option<Point> {
        let package = board.package(self.package)?;
        Some(package.pad_position(package.pads.get(&self.pad)?))
    }

    fn layer(&self, board: &Board) -> Option<Layer> {
        let package = board.package(self.package)?;
        Some(package.pad_layer(package.pads.get(&self.pad)?))
    }
}

/// Something a track can end on, and thus something an airwire can run between.
#[enum_dispatch(ResolveConnection)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Connection {
    Junction(JunctionRef),
    Pad(PadRef),
}

impl Connection {
    pub fn junction(junction: JunctionId) -> Self {
        Connection::Junction(JunctionRef { junction })
    }

    pub fn pad(package: PackageId, pad: PadId) -> Self {
        Connection::Pad(PadRef { package, pad })
    }
}
