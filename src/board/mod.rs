//! Snapshot of the board document that airwires are computed from: nets, junctions, packages
//! with their pads, routed tracks and filled planes.

mod board;
pub mod connection;
pub mod layer;
pub mod placement;
pub mod plane;

pub use board::*;
