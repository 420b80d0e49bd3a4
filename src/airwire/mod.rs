//! Computes airwires: for each net, the connections still missing between its junctions and
//! pads once the copper already on the board is taken into account.

pub mod airwire;
mod airwires;
pub mod candidate;
pub mod collect;
pub mod connectivity;
pub mod forest;

pub use airwires::*;
