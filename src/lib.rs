#[macro_use]
mod id;

pub mod airwire;
pub mod board;
pub mod math;
pub mod settings;
pub mod triangulation;
