use serde::{Deserialize, Serialize};

pub const TOP_COPPER: i32 = 0;
pub const BOTTOM_COPPER: i32 = -100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Copper(i32),
    /// Spans all copper layers: vias and through-hole pads.
    Through,
}

impl Layer {
    pub const TOP: Layer = Layer::Copper(TOP_COPPER);
    pub const BOTTOM: Layer = Layer::Copper(BOTTOM_COPPER);

    /// Whether something on `self` is reached by copper on layer `on`.
    pub fn reaches(self, on: Layer) -> bool {
        self == on || self == Layer::Through
    }

    /// Top and bottom copper trade places, everything else stays put.
    pub fn flipped(self) -> Layer {
        match self {
            Layer::TOP => Layer::BOTTOM,
            Layer::BOTTOM => Layer::TOP,
            layer => layer,
        }
    }
}
