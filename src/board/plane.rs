use geo::{BoundingRect, Contains, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

use super::{layer::Layer, NetId};

/// One contiguous piece of a plane's fill, holes included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub polygon: Polygon,
}

impl Fragment {
    pub fn new(polygon: Polygon) -> Self {
        Self { polygon }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.polygon.contains(&p)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.polygon.bounding_rect()
    }
}

/// Filled copper area of a net. The fragments come from an external fill pass and are only
/// read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub net: NetId,
    pub layer: Layer,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Plane {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}
