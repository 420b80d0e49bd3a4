use geo::{point, Point};
use serde::{Deserialize, Serialize};

/// Rigid transform from an object's local coordinates into its parent's: optional mirroring
/// about the local y axis, then rotation by `angle` degrees, then translation by `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub shift: Point,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub mirror: bool,
}

impl Placement {
    pub fn new(shift: Point, angle: f64) -> Self {
        Self {
            shift,
            angle,
            mirror: false,
        }
    }

    pub fn from_shift(shift: Point) -> Self {
        Self::new(shift, 0.0)
    }

    /// Placement of the same object seen from the other side of the board.
    pub fn flipped(&self) -> Self {
        Self {
            shift: self.shift,
            angle: (360.0 - self.angle).rem_euclid(360.0),
            mirror: !self.mirror,
        }
    }

    pub fn transform(&self, p: Point) -> Point {
        let x = if self.mirror { -p.x() } else { p.x() };
        let y = p.y();
        let (sin, cos) = sin_cos_degrees(self.angle);

        point! {
            x: x * cos - y * sin + self.shift.x(),
            y: x * sin + y * cos + self.shift.y()
        }
    }
}

fn sin_cos_degrees(angle: f64) -> (f64, f64) {
    // Right angles are exact so that pads rotated onto each other stay coincident.
    let angle = angle.rem_euclid(360.0);

    if angle == 0.0 {
        (0.0, 1.0)
    } else if angle == 90.0 {
        (1.0, 0.0)
    } else if angle == 180.0 {
        (0.0, -1.0)
    } else if angle == 270.0 {
        (-1.0, 0.0)
    } else {
        angle.to_radians().sin_cos()
    }
}
