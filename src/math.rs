use geo::{point, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Point,
    pub r: f64,
}

impl Circle {
    /// Points lying exactly on the circle count as contained.
    pub fn contains_point(&self, p: Point) -> bool {
        distance_squared(self.pos, p) <= self.r * self.r
    }
}

pub fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    dx * dx + dy * dy
}

fn cross(a: Point, b: Point) -> f64 {
    a.x() * b.y() - a.y() * b.x()
}

fn dot(a: Point, b: Point) -> f64 {
    a.x() * b.x() + a.y() * b.y()
}

/// Circle through three points, `None` when they are (nearly) collinear.
pub fn circumcircle(a: Point, b: Point, c: Point) -> Option<Circle> {
    let ab = b - a;
    let ac = c - a;
    let ab_sq = dot(ab, ab);
    let ac_sq = dot(ac, ac);
    let d = 2.0 * cross(ab, ac);

    // Relative to the triangle's size so that board units of any scale behave the same.
    if !(d.abs() > 1e-12 * ab_sq.max(ac_sq)) {
        return None;
    }

    let ux = (ac.y() * ab_sq - ab.y() * ac_sq) / d;
    let uy = (ab.x() * ac_sq - ac.x() * ab_sq) / d;

    if !ux.is_finite() || !uy.is_finite() {
        return None;
    }

    Some(Circle {
        pos: point! {x: a.x() + ux, y: a.y() + uy},
        r: f64::sqrt(ux * ux + uy * uy),
    })
}

/// Whether all points lie on one line, up to `tolerance` in the sine of the angle any point
/// makes with the line through the first two.
pub fn are_collinear(points: &[Point], tolerance: f64) -> bool {
    let [p0, p1, rest @ ..] = points else {
        return true;
    };

    let v = *p1 - *p0;
    let v_len = f64::sqrt(dot(v, v));

    if v_len == 0.0 {
        return are_collinear(&points[1..], tolerance);
    }

    rest.iter().all(|p| {
        let vp = *p - *p0;
        let vp_len = f64::sqrt(dot(vp, vp));
        vp_len == 0.0 || cross(v, vp).abs() <= tolerance * v_len * vp_len
    })
}

/// Position of `p` along the direction from `origin` to `towards`, unnormalized.
pub fn projection(origin: Point, towards: Point, p: Point) -> f64 {
    dot(towards - origin, p - origin)
}
