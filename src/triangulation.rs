//! Incremental Bowyer–Watson Delaunay triangulation of a plain point set.

use std::collections::HashMap;

use geo::{point, Point};
use log::{debug, trace};
use thiserror::Error;

use crate::math::{self, Circle};

pub const DEFAULT_SUPER_TRIANGLE_SCALE: f64 = 20.0;

const SUPER_TRIANGLE_GROWTH: f64 = 1000.0;
const SUPER_TRIANGLE_RETRIES: usize = 2;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TriangulationError {
    #[error("cannot triangulate {0} points, at least 3 are needed")]
    TooFewPoints(usize),
    #[error("point {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// A triangle corner: either one of the input points or a corner of the enclosing
/// super-triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trianvertex {
    Input(usize),
    Super(usize),
}

impl Trianvertex {
    pub fn input(&self) -> Option<usize> {
        match self {
            Trianvertex::Input(index) => Some(*index),
            Trianvertex::Super(..) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrianEdge {
    pub from: Trianvertex,
    pub to: Trianvertex,
}

impl TrianEdge {
    /// Same edge regardless of direction.
    fn canonical(&self) -> (Trianvertex, Trianvertex) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Trianvertex; 3],
    circumcircle: Circle,
}

impl Triangle {
    pub fn is_super(&self) -> bool {
        self.vertices
            .iter()
            .any(|vertex| matches!(vertex, Trianvertex::Super(..)))
    }

    pub fn edges(&self) -> [TrianEdge; 3] {
        let [a, b, c] = self.vertices;
        [
            TrianEdge { from: a, to: b },
            TrianEdge { from: b, to: c },
            TrianEdge { from: c, to: a },
        ]
    }

    pub fn circumcircle(&self) -> Circle {
        self.circumcircle
    }
}

#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<Point>,
    super_vertices: [Point; 3],
    triangles: Vec<Triangle>,
}

impl Triangulation {
    pub fn new(points: &[Point]) -> Result<Self, TriangulationError> {
        Self::with_super_scale(points, DEFAULT_SUPER_TRIANGLE_SCALE)
    }

    /// Triangulates `points`, which should be pairwise distinct. `scale` is how many times the
    /// larger bounding box extent the super-triangle reaches out.
    pub fn with_super_scale(points: &[Point], scale: f64) -> Result<Self, TriangulationError> {
        if points.len() < 3 {
            return Err(TriangulationError::TooFewPoints(points.len()));
        }

        if let Some(index) = points
            .iter()
            .position(|p| !p.x().is_finite() || !p.y().is_finite())
        {
            return Err(TriangulationError::NonFinite(index));
        }

        let mut scale = if scale.is_finite() && scale > 1.0 {
            scale
        } else {
            DEFAULT_SUPER_TRIANGLE_SCALE
        };

        let mut this = Self::build(points, scale);

        // A flat point set has huge circumcircles that can swallow a super vertex, leaving some
        // points with no triangle of their own. Push the super-triangle further out then.
        for _ in 0..SUPER_TRIANGLE_RETRIES {
            if this.reaches_every_point() {
                break;
            }

            scale *= SUPER_TRIANGLE_GROWTH;
            debug!(
                "super-triangle too tight for {} points, retrying at scale {}",
                points.len(),
                scale
            );
            this = Self::build(points, scale);
        }

        Ok(this)
    }

    fn build(points: &[Point], scale: f64) -> Self {
        let mut this = Self {
            points: points.to_vec(),
            super_vertices: super_triangle(points, scale),
            triangles: Vec::new(),
        };

        if let Some(seed) = this.make_triangle([
            Trianvertex::Super(0),
            Trianvertex::Super(1),
            Trianvertex::Super(2),
        ]) {
            this.triangles.push(seed);
        }

        for index in 0..this.points.len() {
            this.insert(index);
        }

        this.triangles.retain(|triangle| !triangle.is_super());
        trace!(
            "triangulated {} points into {} triangles",
            this.points.len(),
            this.triangles.len()
        );

        this
    }

    /// Whether every input point is a corner of some remaining triangle.
    pub fn reaches_every_point(&self) -> bool {
        let mut reached = vec![false; self.points.len()];

        for triangle in &self.triangles {
            for index in triangle.vertices.iter().filter_map(|vertex| vertex.input()) {
                reached[index] = true;
            }
        }

        reached.into_iter().all(|reached| reached)
    }

    fn insert(&mut self, index: usize) {
        let p = self.points[index];

        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = self
            .triangles
            .drain(..)
            .partition(|triangle| triangle.circumcircle.contains_point(p));
        self.triangles = good;

        let polygon: Vec<TrianEdge> = bad.iter().flat_map(|triangle| triangle.edges()).collect();

        // Edges shared by two bad triangles are interior to the cavity.
        let mut occurrences: HashMap<(Trianvertex, Trianvertex), usize> = HashMap::new();
        for edge in &polygon {
            *occurrences.entry(edge.canonical()).or_default() += 1;
        }

        for edge in polygon {
            if occurrences[&edge.canonical()] != 1 {
                continue;
            }

            match self.make_triangle([edge.from, edge.to, Trianvertex::Input(index)]) {
                Some(triangle) => self.triangles.push(triangle),
                None => trace!("skipping degenerate triangle at point {}", index),
            }
        }
    }

    fn make_triangle(&self, vertices: [Trianvertex; 3]) -> Option<Triangle> {
        let [a, b, c] = vertices.map(|vertex| self.position(vertex));

        Some(Triangle {
            vertices,
            circumcircle: math::circumcircle(a, b, c)?,
        })
    }

    pub fn position(&self, vertex: Trianvertex) -> Point {
        match vertex {
            Trianvertex::Input(index) => self.points[index],
            Trianvertex::Super(index) => self.super_vertices[index],
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Input-point index pairs of every triangle side. Sides shared by two triangles come out
    /// twice, once per triangle.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.triangles
            .iter()
            .flat_map(|triangle| triangle.edges())
            .filter_map(|edge| Some((edge.from.input()?, edge.to.input()?)))
    }
}

fn super_triangle(points: &[Point], scale: f64) -> [Point; 3] {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);

    for p in points {
        min_x = min_x.min(p.x());
        min_y = min_y.min(p.y());
        max_x = max_x.max(p.x());
        max_y = max_y.max(p.y());
    }

    let delta_max = match (max_x - min_x).max(max_y - min_y) {
        delta if delta > 0.0 => delta,
        _ => 1.0,
    };
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    [
        point! {x: mid_x - scale * delta_max, y: mid_y - delta_max},
        point! {x: mid_x, y: mid_y + scale * delta_max},
        point! {x: mid_x + scale * delta_max, y: mid_y - delta_max},
    ]
}
