//! Point-in-polygon tests.
//!
//! Ray casting along +x with the even-odd rule. Each edge is tested against
//! the half-open interval `(a.y > y) != (b.y > y)`, so a vertex lying exactly
//! on the ray is counted once. Boundary points are detected separately with an
//! exact collinearity test and count as contained: a point on an outer ring's
//! edge or on a hole's edge is inside the polygon.

use crate::models::{NamedRegion, Point, Polygon, Ring};

/// Where a point sits relative to a single ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingPosition {
    Inside,
    Boundary,
    Outside,
}

/// Inclusive containment test
pub trait ContainsPoint {
    fn contains_point(&self, point: Point) -> bool;
}

/// Endpoints in lexicographic `(x, y)` order. Neighbouring rings list a shared
/// edge in opposite directions; both must evaluate the same float expression.
fn canonical(a: Point, b: Point) -> (Point, Point) {
    if (a.x, a.y) <= (b.x, b.y) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Does `p` lie on the closed segment `a`-`b`?
fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let (a, b) = canonical(a, b);
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross != 0.0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Even-odd crossing count for a ray from `p` towards +x
fn ray_crossings_odd(ring: &Ring, p: Point) -> bool {
    let mut inside = false;
    for (a, b) in ring.edges() {
        let (a, b) = canonical(a, b);
        if (a.y > p.y) != (b.y > p.y) {
            // a.y != b.y is guaranteed by the interval test
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Classify a point against one ring
pub fn locate(ring: &Ring, p: Point) -> RingPosition {
    if ring.edges().any(|(a, b)| on_segment(p, a, b)) {
        RingPosition::Boundary
    } else if ray_crossings_odd(ring, p) {
        RingPosition::Inside
    } else {
        RingPosition::Outside
    }
}

impl ContainsPoint for Ring {
    fn contains_point(&self, point: Point) -> bool {
        locate(self, point) != RingPosition::Outside
    }
}

impl ContainsPoint for Polygon {
    fn contains_point(&self, point: Point) -> bool {
        if !self.bbox().contains(point) {
            return false;
        }

        match locate(self.exterior(), point) {
            RingPosition::Outside => false,
            RingPosition::Boundary => true,
            // Strictly inside a hole removes the point; a hole's edge still belongs to the polygon
            RingPosition::Inside => self
                .holes()
                .iter()
                .all(|hole| locate(hole, point) != RingPosition::Inside),
        }
    }
}

impl ContainsPoint for NamedRegion {
    fn contains_point(&self, point: Point) -> bool {
        self.polygons.iter().any(|poly| poly.contains_point(point))
    }
}
