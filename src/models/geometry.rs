//! Planar geometry primitives for region boundaries.
//!
//! Coordinates are treated as Cartesian: `x` is longitude, `y` is latitude.
//! Constructors trust their caller; shape validation happens in the loader.

/// Geographic point with `x = lon`, `y = lat`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from latitude/longitude, swapping into x/y order
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self { x: lon, y: lat }
    }

    pub fn lon(&self) -> f64 {
        self.x
    }

    pub fn lat(&self) -> f64 {
        self.y
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all points. `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points[1..].iter().fold(init, |bb, p| Self {
            min_x: bb.min_x.min(p.x),
            min_y: bb.min_y.min(p.y),
            max_x: bb.max_x.max(p.x),
            max_y: bb.max_y.max(p.y),
        }))
    }

    /// Inclusive of edges, so boundary points are never rejected here
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Union of two boxes
    pub fn merge(&self, other: &BoundingBox) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Closed loop of points. The last point implicitly connects back to the first;
/// an explicit closing point (as GeoJSON writes it) is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over edges `(a, b)`, including the closing edge last -> first
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// One outer ring with zero or more holes and the outer ring's cached bbox
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
    bbox: BoundingBox,
}

impl Polygon {
    /// Build a polygon, computing the bounding box of the outer ring once.
    ///
    /// An empty exterior gets a degenerate box at the origin; the loader never
    /// produces one.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        let bbox = exterior
            .bbox()
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        Self {
            exterior,
            holes,
            bbox,
        }
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}
