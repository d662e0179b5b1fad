use serde::{Deserialize, Serialize};

use crate::error::{Result, finite, positive};
use crate::phase::Phase;

/// A position in surface coordinates (origin top-left, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Extent of the drawing area supplied by the surface provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Strict containment: points on the border count as outside.
    pub fn contains(self, p: Point) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The circle oscillators are drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
}

impl Ring {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        let ring = Self { center, radius };
        ring.validate()?;
        Ok(ring)
    }

    /// Centered on the surface; radius = min(w/2, h/2) * scale.
    pub fn for_surface(size: SurfaceSize, scale: f64) -> Result<Self> {
        let center = size.center();
        Self::new(center, center.x.min(center.y) * scale)
    }

    pub fn validate(&self) -> Result<()> {
        finite("center.x", self.center.x)?;
        finite("center.y", self.center.y)?;
        positive("radius", self.radius)?;
        Ok(())
    }

    pub fn position(&self, phase: Phase) -> Point {
        let (cos, sin) = phase.unit();
        Point::new(
            self.center.x + self.radius * cos,
            self.center.y + self.radius * sin,
        )
    }
}

/// Latest pointer sample from the pointer tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum PointerState {
    #[default]
    Absent,
    At(Point),
}

impl PointerState {
    pub fn at(x: f64, y: f64) -> Self {
        PointerState::At(Point::new(x, y))
    }

    pub fn point(self) -> Option<Point> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(p),
        }
    }

    /// The pointer position if the surface strictly contains it.
    pub fn inside(self, size: SurfaceSize) -> Option<Point> {
        self.point().filter(|p| size.contains(*p))
    }
}
