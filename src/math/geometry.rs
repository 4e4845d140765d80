//! Planar geometry helpers shared by extraction, stitching and rendering
//!
//! All coordinates live in design space, where one tile spans
//! `DESIGN_SIZE` units on each side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A coordinate pair in design space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing to the right
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite numbers
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Multiply both coordinates by a uniform factor
    #[must_use]
    pub const fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scaled(rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Squared Euclidean distance between two points
///
/// Stitching compares against `tolerance²`, so the square root is never needed.
pub fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx.mul_add(dx, dy * dy)
}

/// Rotate `point` about `center` using precomputed `(cos, sin)` coefficients
///
/// Standard mathematical convention: `x' = x·cos − y·sin`, `y' = x·sin + y·cos`.
/// With the y axis pointing down this turns clockwise on screen.
pub fn rotate_about(point: Point, center: Point, (cos, sin): (f64, f64)) -> Point {
    let relative = point - center;
    Point::new(
        relative.x.mul_add(cos, -(relative.y * sin)) + center.x,
        relative.x.mul_add(sin, relative.y * cos) + center.y,
    )
}

/// Elevate a quadratic Bézier to the equivalent cubic
///
/// `c1 = p0 + ⅔(p1 − p0)` and `c2 = p2 + ⅔(p1 − p2)`; endpoints are kept
/// bit-for-bit so neighbouring tiles still meet exactly.
pub fn quad_to_cubic([p0, p1, p2]: [Point; 3]) -> [Point; 4] {
    let two_thirds = 2.0 / 3.0;
    let c1 = p0 + (p1 - p0) * two_thirds;
    let c2 = p2 + (p1 - p2) * two_thirds;
    [p0, c1, c2, p2]
}
