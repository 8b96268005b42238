//! Arena geometry with toroidal boundary topology.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An integer coordinate inside (or destined to be wrapped into) the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Signed offset from `self` to `other` (no wrapping shortcut taken).
    pub fn offset_to(&self, other: Point) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(&self, other: Point) -> i64 {
        (self.x - other.x).abs() as i64 + (self.y - other.y).abs() as i64
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Bounded 2-D arena with toroidal wrapping.
///
/// Positions live in `[0, width) × [0, height)`; exiting one edge re-enters
/// at the opposite edge. Movement is never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    width: i32,
    height: i32,
}

impl Arena {
    /// Create an arena. Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "arena dimensions must be positive");
        Arena { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Center of the arena, where the agent starts each episode.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    /// Wrap a point into the arena bounds (toroidal topology).
    pub fn wrap(&self, point: Point) -> Point {
        Point::new(point.x.rem_euclid(self.width), point.y.rem_euclid(self.height))
    }

    /// Whether a point already lies within bounds.
    pub fn contains(&self, point: Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    /// Translate `point` by `delta` scaled by `step`, wrapping the result.
    pub fn translate(&self, point: Point, delta: (i32, i32), step: i32) -> Point {
        self.wrap(Point::new(point.x + delta.0 * step, point.y + delta.1 * step))
    }
}
