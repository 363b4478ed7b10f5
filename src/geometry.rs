//! Axis-aligned boxes, playfield containment and direction vectors.

use glam::Vec2;

use crate::constants::{HEIGHT, WIDTH};

/// Direction used when two points coincide and no heading can be derived.
pub const FALLBACK_DIRECTION: Vec2 = Vec2::new(0.0, 1.0);

/// An axis-aligned box described by its center and full size.
/// Screen coordinates: +x is right, +y is down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Rect { center, size }
    }

    /// The whole playfield, `[0, WIDTH] × [0, HEIGHT]`.
    pub fn playfield() -> Self {
        Rect::new(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Vec2::new(WIDTH, HEIGHT))
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Strict intersection: boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis result of testing a box against the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Containment {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Containment {
    pub fn is_inside(&self) -> bool {
        self.horizontal && self.vertical
    }
}

/// Check whether `rect` lies within the playfield on each axis.
pub fn check_bound(rect: &Rect) -> Containment {
    Containment {
        horizontal: rect.left() >= 0.0 && rect.right() <= WIDTH,
        vertical: rect.top() >= 0.0 && rect.bottom() <= HEIGHT,
    }
}

/// Unit vector pointing from `from` towards `to`.
///
/// Coincident points have no direction; [`FALLBACK_DIRECTION`] (straight
/// down) is returned instead of dividing by zero.
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    let diff = to - from;
    let norm = diff.length();
    if norm <= f32::EPSILON {
        FALLBACK_DIRECTION
    } else {
        diff / norm
    }
}

/// Unit vector for an angle in degrees, measured counter-clockwise from +x
/// as seen on screen (hence the negated y).
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), -radians.sin())
}

/// Screen angle in degrees of a (not necessarily unit) heading.
pub fn degrees_of(heading: Vec2) -> f32 {
    (-heading.y).atan2(heading.x).to_degrees()
}

/// Bounding-box size of a `size` box after rotating it by `degrees`.
pub fn rotated_extent(size: Vec2, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
