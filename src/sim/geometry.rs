//! Static axis-aligned level geometry
//!
//! Walls always block. Doors block only while closed, and a door only ever
//! goes from closed to open.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB intersection (touching edges do not overlap)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// True if the rectangle has a positive, finite area
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// A purchasable door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: u32,
    pub rect: Rect,
    pub cost: u32,
    is_open: bool,
}

impl Door {
    pub fn new(id: u32, rect: Rect, cost: u32) -> Self {
        Self {
            id,
            rect,
            cost,
            is_open: false,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the door. Returns true only on the closed -> open transition.
    pub fn open(&mut self) -> bool {
        let was_closed = !self.is_open;
        self.is_open = true;
        was_closed
    }
}

/// World extent; positions live in `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a center so a square of side `size` stays inside the world
    pub fn clamp(&self, pos: Vec2, size: f32) -> Vec2 {
        let half = size / 2.0;
        Vec2::new(
            pos.x.clamp(half, (self.width - half).max(half)),
            pos.y.clamp(half, (self.height - half).max(half)),
        )
    }

    /// Strictly inside the world rectangle
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }
}

/// Walls and doors of the current session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub walls: Vec<Rect>,
    pub doors: Vec<Door>,
}

impl Geometry {
    pub fn new(walls: Vec<Rect>, doors: Vec<Door>) -> Self {
        Self { walls, doors }
    }

    /// True iff a square of side `size` centered at `pos` overlaps any wall
    /// or any closed door
    pub fn is_blocked(&self, pos: Vec2, size: f32) -> bool {
        let probe = Rect::centered(pos, size);
        self.walls.iter().any(|w| probe.overlaps(w))
            || self
                .doors
                .iter()
                .any(|d| !d.is_open() && probe.overlaps(&d.rect))
    }

    pub fn door(&self, id: u32) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn door_mut(&mut self, id: u32) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.id == id)
    }
}
