//! Integer rectangles and world/tile coordinate conversion.
//!
//! Hitboxes and capture zones are integer rectangles in world units, the
//! same representation the host uses for collision queries. Tile-space
//! regions reuse the same type with tile units.

use glam::{IVec2, Vec2};

/// Edge length of one tile in world units.
pub const TILE_SIZE: f32 = 16.0;

/// Converts a world position to the tile that contains it.
///
/// Truncates toward zero, matching the host's integer cast.
#[inline]
pub fn to_tile(world: Vec2) -> IVec2 {
    (world / TILE_SIZE).as_ivec2()
}

/// Axis-aligned integer rectangle (`x`, `y` is the top-left corner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a body whose top-left corner is `position`.
    pub fn from_body(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(position.x as i32, position.y as i32, width as i32, height as i32)
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(
            (center.x - size.x / 2.0) as i32,
            (center.y - size.y / 2.0) as i32,
            size.x as i32,
            size.y as i32,
        )
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict overlap test; touching edges do not intersect.
    pub const fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub const fn contains(&self, point: IVec2) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// Grows the rectangle by `dx` on both horizontal sides and `dy` on both
    /// vertical sides. Negative values shrink it.
    #[must_use]
    pub const fn inflate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2,
            self.height + dy * 2,
        )
    }

    /// Overlapping region of two rectangles, or [`Rect::EMPTY`].
    #[must_use]
    pub fn intersection(self, other: Rect) -> Self {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Self::new(left, top, right - left, bottom - top)
        } else {
            Self::EMPTY
        }
    }

    /// Point inside the rectangle (edges included) nearest to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left() as f32, self.right() as f32),
            point.y.clamp(self.top() as f32, self.bottom() as f32),
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}
