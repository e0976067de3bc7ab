//! Integer rectangle math in cell space
//!
//! Rooms are axis-aligned rectangles on the tile grid. A bounds covers the
//! half-open cell range `[min, min + size)` on each axis, so two rooms that
//! only share an edge or a corner do not overlap.

use macroquad::math::{IVec2, Vec2};

/// Axis-aligned integer rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntBounds {
    pub min: IVec2,
    pub size: IVec2,
}

impl IntBounds {
    /// Build bounds from an origin and size. A negative size is normalized
    /// so the result always has a non-negative extent.
    pub fn new(min: IVec2, size: IVec2) -> Self {
        points_to_bounds(min, min + size)
    }

    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(IVec2::new(x, y), IVec2::new(w, h))
    }

    /// Exclusive upper corner
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Center in (fractional) cell coordinates
    pub fn center(&self) -> Vec2 {
        self.min.as_vec2() + self.size.as_vec2() * 0.5
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// Whether `cell` is one of the covered cells. Half-open, unlike
    /// `contains`: the row and column at `max()` are outside.
    pub fn contains_cell(&self, cell: IVec2) -> bool {
        let max = self.max();
        cell.x >= self.min.x && cell.x < max.x
            && cell.y >= self.min.y && cell.y < max.y
    }
}

/// Smallest rectangle spanning two corner points.
///
/// The points become the min and max corners, so `size = max - min`.
/// Argument order does not matter.
pub fn points_to_bounds(p1: IVec2, p2: IVec2) -> IntBounds {
    let min = p1.min(p2);
    let max = p1.max(p2);
    IntBounds { min, size: max - min }
}

/// Overlap of two rectangles, if they share a positive area.
///
/// Touching along an edge or at a corner is not an intersection.
pub fn intersects(a: &IntBounds, b: &IntBounds) -> Option<IntBounds> {
    let min = a.min.max(b.min);
    let max = a.max().min(b.max());

    if min.x < max.x && min.y < max.y {
        Some(IntBounds { min, size: max - min })
    } else {
        None
    }
}

/// Inclusive containment: a point lying on any edge counts as inside.
pub fn contains(bounds: &IntBounds, point: IVec2) -> bool {
    let max = bounds.max();
    point.x >= bounds.min.x && point.x <= max.x
        && point.y >= bounds.min.y && point.y <= max.y
}
