//! Cell space <-> world space mapping

use macroquad::math::{IVec2, Rect, Vec2};
use crate::error::RoomError;
use super::IntBounds;

/// Uniform tile grid: an origin in world units plus the world size of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    origin: Vec2,
    cell_size: Vec2,
}

impl Grid {
    /// Create a grid. Cell sizes must be positive and finite.
    pub fn new(origin: Vec2, cell_size: Vec2) -> Result<Self, RoomError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(cell_size.x) || !valid(cell_size.y) {
            return Err(RoomError::InvalidGrid { x: cell_size.x, y: cell_size.y });
        }
        Ok(Self { origin, cell_size })
    }

    /// One world unit per cell, origin at zero
    pub fn unit() -> Self {
        Self { origin: Vec2::ZERO, cell_size: Vec2::ONE }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Cell containing a world position
    pub fn world_to_cell(&self, world: Vec2) -> IVec2 {
        self.world_to_cell_point(world).floor().as_ivec2()
    }

    /// World position in fractional cell coordinates
    pub fn world_to_cell_point(&self, world: Vec2) -> Vec2 {
        (world - self.origin) / self.cell_size
    }

    /// World position of a cell's min corner
    pub fn cell_to_world(&self, cell: IVec2) -> Vec2 {
        self.cell_point_to_world(cell.as_vec2())
    }

    pub fn cell_point_to_world(&self, point: Vec2) -> Vec2 {
        self.origin + point * self.cell_size
    }

    /// World rectangle covered by a cell-space bounds
    pub fn bounds_to_world(&self, bounds: &IntBounds) -> Rect {
        let min = self.cell_to_world(bounds.min);
        let size = bounds.size.as_vec2() * self.cell_size;
        Rect::new(min.x, min.y, size.x, size.y)
    }

    /// World rectangle of a single cell
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        let min = self.cell_to_world(cell);
        Rect::new(min.x, min.y, self.cell_size.x, self.cell_size.y)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_cell_size() {
        assert!(Grid::new(Vec2::ZERO, Vec2::new(0.0, 1.0)).is_err());
        assert!(Grid::new(Vec2::ZERO, Vec2::new(1.0, -2.0)).is_err());
        assert!(Grid::new(Vec2::ZERO, Vec2::new(f32::NAN, 1.0)).is_err());
        assert!(Grid::new(Vec2::ZERO, Vec2::new(0.5, 2.0)).is_ok());
    }

    #[test]
    fn test_world_to_cell_floors() {
        let grid = Grid::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0)).unwrap();

        assert_eq!(grid.world_to_cell(Vec2::new(10.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(grid.world_to_cell(Vec2::new(13.9, 3.9)), IVec2::new(1, 1));
        assert_eq!(grid.world_to_cell(Vec2::new(9.9, -0.1)), IVec2::new(-1, -1));
    }

    #[test]
    fn test_bounds_to_world() {
        let grid = Grid::new(Vec2::new(1.0, 1.0), Vec2::new(0.5, 2.0)).unwrap();
        let rect = grid.bounds_to_world(&IntBounds::from_xywh(2, 1, 4, 4));

        assert_eq!(rect.x, 2.0);
        assert_eq!(rect.y, 3.0);
        assert_eq!(rect.w, 2.0);
        assert_eq!(rect.h, 8.0);
    }
}
