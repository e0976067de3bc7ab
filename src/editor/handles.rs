//! Room resize handles
//!
//! Every room exposes a box handle: a center and half-size in fractional
//! cell coordinates, with one grab point at the midpoint of each edge.
//! Dragging an edge moves only that edge; the result is rounded back onto
//! the grid with `points_to_bounds`.

use macroquad::math::Vec2;
use crate::world::{IntBounds, RoomCollection, points_to_bounds};

/// Grab distance around an edge midpoint, in cells
pub const HANDLE_PICK_RADIUS: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
    Bottom,
    Top,
}

impl HandleSide {
    pub const ALL: [HandleSide; 4] = [HandleSide::Left, HandleSide::Right, HandleSide::Bottom, HandleSide::Top];
}

/// Center / half-size pair describing a room while it is being resized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBoundsHandle {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl BoxBoundsHandle {
    pub fn new(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size }
    }

    pub fn from_bounds(bounds: &IntBounds) -> Self {
        Self {
            center: bounds.center(),
            half_size: bounds.size.as_vec2() * 0.5,
        }
    }

    /// Grab point of one edge
    pub fn midpoint(&self, side: HandleSide) -> Vec2 {
        let offset = match side {
            HandleSide::Left => Vec2::new(-self.half_size.x, 0.0),
            HandleSide::Right => Vec2::new(self.half_size.x, 0.0),
            HandleSide::Bottom => Vec2::new(0.0, -self.half_size.y),
            HandleSide::Top => Vec2::new(0.0, self.half_size.y),
        };
        self.center + offset
    }

    /// Closest edge midpoint within `radius` of `point`
    pub fn hit_test(&self, point: Vec2, radius: f32) -> Option<HandleSide> {
        HandleSide::ALL
            .iter()
            .map(|&side| (side, self.midpoint(side).distance(point)))
            .filter(|&(_, dist)| dist <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(side, _)| side)
    }

    /// Move one edge to `point`, keeping the opposite edge fixed
    pub fn drag_to(&mut self, side: HandleSide, point: Vec2) {
        let min = self.center - self.half_size;
        let max = self.center + self.half_size;

        let (min, max) = match side {
            HandleSide::Left => (Vec2::new(point.x, min.y), max),
            HandleSide::Right => (min, Vec2::new(point.x, max.y)),
            HandleSide::Bottom => (Vec2::new(min.x, point.y), max),
            HandleSide::Top => (min, Vec2::new(max.x, point.y)),
        };

        self.center = (min + max) * 0.5;
        self.half_size = (max - min) * 0.5;
    }

    /// Snap back onto the grid. Edges crossed over each other are swapped.
    pub fn to_bounds(&self) -> IntBounds {
        let p1 = (self.center - self.half_size).round().as_ivec2();
        let p2 = (self.center + self.half_size).round().as_ivec2();
        points_to_bounds(p1, p2)
    }
}

/// Edge currently held by the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGrab {
    pub room: usize,
    pub side: HandleSide,
    pub handle: BoxBoundsHandle,
}

/// Resize handles of all rooms. Only the grabbed one keeps state between
/// events; the rest are derived from the room bounds on demand.
#[derive(Debug, Default)]
pub struct RoomHandles {
    grabbed: Option<HandleGrab>,
}

impl RoomHandles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grabbed(&self) -> Option<&HandleGrab> {
        self.grabbed.as_ref()
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Handles of every room, in room order
    pub fn all(rooms: &RoomCollection) -> impl Iterator<Item = (usize, BoxBoundsHandle)> + '_ {
        rooms
            .iter()
            .enumerate()
            .map(|(i, room)| (i, BoxBoundsHandle::from_bounds(&room.bounds)))
    }

    /// Grab the edge under `point` (cell space). Later rooms win ties, since
    /// they are drawn on top.
    pub fn try_grab(&mut self, rooms: &RoomCollection, point: Vec2) -> bool {
        let hit = Self::all(rooms)
            .filter_map(|(room, handle)| {
                handle
                    .hit_test(point, HANDLE_PICK_RADIUS)
                    .map(|side| HandleGrab { room, side, handle })
            })
            .last();

        self.grabbed = hit;
        hit.is_some()
    }

    /// Move the grabbed edge. Returns the room and its handle to apply.
    pub fn drag(&mut self, point: Vec2) -> Option<(usize, BoxBoundsHandle)> {
        let grab = self.grabbed.as_mut()?;
        grab.handle.drag_to(grab.side, point);
        Some((grab.room, grab.handle))
    }

    pub fn release(&mut self) -> Option<HandleGrab> {
        self.grabbed.take()
    }
}
