//! Rooms and the ordered room collection
//!
//! A room's position in the collection is its identity. The derived trigger
//! volume and camera rig for room `i` always live at index `i` too, so any
//! removal must be followed by a resync of the derived geometry.

use macroquad::math::IVec2;
use serde::{Serialize, Deserialize};
use super::{IntBounds, intersects, contains, points_to_bounds};

/// Rooms narrower or shorter than this (in cells) cannot be created
pub const MIN_ROOM_SIZE: i32 = 4;

/// A rectangular region of the level plus its camera framing override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RoomRecord", into = "RoomRecord")]
pub struct Room {
    /// Bounds in cell space
    pub bounds: IntBounds,
    /// Camera size is driven manually instead of fitted to the bounds
    pub custom_camera_size: bool,
}

impl Room {
    pub fn new(bounds: IntBounds) -> Self {
        Self { bounds, custom_camera_size: false }
    }

    pub fn with_custom_camera_size(mut self, custom: bool) -> Self {
        self.custom_camera_size = custom;
        self
    }
}

/// True if bounds are large enough for a new room
pub fn meets_min_size(bounds: &IntBounds) -> bool {
    bounds.size.x >= MIN_ROOM_SIZE && bounds.size.y >= MIN_ROOM_SIZE
}

/// On-disk shape of a room
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomRecord {
    bounds_origin: (i32, i32),
    bounds_size: (i32, i32),
    #[serde(default)]
    custom_camera_size: bool,
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        let (x, y) = record.bounds_origin;
        let (w, h) = record.bounds_size;
        let corner = IVec2::new(x.saturating_add(w), y.saturating_add(h));
        Room {
            bounds: points_to_bounds(IVec2::new(x, y), corner),
            custom_camera_size: record.custom_camera_size,
        }
    }
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        RoomRecord {
            bounds_origin: (room.bounds.min.x, room.bounds.min.y),
            bounds_size: (room.bounds.size.x, room.bounds.size.y),
            custom_camera_size: room.custom_camera_size,
        }
    }
}

/// Ordered list of rooms. Append-only except for explicit removal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCollection {
    rooms: Vec<Room>,
}

impl RoomCollection {
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Add a room at the end and return its index
    pub fn append(&mut self, room: Room) -> usize {
        let index = self.rooms.len();
        self.rooms.push(room);
        index
    }

    /// Remove room `index`. Every later room shifts down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<Room> {
        if index < self.rooms.len() {
            Some(self.rooms.remove(index))
        } else {
            None
        }
    }

    /// Replace the bounds of a room in place. Returns false if out of range.
    pub fn set_bounds(&mut self, index: usize, bounds: IntBounds) -> bool {
        match self.rooms.get_mut(index) {
            Some(room) => {
                room.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Room> {
        self.rooms.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn as_slice(&self) -> &[Room] {
        &self.rooms
    }

    /// Index of the room covering a cell. Rooms never share a cell, so
    /// at most one matches.
    pub fn find_at(&self, cell: IVec2) -> Option<usize> {
        self.rooms.iter().position(|room| room.bounds.contains_cell(cell))
    }

    /// Whether any room contains the cell, counting edges as inside
    pub fn any_contains(&self, cell: IVec2) -> bool {
        self.rooms.iter().any(|room| contains(&room.bounds, cell))
    }

    /// Overlap rectangles between `bounds` and every room it intersects
    pub fn overlaps(&self, bounds: &IntBounds) -> Vec<IntBounds> {
        self.rooms
            .iter()
            .filter_map(|room| intersects(bounds, &room.bounds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(x: i32, y: i32, w: i32, h: i32) -> Room {
        Room::new(IntBounds::from_xywh(x, y, w, h))
    }

    #[test]
    fn test_append_returns_previous_len() {
        let mut rooms = RoomCollection::new();
        assert_eq!(rooms.append(room(0, 0, 5, 5)), 0);
        assert_eq!(rooms.append(room(10, 0, 5, 5)), 1);
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn test_remove_shifts_following_rooms() {
        let mut rooms = RoomCollection::new();
        for i in 0..5 {
            rooms.append(room(i * 10, 0, 5, 5));
        }
        let before = rooms.clone();

        let removed = rooms.remove_at(2).unwrap();
        assert_eq!(removed, before.as_slice()[2]);
        assert_eq!(rooms.len(), 4);

        for i in 0..2 {
            assert_eq!(rooms.get(i), before.get(i));
        }
        for i in 3..5 {
            assert_eq!(rooms.get(i - 1), before.get(i));
        }

        assert!(rooms.remove_at(10).is_none());
        assert_eq!(rooms.len(), 4);
    }

    #[test]
    fn test_set_bounds_keeps_index() {
        let mut rooms = RoomCollection::new();
        rooms.append(room(0, 0, 5, 5));
        rooms.append(room(10, 0, 5, 5));

        // No overlap check after creation
        assert!(rooms.set_bounds(1, IntBounds::from_xywh(2, 2, 1, 1)));
        assert_eq!(rooms.get(1).unwrap().bounds, IntBounds::from_xywh(2, 2, 1, 1));
        assert!(!rooms.set_bounds(2, IntBounds::default()));
    }

    #[test]
    fn test_overlaps_and_lookup() {
        let mut rooms = RoomCollection::new();
        rooms.append(room(0, 0, 5, 5));
        rooms.append(room(5, 0, 5, 5));

        let probe = IntBounds::from_xywh(3, 1, 4, 2);
        assert_eq!(
            rooms.overlaps(&probe),
            vec![IntBounds::from_xywh(3, 1, 2, 2), IntBounds::from_xywh(5, 1, 2, 2)]
        );

        assert_eq!(rooms.find_at(IVec2::new(7, 2)), Some(1));
        assert_eq!(rooms.find_at(IVec2::new(4, 2)), Some(0));
        // Cell 5 is the first column of the second room
        assert_eq!(rooms.find_at(IVec2::new(5, 2)), Some(1));
        assert!(!rooms.any_contains(IVec2::new(20, 20)));
    }

    #[test]
    fn test_find_at_excludes_far_edge() {
        let mut rooms = RoomCollection::new();
        rooms.append(room(0, 0, 5, 5));

        assert_eq!(rooms.find_at(IVec2::new(5, 2)), None);
        assert_eq!(rooms.find_at(IVec2::new(2, 5)), None);
        // Hover still treats the edge as part of the room
        assert!(rooms.any_contains(IVec2::new(5, 2)));
    }

    #[test]
    fn test_min_size() {
        assert!(meets_min_size(&IntBounds::from_xywh(0, 0, 4, 4)));
        assert!(!meets_min_size(&IntBounds::from_xywh(0, 0, 3, 10)));
        assert!(!meets_min_size(&IntBounds::from_xywh(0, 0, 10, 3)));
    }
}
