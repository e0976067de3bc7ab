//! Undo/redo for room edits
//!
//! Whole-list snapshots, like the level snapshots the 3D editor keeps. Room
//! lists are tiny, so copying them beats tracking individual operations.

use log::debug;
use crate::game::RoomManager;
use crate::world::RoomCollection;

/// Oldest snapshots are dropped past this many
pub const UNDO_LIMIT: usize = 100;

#[derive(Debug, Clone)]
struct Snapshot {
    label: &'static str,
    rooms: RoomCollection,
}

#[derive(Debug, Default)]
pub struct UndoStack {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the room list as it is before an edit named `label`
    pub fn save(&mut self, label: &'static str, rooms: &RoomCollection) {
        self.undo.push(Snapshot { label, rooms: rooms.clone() });
        self.redo.clear();

        if self.undo.len() > UNDO_LIMIT {
            self.undo.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the edit the next undo reverts
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo.last().map(|s| s.label)
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo.last().map(|s| s.label)
    }

    /// Restore the previous room list. Returns the reverted edit's label.
    pub fn undo(&mut self, manager: &mut RoomManager) -> Option<&'static str> {
        let snapshot = self.undo.pop()?;
        self.redo.push(Snapshot { label: snapshot.label, rooms: manager.rooms().clone() });
        debug!("Undo: {}", snapshot.label);
        manager.replace_rooms(snapshot.rooms);
        Some(snapshot.label)
    }

    pub fn redo(&mut self, manager: &mut RoomManager) -> Option<&'static str> {
        let snapshot = self.redo.pop()?;
        self.undo.push(Snapshot { label: snapshot.label, rooms: manager.rooms().clone() });
        debug!("Redo: {}", snapshot.label);
        manager.replace_rooms(snapshot.rooms);
        Some(snapshot.label)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
