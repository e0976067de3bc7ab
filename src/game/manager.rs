//! Room manager
//!
//! Owns the room list together with everything derived from it. All room
//! mutations go through here so the trigger volumes and camera rigs are
//! resynced after every change.

use log::{debug, info, warn};
use macroquad::math::Vec2;
use crate::config::RoomConfig;
use crate::error::RoomError;
use crate::gizmo::{self, GizmoRenderer};
use crate::world::{Grid, IntBounds, Room, RoomCollection};
use super::derived::{DerivedGeometry, SyncReport, TargetId};
use super::transition::{CameraSwitch, RoomTransitionController};

pub struct RoomManager {
    rooms: RoomCollection,
    derived: DerivedGeometry,
    grid: Grid,
    config: RoomConfig,
    follow: Option<TargetId>,
}

impl RoomManager {
    /// Empty manager. Fails on an invalid config.
    pub fn new(config: RoomConfig) -> Result<Self, RoomError> {
        Self::with_rooms(RoomCollection::new(), config)
    }

    /// Manager for previously authored or loaded rooms
    pub fn with_rooms(rooms: RoomCollection, config: RoomConfig) -> Result<Self, RoomError> {
        config.validate()?;
        let grid = config.grid()?;

        let mut manager = Self {
            rooms,
            derived: DerivedGeometry::new(),
            grid,
            config,
            follow: None,
        };
        manager.resync();
        Ok(manager)
    }

    pub fn rooms(&self) -> &RoomCollection {
        &self.rooms
    }

    pub fn derived(&self) -> &DerivedGeometry {
        &self.derived
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn follow_target(&self) -> Option<TargetId> {
        self.follow
    }

    /// Camera rigs, for controllers that switch them
    pub fn cameras_mut(&mut self) -> &mut dyn CameraSwitch {
        &mut self.derived
    }

    /// Set the agent every camera rig follows
    pub fn set_follow_target(&mut self, target: Option<TargetId>) {
        self.follow = target;
        self.resync();
    }

    /// Swap in new settings (grid, framing). Rejected configs leave the
    /// manager unchanged.
    pub fn set_config(&mut self, config: RoomConfig) -> Result<(), RoomError> {
        config.validate()?;
        self.grid = config.grid()?;
        self.config = config;
        self.resync();
        Ok(())
    }

    /// Append a room. Validation is the caller's job (see the edit tool).
    pub fn add_room(&mut self, room: Room) -> usize {
        let index = self.rooms.append(room);
        info!(
            "Added room {} at ({}, {}) size ({}, {})",
            index + 1,
            room.bounds.min.x, room.bounds.min.y,
            room.bounds.size.x, room.bounds.size.y
        );
        self.resync();
        index
    }

    /// Remove a room; later rooms (and their artifacts) shift down by one
    pub fn remove_room(&mut self, index: usize) -> Option<Room> {
        let room = self.rooms.remove_at(index)?;
        info!("Removed room {}, {} rooms left", index + 1, self.rooms.len());
        self.resync();
        Some(room)
    }

    /// Overwrite a room's bounds in place
    pub fn set_room_bounds(&mut self, index: usize, bounds: IntBounds) -> bool {
        if !self.rooms.set_bounds(index, bounds) {
            return false;
        }
        self.resync();
        true
    }

    pub fn set_custom_camera_size(&mut self, index: usize, custom: bool) -> bool {
        let Some(room) = self.rooms.get_mut(index) else { return false };
        room.custom_camera_size = custom;
        self.resync();
        true
    }

    /// Manually size a custom camera. Rooms with fitted cameras refuse.
    pub fn set_camera_size(&mut self, index: usize, ortho_size: f32) -> bool {
        match self.rooms.get(index) {
            Some(room) if room.custom_camera_size => self.derived.set_ortho_size(index, ortho_size),
            _ => false,
        }
    }

    /// Replace the whole list (undo, reload)
    pub fn replace_rooms(&mut self, rooms: RoomCollection) {
        self.rooms = rooms;
        self.resync();
    }

    /// Regenerate derived geometry from the room list
    pub fn resync(&mut self) -> SyncReport {
        let report = self.derived.resync(&self.rooms, &self.grid, &self.config, self.follow);
        if report.changed() {
            debug!(
                "Resynced room artifacts: {} created, {} destroyed, {} total",
                report.created, report.destroyed, self.derived.len()
            );
        }
        report
    }

    /// Run a camera transition, repairing derived geometry that lags the
    /// room list. A room that still has no rig after a resync does not exist.
    pub fn transition(&mut self, controller: &mut RoomTransitionController, room: usize) -> Result<(), RoomError> {
        match controller.trigger_transition(room, &mut self.derived) {
            Err(RoomError::DerivedOutOfSync { index, rigs }) => {
                warn!(
                    "Derived geometry out of sync (room {} requested, {} camera rigs), forcing resync",
                    index + 1, rigs
                );
                self.resync();
                controller
                    .trigger_transition(room, &mut self.derived)
                    .map_err(|_| RoomError::NoSuchRoom(room))
            }
            result => result,
        }
    }

    /// Room fills with their 1-based index labels
    pub fn draw_gizmos(&self, renderer: &mut dyn GizmoRenderer) {
        let cell = self.grid.cell_size();

        for (i, room) in self.rooms.iter().enumerate() {
            let rect = self.grid.bounds_to_world(&room.bounds);
            renderer.draw_rect(rect, gizmo::PRIMARY, gizmo::ACCENT);

            let label_pos = rect.center() + Vec2::new(-cell.x, cell.y) / 2.0;
            renderer.draw_label(label_pos, &(i + 1).to_string(), gizmo::ACCENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MembershipModel;
    use std::collections::HashSet;
    use crate::game::event::RoomEvents;
    use crate::game::transition::RuntimeUpdatable;
    use crate::gizmo::tests::GizmoLog;

    fn room(x: i32, y: i32, w: i32, h: i32) -> Room {
        Room::new(IntBounds::from_xywh(x, y, w, h))
    }

    fn manager_with(bounds: &[(i32, i32, i32, i32)]) -> RoomManager {
        let rooms = RoomCollection::from_rooms(bounds.iter().map(|&(x, y, w, h)| room(x, y, w, h)).collect());
        RoomManager::with_rooms(rooms, RoomConfig::default()).unwrap()
    }

    #[test]
    fn test_mutations_resync() {
        let mut manager = RoomManager::new(RoomConfig::default()).unwrap();
        assert!(manager.derived().is_empty());

        manager.add_room(room(0, 0, 5, 5));
        manager.add_room(room(10, 0, 5, 5));
        assert_eq!(manager.derived().len(), 2);

        manager.set_room_bounds(1, IntBounds::from_xywh(10, 0, 8, 8));
        assert_eq!(manager.derived().trigger(1).unwrap().center, Vec2::new(14.0, 4.0));

        manager.remove_room(0);
        assert_eq!(manager.derived().len(), 1);
        assert_eq!(manager.derived().trigger(0).unwrap().center, Vec2::new(14.0, 4.0));
    }

    #[test]
    fn test_remove_first_of_two() {
        let mut manager = manager_with(&[(0, 0, 5, 5), (10, 0, 6, 4)]);
        let former_second = *manager.rooms().get(1).unwrap();

        manager.remove_room(0);

        assert_eq!(manager.rooms().len(), 1);
        assert_eq!(manager.rooms().get(0), Some(&former_second));
        assert_eq!(manager.derived().len(), 1);

        let trigger = manager.derived().trigger(0).unwrap();
        assert_eq!(trigger.center, former_second.bounds.center());
        assert_eq!(trigger.world_rect().w, 6.0);
        assert_eq!(trigger.world_rect().h, 4.0);
    }

    #[test]
    fn test_remove_middle_of_many() {
        let bounds: Vec<_> = (0..6).map(|i| (i * 10, 0, 5, 5)).collect();
        let mut manager = manager_with(&bounds);
        let before = manager.rooms().clone();

        manager.remove_room(2);

        assert_eq!(manager.rooms().len(), 5);
        assert_eq!(manager.derived().len(), 5);
        for (i, room) in manager.rooms().iter().enumerate() {
            let original = if i < 2 { i } else { i + 1 };
            assert_eq!(room, before.get(original).unwrap());
            assert_eq!(manager.derived().trigger(i).unwrap().center, room.bounds.center());
            assert_eq!(manager.derived().camera(i).unwrap().room, i);
        }
    }

    #[test]
    fn test_camera_size_only_for_custom_rooms() {
        let mut manager = manager_with(&[(0, 0, 5, 5)]);
        assert!(!manager.set_camera_size(0, 2.0));

        manager.set_custom_camera_size(0, true);
        assert!(manager.set_camera_size(0, 2.0));
        assert_eq!(manager.derived().camera(0).unwrap().ortho_size, 2.0);
        assert!(!manager.set_camera_size(5, 2.0));
    }

    #[test]
    fn test_follow_target_reaches_rigs() {
        let mut manager = manager_with(&[(0, 0, 5, 5), (10, 0, 5, 5)]);
        manager.set_follow_target(Some(TargetId(7)));

        for i in 0..2 {
            assert_eq!(manager.derived().camera(i).unwrap().follow, Some(TargetId(7)));
        }
    }

    #[test]
    fn test_transition_forces_resync_when_out_of_sync() {
        let mut manager = manager_with(&[(0, 0, 5, 5)]);
        // Simulate a room list change that skipped the resync
        manager.rooms.append(room(10, 0, 5, 5));
        assert_eq!(manager.derived().len(), 1);

        let mut controller = RoomTransitionController::default();
        manager.transition(&mut controller, 1).unwrap();

        assert_eq!(manager.derived().len(), 2);
        assert_eq!(controller.active_room(), Some(1));
        assert_eq!(manager.derived().enabled_cameras(), vec![1]);

        let err = manager.transition(&mut controller, 5).unwrap_err();
        assert!(matches!(err, RoomError::NoSuchRoom(5)));
        assert_eq!(manager.derived().enabled_cameras(), vec![1]);
    }

    #[test]
    fn test_physics_step_drives_cameras() {
        let mut manager = manager_with(&[(0, 0, 5, 5), (5, 0, 5, 5)]);
        let mut controller = RoomTransitionController::new(MembershipModel::SingleActive);
        let mut events = RoomEvents::new();

        events.begin(1);
        events.begin(1);
        controller.physics_step(&mut manager, &mut events).unwrap();
        assert!(events.overlaps.is_empty());
        assert_eq!(manager.derived().enabled_cameras(), vec![1]);

        events.begin(0);
        events.end(1);
        controller.physics_step(&mut manager, &mut events).unwrap();
        assert_eq!(controller.active_room(), Some(0));
        assert_eq!(manager.derived().enabled_cameras(), vec![0]);
    }

    #[test]
    fn test_physics_step_reports_unknown_room() {
        let mut manager = manager_with(&[(0, 0, 5, 5)]);
        let mut controller = RoomTransitionController::default();
        let mut events = RoomEvents::new();

        events.begin(4);
        events.begin(0);
        let result = controller.physics_step(&mut manager, &mut events);

        assert!(matches!(result, Err(RoomError::NoSuchRoom(4))));
        // The valid event after the bad one still applied
        assert_eq!(controller.active_room(), Some(0));
        assert!(!controller.is_tracking(4));
    }

    #[test]
    fn test_failed_begin_retries_after_room_added() {
        let mut manager = manager_with(&[(0, 0, 5, 5)]);
        let mut controller = RoomTransitionController::new(MembershipModel::SingleActive);
        let mut events = RoomEvents::new();

        events.begin(0);
        controller.physics_step(&mut manager, &mut events).unwrap();
        events.begin(1);
        assert!(controller.physics_step(&mut manager, &mut events).is_err());
        assert_eq!(controller.tracked(), &HashSet::from([0]));

        manager.add_room(room(10, 0, 5, 5));
        events.begin(1);
        controller.physics_step(&mut manager, &mut events).unwrap();
        assert_eq!(controller.active_room(), Some(1));
        assert_eq!(manager.derived().enabled_cameras(), vec![1]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RoomConfig { cell_size: (0.0, 1.0), ..Default::default() };
        assert!(RoomManager::new(config).is_err());

        let mut manager = manager_with(&[(0, 0, 5, 5)]);
        let bad = RoomConfig { max_ortho_size: -1.0, ..Default::default() };
        assert!(manager.set_config(bad).is_err());
        assert_eq!(manager.config(), &RoomConfig::default());
    }

    #[test]
    fn test_gizmos_label_rooms_from_one() {
        let manager = manager_with(&[(0, 0, 5, 5), (10, 0, 5, 5)]);
        let mut log = GizmoLog::default();
        manager.draw_gizmos(&mut log);

        assert_eq!(log.rects.len(), 2);
        assert_eq!(log.label_texts(), vec!["1", "2"]);
        assert_eq!(log.labels[0].0, Vec2::new(2.0, 3.0));
    }
}
