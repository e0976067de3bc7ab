//! Derived room geometry
//!
//! Every room owns exactly one trigger volume and one camera rig. Both are
//! regenerated from the room collection, never edited by hand:
//! - Trigger volume: sensor quad matching the room bounds in world space,
//!   tagged with the room index so overlap events can report it.
//! - Camera rig: framing for a camera that follows the tracked target while
//!   confined to the trigger's shape.
//!
//! The ownership map `artifacts[i] = (trigger, camera)` is the single source
//! of truth for which artifacts belong to room `i`. It must stay the same
//! length as the room list and in the same order.

use log::debug;
use macroquad::math::{Rect, Vec2};
use crate::config::RoomConfig;
use crate::world::{Grid, Room, RoomCollection};
use super::handle::{Handle, HandleAllocator};
use super::storage::ArtifactStorage;
use super::transition::CameraSwitch;

/// Identifies the agent the cameras follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// Non-solid quad used to detect an agent entering or leaving a room
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerVolume {
    /// Index of the room this volume belongs to
    pub room: usize,
    pub name: String,
    /// Room center in world space
    pub center: Vec2,
    /// Quad corners relative to `center`, in world units
    pub points: [Vec2; 4],
    /// Sensors report overlaps but never block movement
    pub sensor: bool,
}

impl TriggerVolume {
    /// World-space rectangle covered by the quad
    pub fn world_rect(&self) -> Rect {
        let half = self.points[0].abs();
        Rect::new(
            self.center.x - half.x,
            self.center.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }
}

/// Framing parameters for one room's camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub room: usize,
    pub name: String,
    pub follow: Option<TargetId>,
    /// Trigger volume whose shape confines the camera
    pub confiner: Handle,
    /// Orthographic half-size in world units
    pub ortho_size: f32,
    pub pixel_perfect: bool,
    /// Only the active room's rig is enabled
    pub enabled: bool,
}

/// Handles owned by one room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomArtifacts {
    pub trigger: Handle,
    pub camera: Handle,
}

/// What a resync changed structurally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub destroyed: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.created > 0 || self.destroyed > 0
    }
}

/// Orthographic half-size that fits a room of `world_size` on screen,
/// clamped to `max_ortho_size`.
pub fn fitting_ortho_size(world_size: Vec2, aspect_ratio: f32, max_ortho_size: f32) -> f32 {
    let fitting = (world_size.x / aspect_ratio).min(world_size.y) / 2.0;
    fitting.min(max_ortho_size)
}

fn trigger_name(index: usize) -> String {
    format!("Room {}", index + 1)
}

fn camera_name(index: usize) -> String {
    format!("Room {} Camera", index + 1)
}

/// Trigger volumes and camera rigs for every room, index-aligned.
#[derive(Default)]
pub struct DerivedGeometry {
    handles: HandleAllocator,
    triggers: ArtifactStorage<TriggerVolume>,
    cameras: ArtifactStorage<CameraRig>,
    artifacts: Vec<RoomArtifacts>,
}

impl DerivedGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the artifacts in line with `rooms`.
    ///
    /// Excess artifacts are destroyed from the end, missing ones are appended,
    /// then every survivor is updated in place. Running this twice with the
    /// same inputs leaves the second run with nothing to change.
    pub fn resync(
        &mut self,
        rooms: &RoomCollection,
        grid: &Grid,
        config: &RoomConfig,
        follow: Option<TargetId>,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        // Trailing excess, highest index first
        while self.artifacts.len() > rooms.len() {
            let Some(artifacts) = self.artifacts.pop() else { break };
            self.destroy(artifacts);
            report.destroyed += 1;
        }

        while self.artifacts.len() < rooms.len() {
            let artifacts = self.create(self.artifacts.len(), config);
            self.artifacts.push(artifacts);
            report.created += 1;
        }

        for (index, (room, artifacts)) in rooms.iter().zip(self.artifacts.iter()).enumerate() {
            if let Some(trigger) = self.triggers.get_mut(artifacts.trigger) {
                update_trigger(trigger, index, room, grid);
            }
            if let Some(rig) = self.cameras.get_mut(artifacts.camera) {
                update_camera(rig, index, room, artifacts.trigger, grid, config, follow);
            }
        }

        report
    }

    fn create(&mut self, index: usize, config: &RoomConfig) -> RoomArtifacts {
        let trigger = self.handles.allocate();
        let camera = self.handles.allocate();

        self.triggers.insert(trigger, TriggerVolume {
            room: index,
            name: trigger_name(index),
            center: Vec2::ZERO,
            points: [Vec2::ZERO; 4],
            sensor: true,
        });
        self.cameras.insert(camera, CameraRig {
            room: index,
            name: camera_name(index),
            follow: None,
            confiner: trigger,
            ortho_size: config.max_ortho_size,
            pixel_perfect: config.pixel_perfect,
            enabled: false,
        });

        debug!("Created trigger and camera for room {}", index);
        RoomArtifacts { trigger, camera }
    }

    fn destroy(&mut self, artifacts: RoomArtifacts) {
        let room = self.triggers.remove(artifacts.trigger).map(|t| t.room);
        self.cameras.remove(artifacts.camera);
        self.handles.free(artifacts.trigger);
        self.handles.free(artifacts.camera);

        if let Some(room) = room {
            debug!("Destroyed trigger and camera of room {}", room);
        }
    }

    /// Number of artifact pairs (equals the room count after a resync)
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn artifacts(&self, index: usize) -> Option<RoomArtifacts> {
        self.artifacts.get(index).copied()
    }

    pub fn trigger(&self, index: usize) -> Option<&TriggerVolume> {
        self.artifacts.get(index).and_then(|a| self.triggers.get(a.trigger))
    }

    pub fn camera(&self, index: usize) -> Option<&CameraRig> {
        self.artifacts.get(index).and_then(|a| self.cameras.get(a.camera))
    }

    fn camera_mut(&mut self, index: usize) -> Option<&mut CameraRig> {
        let artifacts = self.artifacts.get(index)?;
        self.cameras.get_mut(artifacts.camera)
    }

    /// Trigger volume behind a handle, if it is still alive
    pub fn resolve_trigger(&self, handle: Handle) -> Option<&TriggerVolume> {
        if self.handles.is_alive(handle) {
            self.triggers.get(handle)
        } else {
            None
        }
    }

    pub fn is_alive(&self, handle: Handle) -> bool {
        self.handles.is_alive(handle)
    }

    /// All trigger volumes with their room index
    pub fn triggers(&self) -> impl Iterator<Item = (usize, &TriggerVolume)> + '_ {
        self.artifacts
            .iter()
            .enumerate()
            .filter_map(|(i, a)| self.triggers.get(a.trigger).map(|t| (i, t)))
    }

    /// Room indices whose camera rig is enabled
    pub fn enabled_cameras(&self) -> Vec<usize> {
        (0..self.artifacts.len())
            .filter(|&i| self.camera(i).map_or(false, |rig| rig.enabled))
            .collect()
    }

    /// Write a manual orthographic size. Fitted rigs are overwritten on the
    /// next resync, so this only sticks for rooms with a custom camera size.
    pub fn set_ortho_size(&mut self, index: usize, ortho_size: f32) -> bool {
        match self.camera_mut(index) {
            Some(rig) => {
                rig.ortho_size = ortho_size;
                true
            }
            None => false,
        }
    }
}

impl CameraSwitch for DerivedGeometry {
    fn rig_count(&self) -> usize {
        self.artifacts.len()
    }

    fn activate(&mut self, index: usize) {
        if let Some(rig) = self.camera_mut(index) {
            rig.enabled = true;
        }
    }

    fn deactivate(&mut self, index: usize) {
        if let Some(rig) = self.camera_mut(index) {
            rig.enabled = false;
        }
    }
}

fn update_trigger(trigger: &mut TriggerVolume, index: usize, room: &Room, grid: &Grid) {
    let half = room.bounds.size.as_vec2() * 0.5 * grid.cell_size();

    trigger.room = index;
    trigger.name = trigger_name(index);
    trigger.center = grid.cell_point_to_world(room.bounds.center());
    trigger.points = [
        half,
        Vec2::new(half.x, -half.y),
        -half,
        Vec2::new(-half.x, half.y),
    ];
    trigger.sensor = true;
}

fn update_camera(
    rig: &mut CameraRig,
    index: usize,
    room: &Room,
    confiner: Handle,
    grid: &Grid,
    config: &RoomConfig,
    follow: Option<TargetId>,
) {
    rig.room = index;
    rig.name = camera_name(index);
    rig.follow = follow;
    rig.confiner = confiner;
    rig.pixel_perfect = config.pixel_perfect;

    // Custom-sized cameras are left to manual control
    if room.custom_camera_size {
        return;
    }

    let world_size = room.bounds.size.as_vec2() * grid.cell_size();
    rig.ortho_size = fitting_ortho_size(world_size, config.aspect_ratio, config.max_ortho_size);
}
