//! Room membership and camera switching
//!
//! The controller tracks which rooms the agent currently overlaps and owns
//! the notion of the active room. It only ever touches camera rigs through
//! `CameraSwitch`; room bounds are none of its business.

use std::collections::HashSet;
use log::{debug, warn};
use crate::config::MembershipModel;
use crate::error::RoomError;
use super::event::{OverlapEvent, RoomEvents};
use super::manager::RoomManager;

/// Camera rigs as seen by the transition controller
pub trait CameraSwitch {
    /// Number of rigs (one per room when in sync)
    fn rig_count(&self) -> usize;
    fn activate(&mut self, index: usize);
    fn deactivate(&mut self, index: usize);
}

/// Capability for systems driven once per physics step
pub trait RuntimeUpdatable {
    fn physics_step(&mut self, manager: &mut RoomManager, events: &mut RoomEvents) -> Result<(), RoomError>;
}

/// Membership tracking for a single agent.
#[derive(Debug, Clone, Default)]
pub struct RoomTransitionController {
    model: MembershipModel,
    tracked: HashSet<usize>,
    active_room: Option<usize>,
}

impl RoomTransitionController {
    pub fn new(model: MembershipModel) -> Self {
        Self {
            model,
            tracked: HashSet::new(),
            active_room: None,
        }
    }

    pub fn model(&self) -> MembershipModel {
        self.model
    }

    /// Room whose camera rig is currently active
    pub fn active_room(&self) -> Option<usize> {
        self.active_room
    }

    pub fn tracked(&self) -> &HashSet<usize> {
        &self.tracked
    }

    pub fn is_tracking(&self, room: usize) -> bool {
        self.tracked.contains(&room)
    }

    /// Record that the agent is inside `room`. Under `SingleActive` this
    /// replaces every other membership.
    pub fn enter(&mut self, room: usize) {
        if self.model == MembershipModel::SingleActive {
            self.tracked.clear();
        }
        self.tracked.insert(room);
    }

    /// Overlap began. Re-entering a tracked room is a no-op.
    /// Returns whether a camera transition happened. Membership only
    /// changes once the transition succeeded.
    pub fn on_overlap_begin(&mut self, room: usize, cameras: &mut dyn CameraSwitch) -> Result<bool, RoomError> {
        if self.is_tracking(room) {
            return Ok(false);
        }
        self.trigger_transition(room, cameras)?;
        self.enter(room);
        Ok(true)
    }

    /// Overlap ended. Never triggers a transition.
    pub fn on_overlap_end(&mut self, room: usize) {
        self.tracked.remove(&room);
    }

    /// Switch the active camera to `next_room`'s rig.
    ///
    /// Deactivates the previous rig first, so exactly one rig is enabled
    /// afterwards. Fails without touching any rig if `next_room` has no rig.
    pub fn trigger_transition(&mut self, next_room: usize, cameras: &mut dyn CameraSwitch) -> Result<(), RoomError> {
        let rigs = cameras.rig_count();
        if next_room >= rigs {
            return Err(RoomError::DerivedOutOfSync { index: next_room, rigs });
        }

        // The previous rig may be gone if rooms were removed since
        if let Some(current) = self.active_room {
            if current < rigs {
                cameras.deactivate(current);
            }
        }

        self.active_room = Some(next_room);
        cameras.activate(next_room);
        debug!("Camera transition to room {}", next_room + 1);
        Ok(())
    }

    /// Reconcile against a list of currently overlapping rooms, for hosts
    /// that poll overlaps instead of receiving begin/end events (editor
    /// preview). The tracked set becomes exactly `overlapping`. Returns the
    /// first room that was not tracked before, which the caller should
    /// transition to.
    pub fn sync_overlapping(&mut self, overlapping: &[usize]) -> Option<usize> {
        let entered = overlapping.iter().copied().find(|room| !self.tracked.contains(room));
        self.tracked.clear();
        self.tracked.extend(overlapping.iter().copied());
        entered
    }

    /// Forget all membership and disable the active rig
    pub fn reset(&mut self, cameras: &mut dyn CameraSwitch) {
        if let Some(current) = self.active_room.take() {
            if current < cameras.rig_count() {
                cameras.deactivate(current);
            }
        }
        self.tracked.clear();
    }
}

impl RuntimeUpdatable for RoomTransitionController {
    /// Apply one step's overlap events in delivery order. Every event is
    /// processed; the first failure is returned.
    fn physics_step(&mut self, manager: &mut RoomManager, events: &mut RoomEvents) -> Result<(), RoomError> {
        let mut result = Ok(());

        for event in events.overlaps.drain() {
            let step = match event {
                OverlapEvent::Begin(room) if self.is_tracking(room) => Ok(()),
                OverlapEvent::Begin(room) => {
                    manager.transition(self, room).map(|()| self.enter(room))
                }
                OverlapEvent::End(room) => {
                    self.on_overlap_end(room);
                    Ok(())
                }
            };

            if let Err(e) = step {
                warn!("Room transition failed: {}", e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        result
    }
}
