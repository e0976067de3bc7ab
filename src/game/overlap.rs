//! Sensor overlap detection
//!
//! A minimal stand-in for a physics engine's trigger callbacks: each step
//! the agent's box is tested against every room trigger volume and the
//! difference to the previous step becomes begin/end events. Like a real
//! physics backend it reports each entry and exit exactly once.

use std::collections::BTreeSet;
use macroquad::math::Rect;
use super::derived::DerivedGeometry;
use super::event::RoomEvents;

/// Positive-area overlap. Touching edges do not count.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

/// Rooms whose trigger volume overlaps `agent`, ascending
pub fn query_overlaps(agent: &Rect, derived: &DerivedGeometry) -> Vec<usize> {
    derived
        .triggers()
        .filter(|(_, trigger)| trigger.sensor && rects_overlap(agent, &trigger.world_rect()))
        .map(|(room, _)| room)
        .collect()
}

#[derive(Debug, Default)]
pub struct OverlapStage {
    current: BTreeSet<usize>,
}

impl OverlapStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rooms overlapped as of the last step
    pub fn current(&self) -> impl Iterator<Item = usize> + '_ {
        self.current.iter().copied()
    }

    /// Test `agent` against all triggers and queue the changes.
    /// Exits are queued before entries.
    pub fn step(&mut self, agent: &Rect, derived: &DerivedGeometry, events: &mut RoomEvents) {
        let now: BTreeSet<usize> = query_overlaps(agent, derived).into_iter().collect();

        for &room in self.current.difference(&now) {
            events.end(room);
        }
        for &room in now.difference(&self.current) {
            events.begin(room);
        }

        self.current = now;
    }

    /// Forget all overlaps without emitting events (teleports, mode switches)
    pub fn reset(&mut self) {
        self.current.clear();
    }
}
