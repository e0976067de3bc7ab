//! Editor tool capabilities
//!
//! Two small traits instead of a tool base class:
//! - `Tool`: identity plus an activation lifecycle
//! - `Authorable`: receives pointer events and commits edits to the rooms

use macroquad::math::Vec2;
use crate::game::RoomManager;

/// Activation lifecycle shared by all editor tools
///
/// ```text
/// [Inactive] --activate()--> [Active] --deactivate()--> [Inactive]
/// ```
///
/// Only active tools should receive pointer events and draw gizmos.
pub trait Tool {
    /// Human-readable label for the status bar
    fn label(&self) -> &'static str;

    fn active(&self) -> bool;

    /// Returns false if the tool was already active or refused activation
    fn activate(&mut self) -> bool {
        if self.active() {
            return false;
        }
        self.do_activate()
    }

    /// Returns false if the tool was already inactive
    fn deactivate(&mut self) -> bool {
        if !self.active() {
            return false;
        }
        self.do_deactivate()
    }

    /// Override for setup. Must mark the tool active on success.
    fn do_activate(&mut self) -> bool {
        true
    }

    /// Override for cleanup. Must mark the tool inactive on success.
    fn do_deactivate(&mut self) -> bool {
        true
    }
}

/// Receives pointer interaction and turns it into room edits.
///
/// Positions are in world space; implementors map them to cells through
/// the manager's grid.
pub trait Authorable {
    fn pointer_down(&mut self, manager: &mut RoomManager, world: Vec2);
    fn pointer_drag(&mut self, manager: &mut RoomManager, world: Vec2);
    fn pointer_up(&mut self, manager: &mut RoomManager, world: Vec2);

    /// Whether the pending edit would be accepted by `commit`
    fn validate(&self) -> bool;

    /// Apply the pending edit. Returns the index of the affected room, or
    /// None if there was nothing valid to apply.
    fn commit(&mut self, manager: &mut RoomManager) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingTool {
        active: bool,
        activations: u32,
        deactivations: u32,
    }

    impl Tool for CountingTool {
        fn label(&self) -> &'static str { "Counting" }
        fn active(&self) -> bool { self.active }

        fn do_activate(&mut self) -> bool {
            self.active = true;
            self.activations += 1;
            true
        }

        fn do_deactivate(&mut self) -> bool {
            self.active = false;
            self.deactivations += 1;
            true
        }
    }

    #[test]
    fn test_lifecycle_ignores_repeats() {
        let mut tool = CountingTool { active: false, activations: 0, deactivations: 0 };

        assert!(tool.activate());
        assert!(!tool.activate());
        assert_eq!(tool.activations, 1);

        assert!(tool.deactivate());
        assert!(!tool.deactivate());
        assert_eq!(tool.deactivations, 1);
        assert!(!tool.active());
    }
}
