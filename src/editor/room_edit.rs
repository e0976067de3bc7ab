//! Room authoring tool
//!
//! Rooms are created by dragging out a rectangle on the grid and resized by
//! dragging the midpoint handle of any edge. Creation is validated live on
//! every drag event (minimum size, no overlap with existing rooms) and
//! invalid rooms are simply not committed. Resizing is not validated.
//!
//! There is no cancel: a drag always ends on pointer-up, committed or not.

use macroquad::math::{IVec2, Rect, Vec2};
use crate::error::RoomError;
use crate::game::RoomManager;
use crate::gizmo::{self, GizmoRenderer};
use crate::world::{IntBounds, Room, RoomCollection, meets_min_size, points_to_bounds};
use super::handles::{BoxBoundsHandle, HandleSide, RoomHandles};
use super::target::RoomTarget;
use super::tool::{Authorable, Tool};
use super::undo::UndoStack;

/// Side length of a drawn resize handle, in cells
const HANDLE_DRAW_SIZE: f32 = 0.3;

/// A room being dragged out
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDrag {
    pub first: IVec2,
    pub last: IVec2,
    pub bounds: IntBounds,
    pub too_small: bool,
    pub intersecting: bool,
    /// Overlap with each existing room the drag intersects
    pub overlaps: Vec<IntBounds>,
}

impl CreateDrag {
    fn start(cell: IVec2, rooms: &RoomCollection) -> Self {
        let mut drag = Self {
            first: cell,
            last: cell,
            bounds: IntBounds::default(),
            too_small: true,
            intersecting: false,
            overlaps: Vec::new(),
        };
        drag.update(cell, rooms);
        drag
    }

    fn update(&mut self, cell: IVec2, rooms: &RoomCollection) {
        self.last = cell;
        self.bounds = points_to_bounds(self.first, self.last);
        self.too_small = !meets_min_size(&self.bounds);
        self.overlaps = rooms.overlaps(&self.bounds);
        self.intersecting = !self.overlaps.is_empty();
    }

    pub fn is_valid(&self) -> bool {
        !self.too_small && !self.intersecting
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Dragging(CreateDrag),
}

#[derive(Debug, Default)]
pub struct RoomEditTool {
    active: bool,
    state: EditState,
    hover: Option<IVec2>,
    handles: RoomHandles,
    /// The grabbed handle has changed bounds (undo already recorded)
    resized: bool,
    undo: UndoStack,
}

impl RoomEditTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EditState::Dragging(_))
    }

    /// True while an edge handle is held
    pub fn is_resizing(&self) -> bool {
        self.handles.is_grabbed()
    }

    pub fn hover_cell(&self) -> Option<IVec2> {
        self.hover
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Activate against a target, creating its room manager if missing
    pub fn activate_on(&mut self, target: &mut RoomTarget) -> Result<bool, RoomError> {
        target.ensure_manager()?;
        Ok(self.activate())
    }

    /// Per-frame pointer position while no button is held
    pub fn hover(&mut self, manager: &RoomManager, world: Option<Vec2>) {
        self.hover = world.map(|w| manager.grid().world_to_cell(w));
    }

    /// Apply a handle pair to room `index`: the rounded box becomes its new
    /// bounds as-is, even if it is tiny or overlaps other rooms.
    pub fn resize_room(&mut self, manager: &mut RoomManager, index: usize, center: Vec2, half_size: Vec2) -> bool {
        let bounds = BoxBoundsHandle::new(center, half_size).to_bounds();
        match manager.rooms().get(index) {
            Some(room) if room.bounds == bounds => true,
            Some(_) => manager.set_room_bounds(index, bounds),
            None => false,
        }
    }

    /// Delete the room under the pointer. Returns its former index.
    pub fn remove_room_at(&mut self, manager: &mut RoomManager, world: Vec2) -> Option<usize> {
        let index = manager.rooms().find_at(manager.grid().world_to_cell(world))?;
        self.undo.save("Remove Room", manager.rooms());
        manager.remove_room(index);
        Some(index)
    }

    /// Flip manual camera sizing for the room under the pointer.
    /// Returns the room and its new setting.
    pub fn toggle_custom_camera_at(&mut self, manager: &mut RoomManager, world: Vec2) -> Option<(usize, bool)> {
        let index = manager.rooms().find_at(manager.grid().world_to_cell(world))?;
        let custom = !manager.rooms().get(index)?.custom_camera_size;
        self.undo.save("Toggle Camera Size", manager.rooms());
        manager.set_custom_camera_size(index, custom);
        Some((index, custom))
    }

    pub fn undo(&mut self, manager: &mut RoomManager) -> Option<&'static str> {
        self.end_interaction();
        self.undo.undo(manager)
    }

    pub fn redo(&mut self, manager: &mut RoomManager) -> Option<&'static str> {
        self.end_interaction();
        self.undo.redo(manager)
    }

    /// Forget undo history (after loading a different level)
    pub fn clear_history(&mut self) {
        self.undo.clear();
    }

    fn end_interaction(&mut self) {
        self.state = EditState::Idle;
        self.handles.release();
    }

    /// Draw rooms plus the tool's own feedback
    pub fn render(&self, manager: &RoomManager, renderer: &mut dyn GizmoRenderer) {
        manager.draw_gizmos(renderer);
        let grid = manager.grid();

        match &self.state {
            EditState::Dragging(drag) => {
                let rect = grid.bounds_to_world(&drag.bounds);
                let (fill, outline) = if drag.is_valid() {
                    (gizmo::CREATION_FILL, gizmo::CREATION_OUTLINE)
                } else {
                    (gizmo::WARNING_FILL, gizmo::WARNING_OUTLINE)
                };
                renderer.draw_rect(rect, fill, outline);

                let label = if drag.too_small {
                    "TOO SMALL".to_string()
                } else {
                    format!("({}, {})", rect.w, rect.h)
                };
                renderer.draw_label(rect.center(), &label, outline);

                for overlap in &drag.overlaps {
                    renderer.draw_rect(grid.bounds_to_world(overlap), gizmo::COLLISION_FILL, gizmo::COLLISION_OUTLINE);
                }
            }
            EditState::Idle => {
                if let Some(cell) = self.hover {
                    let outline = if manager.rooms().any_contains(cell) {
                        gizmo::ACCENT
                    } else {
                        gizmo::NEUTRAL
                    };
                    renderer.draw_rect(grid.cell_rect(cell), gizmo::CLEAR, outline);
                }
            }
        }

        let grabbed = self.handles.grabbed().map(|g| (g.room, g.side));
        let size = Vec2::splat(HANDLE_DRAW_SIZE) * grid.cell_size();
        for (room, handle) in RoomHandles::all(manager.rooms()) {
            for side in HandleSide::ALL {
                let min = grid.cell_point_to_world(handle.midpoint(side)) - size * 0.5;
                let fill = if grabbed == Some((room, side)) { gizmo::CREATION_OUTLINE } else { gizmo::ACCENT };
                renderer.draw_rect(Rect::new(min.x, min.y, size.x, size.y), fill, gizmo::ACCENT);
            }
        }
    }
}

impl Tool for RoomEditTool {
    fn label(&self) -> &'static str { "Edit Rooms" }
    fn active(&self) -> bool { self.active }

    fn do_activate(&mut self) -> bool {
        self.active = true;
        true
    }

    fn do_deactivate(&mut self) -> bool {
        self.end_interaction();
        self.hover = None;
        self.active = false;
        true
    }
}

impl Authorable for RoomEditTool {
    /// Handles take priority; anywhere else starts a new room
    fn pointer_down(&mut self, manager: &mut RoomManager, world: Vec2) {
        if self.is_dragging() || self.handles.is_grabbed() {
            return;
        }

        let point = manager.grid().world_to_cell_point(world);
        if self.handles.try_grab(manager.rooms(), point) {
            self.resized = false;
            return;
        }

        let cell = manager.grid().world_to_cell(world);
        self.state = EditState::Dragging(CreateDrag::start(cell, manager.rooms()));
    }

    fn pointer_drag(&mut self, manager: &mut RoomManager, world: Vec2) {
        if let Some((room, handle)) = self.handles.drag(manager.grid().world_to_cell_point(world)) {
            let changed = manager.rooms().get(room).is_some_and(|r| r.bounds != handle.to_bounds());
            if changed && !self.resized {
                self.undo.save("Change Room Bounds", manager.rooms());
                self.resized = true;
            }
            self.resize_room(manager, room, handle.center, handle.half_size);
            return;
        }

        let cell = manager.grid().world_to_cell(world);
        if let EditState::Dragging(drag) = &mut self.state {
            drag.update(cell, manager.rooms());
        }
    }

    fn pointer_up(&mut self, manager: &mut RoomManager, world: Vec2) {
        if self.handles.is_grabbed() {
            self.pointer_drag(manager, world);
            self.handles.release();
            return;
        }

        if !self.is_dragging() {
            return;
        }
        self.pointer_drag(manager, world);
        self.commit(manager);
        self.state = EditState::Idle;
    }

    fn validate(&self) -> bool {
        match &self.state {
            EditState::Dragging(drag) => drag.is_valid(),
            EditState::Idle => false,
        }
    }

    /// Append the dragged room if valid. Invalid drags are dropped silently.
    fn commit(&mut self, manager: &mut RoomManager) -> Option<usize> {
        let EditState::Dragging(drag) = &self.state else { return None };
        if !drag.is_valid() {
            return None;
        }

        let room = Room::new(drag.bounds);
        self.undo.save("Add Room", manager.rooms());
        Some(manager.add_room(room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::gizmo::tests::GizmoLog;

    /// World position in the middle of a unit cell
    fn at(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
    }

    fn empty_manager() -> RoomManager {
        RoomManager::new(RoomConfig::default()).unwrap()
    }

    fn drag_create(tool: &mut RoomEditTool, manager: &mut RoomManager, from: (i32, i32), to: (i32, i32)) {
        tool.pointer_down(manager, at(from.0, from.1));
        tool.pointer_drag(manager, at((from.0 + to.0) / 2, (from.1 + to.1) / 2));
        tool.pointer_drag(manager, at(to.0, to.1));
        tool.pointer_up(manager, at(to.0, to.1));
    }

    #[test]
    fn test_drag_creates_room() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (0, 0), (5, 5));

        assert_eq!(manager.rooms().len(), 1);
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 5, 5));
        assert_eq!(manager.derived().len(), 1);
        assert_eq!(tool.state(), &EditState::Idle);
    }

    #[test]
    fn test_drag_direction_does_not_matter() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (5, 5), (0, 0));
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 5, 5));
    }

    #[test]
    fn test_overlapping_room_rejected() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        tool.pointer_down(&mut manager, at(3, 3));
        tool.pointer_drag(&mut manager, at(8, 8));
        match tool.state() {
            EditState::Dragging(drag) => {
                assert!(drag.intersecting);
                assert!(!drag.too_small);
                assert_eq!(drag.overlaps, vec![IntBounds::from_xywh(3, 3, 2, 2)]);
            }
            EditState::Idle => panic!("expected a drag in progress"),
        }
        assert!(!tool.validate());

        tool.pointer_up(&mut manager, at(8, 8));
        assert_eq!(manager.rooms().len(), 1);
        assert_eq!(tool.state(), &EditState::Idle);
    }

    #[test]
    fn test_too_small_rejected() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (0, 0), (3, 9));
        drag_create(&mut tool, &mut manager, (0, 0), (9, 3));
        assert!(manager.rooms().is_empty());

        drag_create(&mut tool, &mut manager, (0, 0), (4, 4));
        assert_eq!(manager.rooms().len(), 1);
    }

    #[test]
    fn test_touching_rooms_allowed() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (0, 0), (5, 5));
        drag_create(&mut tool, &mut manager, (5, 0), (9, 4));
        drag_create(&mut tool, &mut manager, (5, 5), (9, 9));

        assert_eq!(manager.rooms().len(), 3);
    }

    #[test]
    fn test_rejected_drag_leaves_tool_usable() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (0, 0), (1, 1));
        assert_eq!(tool.state(), &EditState::Idle);
        assert!(!tool.undo_stack().can_undo());

        drag_create(&mut tool, &mut manager, (0, 0), (6, 6));
        assert_eq!(manager.rooms().len(), 1);
    }

    #[test]
    fn test_drag_feedback_recomputed_per_event() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(10, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        tool.pointer_down(&mut manager, at(0, 0));
        assert!(!tool.validate());

        tool.pointer_drag(&mut manager, at(6, 6));
        assert!(tool.validate());

        tool.pointer_drag(&mut manager, at(12, 2));
        assert!(!tool.validate());

        tool.pointer_drag(&mut manager, at(6, 6));
        tool.pointer_up(&mut manager, at(6, 6));
        assert_eq!(manager.rooms().len(), 2);
    }

    #[test]
    fn test_preview_labels_and_colors() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        tool.pointer_down(&mut manager, at(10, 0));
        tool.pointer_drag(&mut manager, at(12, 2));
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        assert!(log.label_texts().contains(&"TOO SMALL"));
        assert_eq!(log.rects_with_fill(gizmo::WARNING_FILL).len(), 1);

        tool.pointer_drag(&mut manager, at(16, 6));
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        assert!(log.label_texts().contains(&"(6, 6)"));
        assert_eq!(log.rects_with_fill(gizmo::CREATION_FILL).len(), 1);

        tool.pointer_drag(&mut manager, at(3, 3));
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        assert_eq!(log.rects_with_fill(gizmo::WARNING_FILL).len(), 1);
        assert_eq!(log.rects_with_fill(gizmo::COLLISION_FILL).len(), 1);
    }

    #[test]
    fn test_hover_highlights_rooms() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        tool.hover(&manager, Some(at(2, 2)));
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        let hover: Vec<_> = log.rects.iter().filter(|(_, fill, _)| *fill == gizmo::CLEAR).collect();
        assert_eq!(hover.len(), 1);
        assert_eq!(hover[0].2, gizmo::ACCENT);

        tool.hover(&manager, Some(at(20, 20)));
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        let hover: Vec<_> = log.rects.iter().filter(|(_, fill, _)| *fill == gizmo::CLEAR).collect();
        assert_eq!(hover[0].2, gizmo::NEUTRAL);

        tool.hover(&manager, None);
        let mut log = GizmoLog::default();
        tool.render(&manager, &mut log);
        assert!(log.rects_with_fill(gizmo::CLEAR).is_empty());
    }

    #[test]
    fn test_resize_is_not_validated() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        manager.add_room(Room::new(IntBounds::from_xywh(10, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        assert!(tool.resize_room(&mut manager, 1, Vec2::new(2.0, 2.0), Vec2::new(1.0, 1.0)));

        let bounds = manager.rooms().get(1).unwrap().bounds;
        assert_eq!(bounds, IntBounds::from_xywh(1, 1, 2, 2));
        assert_eq!(manager.derived().trigger(1).unwrap().center, Vec2::new(2.0, 2.0));
        assert!(!tool.resize_room(&mut manager, 7, Vec2::ZERO, Vec2::ONE));
    }

    #[test]
    fn test_handle_drag_resizes_with_undo() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 4, 4)));
        let mut tool = RoomEditTool::new();

        // Right edge midpoint is at (4, 2)
        tool.pointer_down(&mut manager, Vec2::new(4.1, 2.0));
        assert!(tool.is_resizing());
        assert!(!tool.is_dragging());

        tool.pointer_drag(&mut manager, Vec2::new(5.0, 2.0));
        tool.pointer_up(&mut manager, Vec2::new(6.2, 2.0));
        assert!(!tool.is_resizing());
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 6, 4));
        assert_eq!(manager.rooms().len(), 1);

        assert_eq!(tool.undo(&mut manager), Some("Change Room Bounds"));
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 4, 4));
        tool.redo(&mut manager);
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 6, 4));
    }

    #[test]
    fn test_handle_click_without_change_adds_no_undo() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 4, 4)));
        let mut tool = RoomEditTool::new();

        tool.pointer_down(&mut manager, Vec2::new(4.1, 2.0));
        tool.pointer_drag(&mut manager, Vec2::new(4.2, 2.0));
        tool.pointer_up(&mut manager, Vec2::new(4.1, 2.0));
        assert!(!tool.undo_stack().can_undo());

        // A drag that moves the edge and returns still counts once
        tool.pointer_down(&mut manager, Vec2::new(4.1, 2.0));
        tool.pointer_drag(&mut manager, Vec2::new(7.0, 2.0));
        tool.pointer_drag(&mut manager, Vec2::new(8.0, 2.0));
        tool.pointer_up(&mut manager, Vec2::new(4.0, 2.0));
        assert_eq!(tool.undo_stack().undo_label(), Some("Change Room Bounds"));
        assert_eq!(tool.undo(&mut manager), Some("Change Room Bounds"));
        assert!(!tool.undo_stack().can_undo());
    }

    #[test]
    fn test_remove_at_shared_edge_and_outside() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        manager.add_room(Room::new(IntBounds::from_xywh(5, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        // Cell (5, 2) belongs to the second room only
        assert_eq!(tool.remove_room_at(&mut manager, Vec2::new(5.5, 2.5)), Some(1));
        assert_eq!(manager.rooms().get(0).unwrap().bounds, IntBounds::from_xywh(0, 0, 5, 5));

        // Just past the remaining room's far edge
        assert_eq!(tool.remove_room_at(&mut manager, Vec2::new(5.5, 2.5)), None);
        assert_eq!(tool.toggle_custom_camera_at(&mut manager, Vec2::new(2.5, 5.5)), None);
        assert_eq!(manager.rooms().len(), 1);
    }

    #[test]
    fn test_undo_commit() {
        let mut manager = empty_manager();
        let mut tool = RoomEditTool::new();

        drag_create(&mut tool, &mut manager, (0, 0), (5, 5));
        assert_eq!(tool.undo(&mut manager), Some("Add Room"));
        assert!(manager.rooms().is_empty());
        assert!(manager.derived().is_empty());
    }

    #[test]
    fn test_remove_and_toggle_under_pointer() {
        let mut manager = empty_manager();
        manager.add_room(Room::new(IntBounds::from_xywh(0, 0, 5, 5)));
        manager.add_room(Room::new(IntBounds::from_xywh(10, 0, 5, 5)));
        let mut tool = RoomEditTool::new();

        assert_eq!(tool.toggle_custom_camera_at(&mut manager, at(11, 1)), Some((1, true)));
        assert!(manager.rooms().get(1).unwrap().custom_camera_size);

        assert_eq!(tool.remove_room_at(&mut manager, at(1, 1)), Some(0));
        assert_eq!(manager.rooms().len(), 1);
        assert!(manager.rooms().get(0).unwrap().custom_camera_size);
        assert_eq!(tool.remove_room_at(&mut manager, at(30, 30)), None);

        assert_eq!(tool.undo(&mut manager), Some("Remove Room"));
        assert_eq!(manager.rooms().len(), 2);
    }

    #[test]
    fn test_activation_creates_manager() {
        let mut target = RoomTarget::new(RoomConfig::default());
        let mut tool = RoomEditTool::new();

        assert!(tool.activate_on(&mut target).unwrap());
        assert!(tool.active());
        assert!(target.manager().is_some());

        assert_eq!(tool.label(), "Edit Rooms");
        tool.hover(target.manager().unwrap(), Some(at(1, 1)));
        assert!(tool.deactivate());
        assert_eq!(tool.hover_cell(), None);
    }
}
