//! Gizmo drawing interface and colors
//!
//! The core describes what to draw in world space; the host decides how.

use macroquad::color::Color;
use macroquad::math::{Rect, Vec2};

/// Room fill
pub const PRIMARY: Color = Color::new(0.28, 0.75, 1.0, 0.1);
/// Room outline, labels, handles, hover over a room
pub const ACCENT: Color = Color::new(0.0, 0.17, 0.35, 1.0);

/// Valid room being dragged out
pub const CREATION_FILL: Color = Color::new(0.09, 1.0, 0.79, 0.4);
pub const CREATION_OUTLINE: Color = Color::new(0.0, 1.0, 0.6, 1.0);

/// Overlap between the dragged room and an existing one
pub const COLLISION_FILL: Color = Color::new(1.0, 0.0, 0.0, 0.4);
pub const COLLISION_OUTLINE: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Dragged room that is too small or intersecting
pub const WARNING_FILL: Color = Color::new(0.82, 0.79, 0.0, 0.4);
pub const WARNING_OUTLINE: Color = Color::new(1.0, 0.94, 0.0, 0.6);

pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);
pub const NEUTRAL: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Renderer collaborator for editor gizmos
pub trait GizmoRenderer {
    /// Filled rectangle with an outline, in world space
    fn draw_rect(&mut self, rect: Rect, fill: Color, outline: Color);

    /// Text label anchored at a world position
    fn draw_label(&mut self, position: Vec2, text: &str, color: Color);
}
