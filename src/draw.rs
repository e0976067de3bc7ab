//! Macroquad drawing for room gizmos
//!
//! Rectangles are drawn in world space under the active camera. Labels are
//! queued and drawn afterwards in screen space so text stays upright and
//! the same size at every zoom level.

use macroquad::prelude::*;
use bonnie_rooms::gizmo::GizmoRenderer;
use bonnie_rooms::world::Grid;

/// Outline width in screen pixels
const LINE_PX: f32 = 2.0;
const LABEL_FONT_SIZE: u16 = 20;

pub struct MacroquadGizmos {
    camera: Camera2D,
    line_width: f32,
    labels: Vec<(Vec2, String, Color)>,
}

impl MacroquadGizmos {
    /// Renderer for one frame drawn through `camera`. The camera must
    /// already be set.
    pub fn new(camera: Camera2D) -> Self {
        let pixels_per_unit = camera.zoom.x.abs() * screen_width() * 0.5;
        Self {
            camera,
            line_width: LINE_PX / pixels_per_unit.max(f32::EPSILON),
            labels: Vec::new(),
        }
    }

    /// Draw queued labels. Switches to the default (screen) camera.
    pub fn flush_labels(&mut self) {
        set_default_camera();
        for (position, text, color) in self.labels.drain(..) {
            let screen = self.camera.world_to_screen(position);
            let dims = measure_text(&text, None, LABEL_FONT_SIZE, 1.0);
            draw_text(
                &text,
                screen.x - dims.width * 0.5,
                screen.y + dims.offset_y * 0.5,
                LABEL_FONT_SIZE as f32,
                color,
            );
        }
    }
}

impl GizmoRenderer for MacroquadGizmos {
    fn draw_rect(&mut self, rect: Rect, fill: Color, outline: Color) {
        if fill.a > 0.0 {
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
        }
        if outline.a > 0.0 {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, self.line_width, outline);
        }
    }

    fn draw_label(&mut self, position: Vec2, text: &str, color: Color) {
        self.labels.push((position, text.to_string(), color));
    }
}

/// Grid lines covering the world area visible through `view`
pub fn draw_cell_grid(grid: &Grid, view: Rect, color: Color) {
    let first = grid.world_to_cell(Vec2::new(view.x, view.y));
    let last = grid.world_to_cell(Vec2::new(view.x + view.w, view.y + view.h));

    // Too dense to be useful when zoomed far out
    if (last.x - first.x) > 400 || (last.y - first.y) > 400 {
        return;
    }

    let thickness = view.h / screen_height().max(1.0);
    for x in first.x..=last.x + 1 {
        let wx = grid.cell_to_world(IVec2::new(x, 0)).x;
        draw_line(wx, view.y, wx, view.y + view.h, thickness, color);
    }
    for y in first.y..=last.y + 1 {
        let wy = grid.cell_to_world(IVec2::new(0, y)).y;
        draw_line(view.x, wy, view.x + view.w, wy, thickness, color);
    }
}
