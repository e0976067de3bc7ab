//! Application state for the room editor host
//!
//! Two modes share one room manager:
//! - Edit: author rooms with the mouse, preview which camera the agent gets
//! - Play: walk the agent around, cameras switch with a fade

use std::path::PathBuf;
use log::{debug, error, info, warn};
use macroquad::prelude::*;
use bonnie_rooms::config::RoomConfig;
use bonnie_rooms::editor::{Authorable, RoomEditTool, RoomTarget, Tool};
use bonnie_rooms::error::RoomError;
use bonnie_rooms::game::{
    OverlapStage, RoomEvents, RoomManager, RoomTransitionController, RuntimeUpdatable, ScreenFade, TargetId,
    query_overlaps,
};
use bonnie_rooms::world::{load_rooms, save_rooms};
use crate::draw::{MacroquadGizmos, draw_cell_grid};

/// Room file used when none is given on the command line
pub const DEFAULT_ROOMS_FILE: &str = "rooms.ron";

/// World units per screen pixel when pixel snapping
const PIXELS_PER_UNIT: f32 = 16.0;
const AGENT_ID: TargetId = TargetId(0);

const BACKGROUND: Color = Color::new(0.08, 0.08, 0.1, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.06);
const AGENT_FILL: Color = Color::new(1.0, 0.55, 0.1, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Play,
}

/// Box the player moves around in play mode
pub struct Agent {
    /// Center in world space
    pub position: Vec2,
    pub size: Vec2,
    /// World units per second
    pub speed: f32,
}

impl Agent {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.size.x * 0.5,
            self.position.y - self.size.y * 0.5,
            self.size.x,
            self.size.y,
        )
    }
}

/// Free camera for edit mode
struct EditView {
    center: Vec2,
    /// Half of the visible world height
    half_height: f32,
}

pub struct AppState {
    pub mode: Mode,
    target: RoomTarget,
    tool: RoomEditTool,
    controller: RoomTransitionController,
    overlap: OverlapStage,
    events: RoomEvents,
    fade: ScreenFade,
    /// Last room handed to the fade
    requested: Option<usize>,
    pub agent: Agent,
    view: EditView,
    rooms_path: PathBuf,
    last_pointer: Option<Vec2>,
    status: String,
}

/// Camera target that keeps a view of `half` extents inside `bounds`.
/// Axes where the view is larger than the bounds are centered instead.
pub fn confine(target: Vec2, half: Vec2, bounds: Rect) -> Vec2 {
    let axis = |t: f32, half: f32, min: f32, size: f32| {
        if size <= half * 2.0 {
            min + size * 0.5
        } else {
            t.clamp(min + half, min + size - half)
        }
    };
    Vec2::new(
        axis(target.x, half.x, bounds.x, bounds.w),
        axis(target.y, half.y, bounds.y, bounds.h),
    )
}

/// Camera showing the world rect centered at `center` with `half` extents
fn world_camera(center: Vec2, half: Vec2) -> Camera2D {
    Camera2D::from_display_rect(Rect::new(center.x - half.x, center.y - half.y, half.x * 2.0, half.y * 2.0))
}

fn ctrl_down() -> bool {
    is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl)
        || is_key_down(KeyCode::LeftSuper) || is_key_down(KeyCode::RightSuper)
}

fn move_input() -> Vec2 {
    let mut dir = Vec2::ZERO;
    if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) { dir.x -= 1.0; }
    if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) { dir.x += 1.0; }
    if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) { dir.y -= 1.0; }
    if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) { dir.y += 1.0; }
    dir.normalize_or_zero()
}

impl AppState {
    /// Load `rooms_path` if it exists; otherwise start with a scene that has
    /// no room manager and let the edit tool create one.
    pub fn new(config: RoomConfig, rooms_path: PathBuf) -> Result<Self, RoomError> {
        let mut target = if rooms_path.exists() {
            match load_rooms(&rooms_path) {
                Ok(rooms) => RoomTarget::with_manager(RoomManager::with_rooms(rooms, config.clone())?),
                Err(e) => {
                    warn!("Failed to load {}: {}, starting empty", rooms_path.display(), e);
                    RoomTarget::new(config.clone())
                }
            }
        } else {
            RoomTarget::new(config.clone())
        };

        let mut tool = RoomEditTool::new();
        tool.activate_on(&mut target)?;
        target.ensure_manager()?.set_follow_target(Some(AGENT_ID));

        let cell = config.grid()?.cell_size();
        Ok(Self {
            mode: Mode::Edit,
            target,
            tool,
            controller: RoomTransitionController::new(config.membership),
            overlap: OverlapStage::new(),
            events: RoomEvents::new(),
            fade: ScreenFade::new(config.fade_duration, config.fade_hold),
            requested: None,
            agent: Agent {
                position: cell * 2.0,
                size: cell * 0.8,
                speed: cell.y * 8.0,
            },
            view: EditView { center: Vec2::ZERO, half_height: cell.y * 12.0 },
            rooms_path,
            last_pointer: None,
            status: String::new(),
        })
    }

    pub fn update(&mut self, dt: f32) -> Result<(), RoomError> {
        if is_key_pressed(KeyCode::Tab) {
            self.toggle_mode()?;
        }

        match self.mode {
            Mode::Edit => self.update_edit(dt),
            Mode::Play => self.update_play(dt),
        }
    }

    fn toggle_mode(&mut self) -> Result<(), RoomError> {
        self.mode = match self.mode {
            Mode::Edit => Mode::Play,
            Mode::Play => Mode::Edit,
        };

        let manager = self.target.ensure_manager()?;
        self.controller.reset(manager.cameras_mut());
        self.overlap.reset();
        self.events.clear_all();
        self.fade.snap_to(None);
        self.requested = None;

        match self.mode {
            Mode::Play => {
                self.tool.deactivate();
            }
            Mode::Edit => {
                self.tool.activate_on(&mut self.target)?;
            }
        }
        info!("Switched to {:?} mode", self.mode);
        Ok(())
    }

    fn edit_camera(&self) -> Camera2D {
        let aspect = screen_width() / screen_height().max(1.0);
        let half = Vec2::new(self.view.half_height * aspect, self.view.half_height);
        world_camera(self.view.center, half)
    }

    fn update_edit(&mut self, dt: f32) -> Result<(), RoomError> {
        let camera = self.edit_camera();
        let pointer = camera.screen_to_world(mouse_position().into());
        let manager = self.target.ensure_manager()?;

        // Pan and zoom
        let pan = move_input();
        if !ctrl_down() {
            self.view.center += pan * self.view.half_height * dt;
        }
        let (_, wheel) = mouse_wheel();
        if wheel != 0.0 {
            let factor = if wheel > 0.0 { 0.9 } else { 1.1 };
            self.view.half_height = (self.view.half_height * factor).clamp(2.0, 200.0);
        }

        // Pointer
        if is_mouse_button_pressed(MouseButton::Left) {
            self.tool.pointer_down(manager, pointer);
            self.last_pointer = Some(pointer);
        } else if is_mouse_button_released(MouseButton::Left) {
            self.tool.pointer_up(manager, pointer);
            self.last_pointer = None;
        } else if is_mouse_button_down(MouseButton::Left) && self.last_pointer != Some(pointer) {
            self.tool.pointer_drag(manager, pointer);
            self.last_pointer = Some(pointer);
        }
        self.tool.hover(manager, Some(pointer));

        if is_mouse_button_pressed(MouseButton::Right) {
            self.agent.position = pointer;
        }

        // Room commands
        if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
            if let Some(index) = self.tool.remove_room_at(manager, pointer) {
                self.status = format!("Removed room {}", index + 1);
            }
        }
        if is_key_pressed(KeyCode::C) && !ctrl_down() {
            if let Some((index, custom)) = self.tool.toggle_custom_camera_at(manager, pointer) {
                let state = if custom { "manual" } else { "fitted" };
                self.status = format!("Room {} camera size: {}", index + 1, state);
            }
        }
        let size_step = if is_key_pressed(KeyCode::RightBracket) {
            0.5
        } else if is_key_pressed(KeyCode::LeftBracket) {
            -0.5
        } else {
            0.0
        };
        if size_step != 0.0 {
            if let Some(index) = manager.rooms().find_at(manager.grid().world_to_cell(pointer)) {
                let current = manager.derived().camera(index).map_or(0.0, |rig| rig.ortho_size);
                let size = (current + size_step).max(0.5);
                if manager.set_camera_size(index, size) {
                    self.status = format!("Room {} camera size {}", index + 1, size);
                }
            }
        }

        if ctrl_down() {
            let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
            if is_key_pressed(KeyCode::Z) && !shift {
                if let Some(label) = self.tool.undo(manager) {
                    self.status = format!("Undo {}", label);
                }
            } else if is_key_pressed(KeyCode::Y) || (is_key_pressed(KeyCode::Z) && shift) {
                if let Some(label) = self.tool.redo(manager) {
                    self.status = format!("Redo {}", label);
                }
            }
            if is_key_pressed(KeyCode::S) {
                self.save();
            }
            if is_key_pressed(KeyCode::O) {
                self.reload()?;
            }
        }

        self.preview_camera()
    }

    /// Edit-mode stand-in for physics: poll overlaps and switch cameras as
    /// if the agent had just walked in.
    fn preview_camera(&mut self) -> Result<(), RoomError> {
        let manager = self.target.ensure_manager()?;
        let overlapping = query_overlaps(&self.agent.rect(), manager.derived());
        if let Some(room) = self.controller.sync_overlapping(&overlapping) {
            manager.transition(&mut self.controller, room)?;
        }
        Ok(())
    }

    fn update_play(&mut self, dt: f32) -> Result<(), RoomError> {
        self.agent.position += move_input() * self.agent.speed * dt;

        let manager = self.target.ensure_manager()?;
        self.overlap.step(&self.agent.rect(), manager.derived(), &mut self.events);
        if let Err(e) = self.controller.physics_step(manager, &mut self.events) {
            warn!("Physics step: {}", e);
        }

        let active = self.controller.active_room();
        if active != self.requested {
            if let Some(room) = active {
                self.fade.request(room);
            }
            self.requested = active;
        }
        if let Some(event) = self.fade.update(dt) {
            debug!("Fade: {:?}", event);
        }
        Ok(())
    }

    fn save(&mut self) {
        let Some(manager) = self.target.manager() else { return };
        self.status = match save_rooms(manager.rooms(), &self.rooms_path) {
            Ok(()) => format!("Saved {}", self.rooms_path.display()),
            Err(e) => {
                error!("Failed to save {}: {}", self.rooms_path.display(), e);
                format!("Save failed: {}", e)
            }
        };
    }

    fn reload(&mut self) -> Result<(), RoomError> {
        let rooms = match load_rooms(&self.rooms_path) {
            Ok(rooms) => rooms,
            Err(e) => {
                error!("Failed to load {}: {}", self.rooms_path.display(), e);
                self.status = format!("Load failed: {}", e);
                return Ok(());
            }
        };

        let mut manager = RoomManager::with_rooms(rooms, self.target.config().clone())?;
        manager.set_follow_target(Some(AGENT_ID));
        self.target.replace_manager(manager);
        self.tool.clear_history();
        self.controller = RoomTransitionController::new(self.target.config().membership);
        self.status = format!("Loaded {}", self.rooms_path.display());
        Ok(())
    }

    /// Camera for the rig the fade currently shows
    fn play_camera(&self, manager: &RoomManager) -> Option<Camera2D> {
        let room = self.fade.shown()?;
        let rig = manager.derived().camera(room)?;

        let aspect = screen_width() / screen_height().max(1.0);
        let half = Vec2::new(rig.ortho_size * aspect, rig.ortho_size);

        let mut target = self.agent.position;
        if let Some(trigger) = manager.derived().resolve_trigger(rig.confiner) {
            target = confine(target, half, trigger.world_rect());
        }
        if rig.pixel_perfect {
            target = (target * PIXELS_PER_UNIT).round() / PIXELS_PER_UNIT;
        }
        Some(world_camera(target, half))
    }

    pub fn draw(&self) {
        clear_background(BACKGROUND);
        let Some(manager) = self.target.manager() else { return };

        let camera = match self.mode {
            Mode::Edit => self.edit_camera(),
            Mode::Play => self
                .play_camera(manager)
                .unwrap_or_else(|| world_camera(self.agent.position, Vec2::splat(manager.config().max_ortho_size))),
        };
        set_camera(&camera);

        let mut gizmos = MacroquadGizmos::new(camera);
        match self.mode {
            Mode::Edit => {
                let half = Vec2::new(self.view.half_height * screen_width() / screen_height().max(1.0), self.view.half_height);
                let view = Rect::new(self.view.center.x - half.x, self.view.center.y - half.y, half.x * 2.0, half.y * 2.0);
                draw_cell_grid(manager.grid(), view, GRID_LINE);
                self.tool.render(manager, &mut gizmos);
            }
            Mode::Play => manager.draw_gizmos(&mut gizmos),
        }

        let agent = self.agent.rect();
        draw_rectangle(agent.x, agent.y, agent.w, agent.h, AGENT_FILL);

        gizmos.flush_labels();

        if self.mode == Mode::Play {
            let alpha = self.fade.alpha();
            if alpha > 0.0 {
                draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, alpha));
            }
        }

        self.draw_hud(manager);
    }

    fn draw_hud(&self, manager: &RoomManager) {
        let active = self
            .controller
            .active_room()
            .map_or("none".to_string(), |i| (i + 1).to_string());
        let lines = [
            format!(
                "{:?} mode | {} rooms | active camera: {}",
                self.mode,
                manager.rooms().len(),
                active
            ),
            match self.mode {
                Mode::Edit => format!("{}: drag to create/resize  Right click: place agent  Del: remove  C: camera size  Ctrl+Z/Y/S/O  Tab: play", self.tool.label()),
                Mode::Play => "Arrows/WASD: move  Tab: edit".to_string(),
            },
            self.status.clone(),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, 24.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}
