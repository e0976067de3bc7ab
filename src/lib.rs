//! BONNIE-ROOMS: rectangular rooms on a 2D tile grid
//!
//! Rooms are authored by dragging rectangles onto the grid. Each room gets a
//! trigger volume and a camera rig derived from its bounds, and at run time
//! the camera switches to whichever room the player walks into.
//!
//! - `world`: cell-space geometry, rooms, level files
//! - `game`: derived geometry, room manager, transitions, overlap and fade
//! - `editor`: authoring tool, resize handles, undo
//! - `gizmo`: what the editor draws, independent of the renderer

pub mod config;
pub mod error;
pub mod gizmo;
pub mod world;
pub mod game;
pub mod editor;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
