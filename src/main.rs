//! BONNIE-ROOMS: room editor and camera transition playground
//!
//! Drag rooms onto the grid in edit mode, then press Tab and walk the agent
//! between them to see the camera switch rooms.
//!
//! Usage: `bonnie-rooms [rooms.ron]`

mod app;
mod draw;

use std::path::PathBuf;
use log::{error, info};
use macroquad::prelude::*;
use bonnie_rooms::VERSION;
use bonnie_rooms::config::{CONFIG_FILE, RoomConfig};
use app::{AppState, DEFAULT_ROOMS_FILE};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("BONNIE-ROOMS v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Bad settings are a caller error: refuse to start rather than guess
    let config = match RoomConfig::load_or_default(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid {}: {}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    let rooms_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOMS_FILE));

    let mut app = match AppState::new(config, rooms_path) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    info!("=== BONNIE-ROOMS v{} ===", VERSION);

    loop {
        if let Err(e) = app.update(get_frame_time()) {
            error!("{}", e);
            std::process::exit(1);
        }
        app.draw();
        next_frame().await;
    }
}
