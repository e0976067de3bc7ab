//! Room list loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable room files. Only the
//! ordered room list is persisted; trigger volumes and camera rigs are
//! regenerated after loading. List position is the room's identity, so
//! reordering a file reassigns every downstream trigger and camera.

use std::fs;
use std::path::Path;
use log::info;
use thiserror::Error;
use super::RoomCollection;

/// Validation limits to keep malformed files from producing absurd scenes
pub mod limits {
    /// Maximum number of rooms in a file
    pub const MAX_ROOMS: usize = 256;
    /// Maximum absolute cell coordinate
    pub const MAX_COORD: i32 = 1_000_000;
}

/// Error type for room file IO
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

fn validate_rooms(rooms: &RoomCollection) -> Result<(), LevelError> {
    if rooms.len() > limits::MAX_ROOMS {
        return Err(LevelError::Validation(format!(
            "too many rooms ({} > {})",
            rooms.len(),
            limits::MAX_ROOMS
        )));
    }

    for (i, room) in rooms.iter().enumerate() {
        let min = room.bounds.min;
        let max = room.bounds.max();
        let in_range = |v: i32| v.checked_abs().map_or(false, |a| a <= limits::MAX_COORD);
        if !(in_range(min.x) && in_range(min.y) && in_range(max.x) && in_range(max.y)) {
            return Err(LevelError::Validation(format!(
                "room {}: bounds ({}, {})..({}, {}) out of range",
                i, min.x, min.y, max.x, max.y
            )));
        }
    }

    Ok(())
}

/// Load rooms from a RON string
pub fn load_rooms_from_str(s: &str) -> Result<RoomCollection, LevelError> {
    let rooms: RoomCollection = ron::from_str(s)?;
    validate_rooms(&rooms)?;
    Ok(rooms)
}

/// Load rooms from a RON file
pub fn load_rooms<P: AsRef<Path>>(path: P) -> Result<RoomCollection, LevelError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let rooms = load_rooms_from_str(&contents)?;
    info!("Loaded {} rooms from {}", rooms.len(), path.display());
    Ok(rooms)
}

/// Serialize rooms to pretty RON
pub fn serialize_rooms(rooms: &RoomCollection) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(rooms, config)?)
}

/// Save rooms to a RON file
pub fn save_rooms<P: AsRef<Path>>(rooms: &RoomCollection, path: P) -> Result<(), LevelError> {
    let path = path.as_ref();
    let contents = serialize_rooms(rooms)?;
    fs::write(path, contents)?;
    info!("Saved {} rooms to {}", rooms.len(), path.display());
    Ok(())
}
