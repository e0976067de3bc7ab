//! Error types for room management

use thiserror::Error;

/// Errors raised by the room core.
///
/// Rejected room creation is not an error: the edit tool simply leaves the
/// collection unchanged.
#[derive(Debug, Error)]
pub enum RoomError {
    /// Grid with a non-positive or non-finite cell size
    #[error("invalid grid: cell size ({x}, {y}) must be positive and finite")]
    InvalidGrid { x: f32, y: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A camera rig was requested for a room the derived geometry does not cover yet
    #[error("derived geometry out of sync: room {index} requested but only {rigs} camera rigs exist")]
    DerivedOutOfSync { index: usize, rigs: usize },

    #[error("no room at index {0}")]
    NoSuchRoom(usize),

    #[error("config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}
