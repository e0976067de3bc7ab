//! Room system settings
//!
//! Loaded from `rooms.config.ron` next to the executable's working directory.
//! Every field has a default, so a config file only needs the values it changes.

use std::fs;
use std::path::Path;
use log::{info, warn};
use macroquad::math::Vec2;
use serde::{Serialize, Deserialize};
use crate::error::RoomError;
use crate::world::Grid;

/// Default config file name
pub const CONFIG_FILE: &str = "rooms.config.ron";

/// How the transition controller tracks the rooms an agent overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MembershipModel {
    /// Entering a room forgets every other room (one active room at a time)
    #[default]
    SingleActive,
    /// Rooms accumulate while overlapped and are dropped on exit
    MultiMembership,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Upper bound for a fitted orthographic half-size (world units)
    pub max_ortho_size: f32,
    /// Ask the camera system for pixel-perfect snapping on every rig
    pub pixel_perfect: bool,
    /// Width / height of the game view
    pub aspect_ratio: f32,
    pub membership: MembershipModel,
    /// World size of one cell
    pub cell_size: (f32, f32),
    /// World position of cell (0, 0)
    pub grid_origin: (f32, f32),
    /// Seconds for each fade half of a room transition
    pub fade_duration: f32,
    /// Seconds the screen stays black between fades
    pub fade_hold: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_ortho_size: 12.0,
            pixel_perfect: true,
            aspect_ratio: 16.0 / 9.0,
            membership: MembershipModel::SingleActive,
            cell_size: (1.0, 1.0),
            grid_origin: (0.0, 0.0),
            fade_duration: 0.25,
            fade_hold: 0.25,
        }
    }
}

impl RoomConfig {
    /// Check values that would otherwise produce NaN framing or a stuck fade
    pub fn validate(&self) -> Result<(), RoomError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !positive(self.max_ortho_size) {
            return Err(RoomError::InvalidConfig(format!(
                "max_ortho_size must be positive, got {}", self.max_ortho_size
            )));
        }
        if !positive(self.aspect_ratio) {
            return Err(RoomError::InvalidConfig(format!(
                "aspect_ratio must be positive, got {}", self.aspect_ratio
            )));
        }
        if !non_negative(self.fade_duration) || !non_negative(self.fade_hold) {
            return Err(RoomError::InvalidConfig(format!(
                "fade timings must be non-negative, got {} / {}",
                self.fade_duration, self.fade_hold
            )));
        }
        self.grid()?;
        Ok(())
    }

    /// Grid described by `grid_origin` and `cell_size`
    pub fn grid(&self) -> Result<Grid, RoomError> {
        Grid::new(
            Vec2::new(self.grid_origin.0, self.grid_origin.1),
            Vec2::new(self.cell_size.0, self.cell_size.1),
        )
    }

    pub fn from_ron(s: &str) -> Result<Self, RoomError> {
        let config: RoomConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RoomError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load a config file if it exists, otherwise use defaults.
    ///
    /// A file that exists but fails to parse is an error: silently running
    /// with defaults would hide a typo in the user's settings.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, RoomError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default room settings", path.display());
            return Ok(Self::default());
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded room settings from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                Err(e)
            }
        }
    }
}
