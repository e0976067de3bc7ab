//! Authoring target
//!
//! The scene-level slot a room tool edits. A fresh scene may not have a room
//! manager yet; tools create one on activation instead of failing.

use log::info;
use crate::config::RoomConfig;
use crate::error::RoomError;
use crate::game::RoomManager;

pub struct RoomTarget {
    config: RoomConfig,
    manager: Option<RoomManager>,
}

impl RoomTarget {
    /// Target with no manager yet
    pub fn new(config: RoomConfig) -> Self {
        Self { config, manager: None }
    }

    pub fn with_manager(manager: RoomManager) -> Self {
        Self { config: manager.config().clone(), manager: Some(manager) }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn manager(&self) -> Option<&RoomManager> {
        self.manager.as_ref()
    }

    pub fn manager_mut(&mut self) -> Option<&mut RoomManager> {
        self.manager.as_mut()
    }

    /// Manager for this target, created on first use.
    /// Only an invalid config can make this fail.
    pub fn ensure_manager(&mut self) -> Result<&mut RoomManager, RoomError> {
        let manager = match self.manager.take() {
            Some(manager) => manager,
            None => {
                info!("No room manager in scene, creating one");
                RoomManager::new(self.config.clone())?
            }
        };
        Ok(self.manager.insert(manager))
    }

    /// Swap in a different manager (level reload)
    pub fn replace_manager(&mut self, manager: RoomManager) {
        self.config = manager.config().clone();
        self.manager = Some(manager);
    }
}
