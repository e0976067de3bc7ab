//! Room runtime
//!
//! Everything derived from the authored room list, and the run-time side
//! that reacts to an agent moving between rooms:
//! - Handles/storage: explicit ownership of per-room artifacts
//! - Derived geometry: trigger volumes and camera rigs, index-aligned with rooms
//! - Manager: the room list plus its derived geometry, kept in sync
//! - Transition controller: room membership and the active camera
//! - Overlap stage and events: per-step begin/end notifications
//! - Screen fade: the visual layer around a camera swap

pub mod handle;
pub mod storage;
pub mod derived;
pub mod manager;
pub mod transition;
pub mod event;
pub mod overlap;
pub mod fade;

pub use handle::Handle;
pub use derived::{CameraRig, DerivedGeometry, RoomArtifacts, SyncReport, TargetId, TriggerVolume, fitting_ortho_size};
pub use manager::RoomManager;
pub use transition::{CameraSwitch, RoomTransitionController, RuntimeUpdatable};
pub use event::{EventQueue, OverlapEvent, RoomEvents};
pub use overlap::{OverlapStage, query_overlaps};
pub use fade::{FadeEvent, FadePhase, ScreenFade};
