//! Room Editor
//!
//! Authoring side of the room system:
//! - Tool / Authorable capabilities
//! - Create-by-drag with live size and overlap feedback
//! - Edge handles for resizing
//! - Snapshot undo/redo

mod tool;
mod handles;
mod undo;
mod target;
mod room_edit;

pub use tool::*;
pub use handles::*;
pub use undo::*;
pub use target::*;
pub use room_edit::*;
