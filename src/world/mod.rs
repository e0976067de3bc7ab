//! World module - grid rooms in cell space
//!
//! - Integer bounds math (construction, intersection, containment)
//! - Cell <-> world mapping
//! - Rooms and the ordered room collection
//! - RON persistence of the room list

mod bounds;
mod grid;
mod room;
mod level;

pub use bounds::*;
pub use grid::*;
pub use room::*;
pub use level::*;
