//! Generational handles for derived room artifacts
//!
//! Trigger volumes and camera rigs are referenced by handle rather than by
//! walking a scene tree. A handle is a slot index plus a generation:
//! destroying an artifact bumps the slot's generation, so a handle kept by a
//! stale caller (for example a camera confiner pointing at a destroyed
//! trigger) stops resolving instead of silently matching a newer artifact.

/// Reference to a trigger volume or camera rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index (for storage access)
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Allocates handles and tracks which ones are alive.
///
/// Freed slots are reused LIFO with an incremented generation.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Handle {
        if let Some(index) = self.free_indices.pop() {
            Handle::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Handle::new(index, 0)
        }
    }

    /// Free a handle. Returns true if it was alive.
    pub fn free(&mut self, handle: Handle) -> bool {
        if !self.is_alive(handle) {
            return false;
        }

        self.generations[handle.index as usize] += 1;
        self.free_indices.push(handle.index);
        true
    }

    pub fn is_alive(&self, handle: Handle) -> bool {
        self.generations
            .get(handle.index as usize)
            .map_or(false, |&gen| gen == handle.generation)
    }
}
