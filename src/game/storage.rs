//! Sparse per-handle storage
//!
//! Each artifact kind (trigger volumes, camera rigs) lives in its own
//! `ArtifactStorage<T>`, indexed by handle slot.

use super::handle::Handle;

pub struct ArtifactStorage<T> {
    data: Vec<Option<T>>,
}

impl<T> ArtifactStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Insert or replace the value for a handle's slot
    pub fn insert(&mut self, handle: Handle, value: T) {
        let idx = handle.index() as usize;
        if idx >= self.data.len() {
            self.data.resize_with(idx + 1, || None);
        }
        self.data[idx] = Some(value);
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.data.get_mut(handle.index() as usize).and_then(Option::take)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.data.get(handle.index() as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.data.get_mut(handle.index() as usize).and_then(Option::as_mut)
    }
}

impl<T> Default for ArtifactStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
