//! Physics-step events
//!
//! The overlap stage (or any physics backend) pushes room overlap events
//! during a step; the transition controller drains them afterwards. Events
//! keep their delivery order.

/// Events of one kind, delivered in the order they were sent.
#[derive(Debug)]
pub struct EventQueue<T> {
    pending: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop pending events without handling them
    pub fn discard(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The tracked agent started or stopped overlapping a room's trigger volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Begin(usize),
    End(usize),
}

/// Container for room events of one physics step
#[derive(Debug, Default)]
pub struct RoomEvents {
    pub overlaps: EventQueue<OverlapEvent>,
}

impl RoomEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, room: usize) {
        self.overlaps.send(OverlapEvent::Begin(room));
    }

    pub fn end(&mut self, room: usize) {
        self.overlaps.send(OverlapEvent::End(room));
    }

    pub fn clear_all(&mut self) {
        self.overlaps.discard();
    }
}
