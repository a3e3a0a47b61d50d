use std::collections::VecDeque;

use ropey::Rope;

/// Number of snapshots kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 9;

/// Bounded, linear history of text snapshots.
///
/// Slot 0 is the newest snapshot. `version` selects the current one;
/// larger values point further back into undo history. Committing while
/// `version > 0` throws away the snapshots newer than the current one.
#[derive(Clone)]
pub struct History {
    snapshots: VecDeque<Rope>,
    capacity: usize,
    version: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` snapshots.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// Maximum number of snapshots retained.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the current snapshot (0 = newest).
    pub const fn version(&self) -> usize {
        self.version
    }

    /// Number of snapshots actually held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The current snapshot. An unwritten history reads as empty text.
    pub fn current(&self) -> Rope {
        self.snapshots
            .get(self.version)
            .cloned()
            .unwrap_or_else(Rope::new)
    }

    /// Store `text` as the newest snapshot and make it current.
    pub fn commit(&mut self, text: Rope) {
        // Redo future is discarded; the current snapshot becomes slot 1.
        self.snapshots.drain(..self.version.min(self.snapshots.len()));
        self.snapshots.push_front(text);
        self.snapshots.truncate(self.capacity);
        self.version = 0;
        tracing::trace!(held = self.snapshots.len(), "history.commit");
    }

    /// Step `step` versions back. Returns `false` (and changes nothing)
    /// when that would leave the retained history.
    pub fn undo(&mut self, step: usize) -> bool {
        if step == 0 {
            return false;
        }
        match self.version.checked_add(step) {
            Some(target) if target < self.snapshots.len() => {
                self.version = target;
                true
            }
            _ => false,
        }
    }

    /// Step `step` versions forward. Returns `false` on underflow.
    pub fn redo(&mut self, step: usize) -> bool {
        if step == 0 {
            return false;
        }
        match self.version.checked_sub(step) {
            Some(target) => {
                self.version = target;
                true
            }
            None => false,
        }
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.version = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("held", &self.snapshots.len())
            .field("capacity", &self.capacity)
            .field("version", &self.version)
            .finish()
    }
}
