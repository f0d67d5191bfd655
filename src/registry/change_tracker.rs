use std::collections::BTreeSet;

/// Records which variable indices were written since the last drain.
///
/// Membership is a dense flag vector so marking is O(1) and an index is
/// recorded at most once however often it is written.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    flags: Vec<bool>,
    dirty: Vec<usize>,
}

impl ChangeTracker {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            flags: vec![false; n],
            dirty: Vec::with_capacity(n),
        }
    }

    /// grow to track `n` indices, only called while the registry structure changes
    pub(crate) fn resize(&mut self, n: usize) {
        if n > self.flags.len() {
            self.flags.resize(n, false);
        }
    }

    pub fn mark_dirty(&mut self, index: usize) {
        if index >= self.flags.len() {
            self.resize(index + 1);
        }
        if !self.flags[index] {
            self.flags[index] = true;
            self.dirty.push(index);
        }
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Return every index written since the last drain and clear the set.
    pub fn drain_dirty(&mut self) -> BTreeSet<usize> {
        let flags = &mut self.flags;
        self.dirty
            .drain(..)
            .inspect(|&i| flags[i] = false)
            .collect()
    }

    /// Forget a single index, used when its variable is removed.
    pub(crate) fn forget(&mut self, index: usize) {
        if self.is_dirty(index) {
            self.flags[index] = false;
            self.dirty.retain(|&i| i != index);
        }
    }
}
