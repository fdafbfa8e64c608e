use crate::foundation::core::{Frame, Resolution};

/// Bounded, chronological store of captured frames (oldest first).
///
/// Storage is a ring of reusable frame slots addressed by a rotating `head`. Evicting a frame only
/// advances `head`; the slot stays allocated and is overwritten by a later capture, so a steady
/// state run (constant capacity) performs no per-tick pixel allocations.
///
/// Ordering contract: logical index `0` is the oldest retained frame, `len() - 1` the newest.
pub struct HistoryBuffer {
    resolution: Resolution,
    slots: Vec<Frame>,
    head: usize,
    len: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer whose new slots are allocated at `resolution`.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            slots: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Create an empty buffer with `slots` frames preallocated up front.
    pub fn with_preallocated(resolution: Resolution, slots: usize) -> Self {
        Self {
            resolution,
            slots: (0..slots).map(|_| Frame::new(resolution)).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Resolution newly allocated slots are created at.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of retained frames.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` when no frames are retained.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, retained or spare.
    pub fn allocated_slots(&self) -> usize {
        self.slots.len()
    }

    /// Frame at logical `index` (0 = oldest).
    ///
    /// Panics when `index >= len()`; callers guard with [`HistoryBuffer::len`].
    pub fn at(&self, index: usize) -> &Frame {
        assert!(
            index < self.len,
            "history index {index} out of range (len {})",
            self.len
        );
        &self.slots[self.physical(index)]
    }

    /// Frame at logical `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        (index < self.len).then(|| &self.slots[self.physical(index)])
    }

    /// Most recently pushed frame.
    pub fn newest(&self) -> Option<&Frame> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate retained frames oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> + '_ {
        (0..self.len).map(move |i| &self.slots[self.physical(i)])
    }

    /// Append `frame` as the newest entry.
    pub fn push(&mut self, frame: Frame) {
        if self.len < self.slots.len() {
            let tail = self.physical(self.len);
            self.slots[tail] = frame;
            self.len += 1;
        } else {
            self.grow(frame);
        }
    }

    /// Append a new entry by filling a recycled slot in place.
    ///
    /// `fill` receives a frame whose previous contents are unspecified. When it returns an error the
    /// buffer is left exactly as it was before the call.
    pub fn push_with<E>(
        &mut self,
        fill: impl FnOnce(&mut Frame) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.len < self.slots.len() {
            let tail = self.physical(self.len);
            fill(&mut self.slots[tail])?;
            self.len += 1;
            return Ok(());
        }

        let mut frame = Frame::new(self.resolution);
        fill(&mut frame)?;
        self.grow(frame);
        Ok(())
    }

    /// Evict oldest entries until `len() <= capacity`.
    ///
    /// Evicted slots are kept as spares for later captures. When the spares greatly outnumber what
    /// `capacity` needs, the ring is compacted and the excess released.
    pub fn enforce_capacity(&mut self, capacity: usize) {
        let mut evicted = 0usize;
        while self.len > capacity {
            self.head = (self.head + 1) % self.slots.len();
            self.len -= 1;
            evicted += 1;
        }
        if self.len == 0 {
            self.head = 0;
        }

        let keep = capacity.saturating_add(1);
        if self.slots.len() > keep.saturating_mul(2) {
            self.compact(keep);
        }

        if evicted > 1 {
            tracing::debug!(evicted, capacity, "history trimmed after capacity shrink");
        }
    }

    /// Drop every retained frame, keeping slot storage.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn compact(&mut self, keep: usize) {
        let before = self.slots.len();
        self.slots.rotate_left(self.head);
        self.head = 0;
        self.slots.truncate(keep.max(self.len));
        tracing::debug!(
            before,
            after = self.slots.len(),
            "history ring compacted"
        );
    }

    // Ring is full: insert a new slot right after the newest entry.
    fn grow(&mut self, frame: Frame) {
        let at = self.physical_end();
        self.slots.insert(at, frame);
        if self.len > 0 && at <= self.head {
            self.head += 1;
        }
        self.len += 1;
    }

    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    fn physical_end(&self) -> usize {
        if self.slots.is_empty() {
            0
        } else {
            (self.head + self.len) % self.slots.len()
        }
    }
}

impl std::fmt::Debug for HistoryBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("resolution", &self.resolution)
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("head", &self.head)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/buffer.rs"]
mod tests;
