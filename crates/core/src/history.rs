/// Fixed-capacity rolling history of usage samples.
///
/// Backed by a slot array and a head index: once full, each [`append`]
/// overwrites the oldest slot.  Slots start at `0.0`, so [`snapshot`] always
/// returns exactly `capacity` values (a flat zero line before data arrives),
/// while [`recorded`] returns only the samples actually appended.
///
/// [`append`]: RollingHistory::append
/// [`snapshot`]: RollingHistory::snapshot
/// [`recorded`]: RollingHistory::recorded
#[derive(Debug, Clone, PartialEq)]
pub struct RollingHistory {
    slots: Box<[f32]>,
    /// Index of the next write, which is also the oldest slot.
    head: usize,
    /// Samples appended since creation or the last `clear()`, capped at capacity.
    filled: usize,
}

impl RollingHistory {
    /// Create a zero-filled history holding `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            filled: 0,
        }
    }

    /// Capacity for a window of `history_secs` sampled every `interval_ms`.
    pub fn capacity_for(interval_ms: u64, history_secs: u64) -> usize {
        if interval_ms == 0 {
            return 1;
        }
        ((history_secs * 1000) / interval_ms).max(1) as usize
    }

    /// Create a history sized for the given sampling window.
    pub fn with_window(interval_ms: u64, history_secs: u64) -> Self {
        Self::new(Self::capacity_for(interval_ms, history_secs))
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn append(&mut self, value: f32) {
        self.slots[self.head] = value;
        self.head = (self.head + 1) % self.slots.len();
        self.filled = (self.filled + 1).min(self.slots.len());
    }

    /// Reset every slot to `0.0`; capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.fill(0.0);
        self.head = 0;
        self.filled = 0;
    }

    /// All slots ordered oldest → newest, as an owned copy.
    pub fn snapshot(&self) -> Vec<f32> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer).copied().collect()
    }

    /// Only the appended samples, ordered oldest → newest.
    pub fn recorded(&self) -> Vec<f32> {
        let snapshot = self.snapshot();
        snapshot[snapshot.len() - self.filled..].to_vec()
    }

    /// Most recently appended sample, if any.
    pub fn latest(&self) -> Option<f32> {
        if self.filled == 0 {
            return None;
        }
        let idx = (self.head + self.slots.len() - 1) % self.slots.len();
        Some(self.slots[idx])
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of recorded samples (never exceeds capacity).
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_from_window() {
        assert_eq!(RollingHistory::capacity_for(500, 60), 120);
        assert_eq!(RollingHistory::capacity_for(10_000, 10), 1);
        assert_eq!(RollingHistory::with_window(1000, 60).capacity(), 60);
    }

    #[test]
    fn starts_zero_filled() {
        let h = RollingHistory::new(4);
        assert_eq!(h.snapshot(), vec![0.0; 4]);
        assert!(h.is_empty());
        assert_eq!(h.latest(), None);
    }

    #[test]
    fn partial_fill_pads_on_the_left() {
        let mut h = RollingHistory::new(4);
        h.append(1.0);
        h.append(2.0);
        assert_eq!(h.snapshot(), vec![0.0, 0.0, 1.0, 2.0]);
        assert_eq!(h.recorded(), vec![1.0, 2.0]);
        assert_eq!(h.latest(), Some(2.0));
    }

    #[test]
    fn append_beyond_capacity_evicts_oldest() {
        let mut h = RollingHistory::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            h.append(v);
            assert_eq!(h.snapshot().len(), 3);
        }
        assert_eq!(h.snapshot(), vec![3.0, 4.0, 5.0]);
        assert_eq!(h.recorded(), vec![3.0, 4.0, 5.0]);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn clear_zeroes_and_keeps_capacity() {
        let mut h = RollingHistory::new(5);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
            h.append(v);
        }
        h.clear();
        assert_eq!(h.capacity(), 5);
        assert_eq!(h.snapshot(), vec![0.0; 5]);
        assert!(h.recorded().is_empty());

        h.append(7.0);
        assert_eq!(h.snapshot(), vec![0.0, 0.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn snapshot_is_independent_of_buffer() {
        let mut h = RollingHistory::new(2);
        h.append(1.0);
        let snap = h.snapshot();
        h.append(2.0);
        h.append(3.0);
        assert_eq!(snap, vec![0.0, 1.0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut h = RollingHistory::new(0);
        h.append(9.0);
        h.append(8.0);
        assert_eq!(h.snapshot(), vec![8.0]);
    }
}
