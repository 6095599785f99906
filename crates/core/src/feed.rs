//! Latest-response slot for polled data.
//!
//! Polled fetches may overlap: a slow response for fetch #3 can arrive after
//! the response for fetch #4. Each fetch is numbered when it is issued and the
//! slot only accepts a value whose number is strictly newer than the one it
//! holds, so a stale response never overwrites fresher data.

/// Monotonic number assigned to a fetch when it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sequence(u64);

impl Sequence {
    #[must_use]
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Holds the value from the newest applied fetch.
#[derive(Debug, Clone)]
pub struct LatestSlot<T> {
    applied: Option<Sequence>,
    value: Option<T>,
}

impl<T> LatestSlot<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applied: None,
            value: None,
        }
    }

    /// Apply `value` if `seq` is newer than the last applied sequence.
    ///
    /// Returns whether the value was applied.
    pub fn offer(&mut self, seq: Sequence, value: T) -> bool {
        if self.applied.is_some_and(|applied| seq <= applied) {
            return false;
        }
        self.applied = Some(seq);
        self.value = Some(value);
        true
    }

    /// Current value, if any fetch has landed.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Sequence of the current value.
    #[must_use]
    pub const fn applied(&self) -> Option<Sequence> {
        self.applied
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_first_offer() {
        let mut slot = LatestSlot::new();
        assert!(slot.get().is_none());
        assert!(slot.offer(Sequence::new(0), "a"));
        assert_eq!(slot.get(), Some(&"a"));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut slot = LatestSlot::new();
        assert!(slot.offer(Sequence::new(4), "fresh"));
        assert!(!slot.offer(Sequence::new(3), "stale"));
        assert_eq!(slot.get(), Some(&"fresh"));
        assert_eq!(slot.applied(), Some(Sequence::new(4)));
    }

    #[test]
    fn test_same_sequence_not_reapplied() {
        let mut slot = LatestSlot::new();
        assert!(slot.offer(Sequence::new(1), 1));
        assert!(!slot.offer(Sequence::new(1), 2));
        assert_eq!(slot.get(), Some(&1));
    }

    #[test]
    fn test_out_of_order_arrivals_keep_newest() {
        let mut slot = LatestSlot::new();
        for n in [2_u64, 5, 3, 1, 4] {
            slot.offer(Sequence::new(n), n);
        }
        assert_eq!(slot.get(), Some(&5));
    }
}
