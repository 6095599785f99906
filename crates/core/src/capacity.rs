//! Event capacity counter.

/// Registrations against an event's vacancy limit.
///
/// Events with an open vacancy type (or a limited one with no number set)
/// have no limit and are never full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub registered: u32,
    pub vacancy: Option<u32>,
}

impl Capacity {
    #[must_use]
    pub const fn new(registered: u32, vacancy: Option<u32>) -> Self {
        Self {
            registered,
            vacancy,
        }
    }

    /// No limit.
    #[must_use]
    pub const fn open(registered: u32) -> Self {
        Self::new(registered, None)
    }

    #[must_use]
    pub const fn is_limited(&self) -> bool {
        self.vacancy.is_some()
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        match self.vacancy {
            Some(vacancy) => self.registered >= vacancy,
            None => false,
        }
    }

    /// Spots left, saturating at zero. `None` when unlimited.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        match self.vacancy {
            Some(vacancy) => Some(vacancy.saturating_sub(self.registered)),
            None => None,
        }
    }
}
