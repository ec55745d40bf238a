//! Tick counter.

/// Counter advanced once per event-loop iteration.
///
/// Wraps around on overflow, matching native unsigned arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: u32,
}

impl Counter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Advance by one.
    pub fn tick(&mut self) {
        self.value = self.value.wrapping_add(1);
    }

    /// Set back to zero.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Current value.
    pub fn value(&self) -> u32 {
        self.value
    }
}
