//! Digital input debouncing

/// Debounced view of a noisy digital input.
///
/// The reported level only changes after the raw level has disagreed with
/// it for `threshold` consecutive samples. Feed it exactly one sample per
/// control period.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    stable: bool,
    pending: u16,
    threshold: u16,
}

impl Debouncer {
    /// Create a debouncer that starts at `initial` and needs `threshold`
    /// agreeing samples to flip. A threshold of 0 or 1 passes samples through.
    pub const fn new(initial: bool, threshold: u16) -> Self {
        Self {
            stable: initial,
            pending: 0,
            threshold,
        }
    }

    /// Feed one raw sample and return the debounced level.
    pub fn sample(&mut self, raw: bool) -> bool {
        if raw == self.stable {
            self.pending = 0;
            return self.stable;
        }

        self.pending = self.pending.saturating_add(1);
        if self.pending >= self.threshold {
            self.stable = raw;
            self.pending = 0;
        }
        self.stable
    }

    /// Current debounced level
    pub fn level(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_requires_consecutive_samples() {
        let mut debouncer = Debouncer::new(false, 3);
        assert!(!debouncer.sample(true));
        assert!(!debouncer.sample(true));
        assert!(debouncer.sample(true));
        assert!(debouncer.level());
    }

    #[test]
    fn test_debouncer_glitch_resets_count() {
        let mut debouncer = Debouncer::new(false, 3);
        debouncer.sample(true);
        debouncer.sample(true);
        debouncer.sample(false); // glitch
        assert!(!debouncer.sample(true));
        assert!(!debouncer.sample(true));
        assert!(debouncer.sample(true));
    }

    #[test]
    fn test_debouncer_threshold_one_passes_through() {
        let mut debouncer = Debouncer::new(false, 1);
        assert!(debouncer.sample(true));
        assert!(!debouncer.sample(false));
    }

    #[test]
    fn test_debouncer_zero_threshold_passes_through() {
        let mut debouncer = Debouncer::new(true, 0);
        assert!(!debouncer.sample(false));
    }
}
