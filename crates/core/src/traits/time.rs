//! Time source abstraction
//!
//! Time-based actions (waits, timeouts) read the clock through
//! [`TimeSource`] so they run unchanged against a real clock on the robot and
//! a hand-advanced [`MockTime`] in tests.

use alloc::rc::Rc;
use core::cell::Cell;

/// Monotonic clock for the control loop
///
/// ```
/// use totebot_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let started = time.now_us();
/// time.advance_ms(300);
/// assert!(time.elapsed_secs(started) >= 0.3);
/// ```
pub trait TimeSource: Clone {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Microseconds since `reference_us`, saturating at zero
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }

    /// Seconds since `reference_us`
    fn elapsed_secs(&self, reference_us: u64) -> f32 {
        self.elapsed_since(reference_us) as f32 / 1_000_000.0
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Hand-advanced clock for tests
///
/// Clones share one counter, so a test can keep a handle and advance the
/// clock that an action already owns.
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Rc<Cell<u64>>,
}

impl MockTime {
    /// Clock starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock starting at `us`
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Rc::new(Cell::new(us)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Move forward by `us` microseconds
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get().saturating_add(us));
    }

    /// Move forward by `ms` milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms.saturating_mul(1000));
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
