//! Action trait and lifecycle
//!
//! An action is one autonomous behaviour: drive a distance, raise the lift,
//! close the intake. It is started once and then stepped once per tick until
//! it reports [`EndState::End`]. An action that reports
//! [`EndState::Background`] keeps being stepped but stops holding up the
//! actions queued after it.

/// Result of stepping an action for one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndState {
    /// Still working; keep stepping
    Continue,
    /// Finished; stop stepping
    End,
    /// Keep stepping, but let the next action start
    Background,
}

/// Where an action is in its life
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Queued, never started
    #[default]
    NotStarted,
    /// Started and blocking the queue
    Running,
    /// Started and stepped, but no longer blocking
    Backgrounded,
    /// Finished
    Ended,
}

impl Lifecycle {
    /// Lifecycle name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Lifecycle::NotStarted => "not-started",
            Lifecycle::Running => "running",
            Lifecycle::Backgrounded => "backgrounded",
            Lifecycle::Ended => "ended",
        }
    }

    /// True if the action is stepped each tick
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Running | Lifecycle::Backgrounded)
    }

    /// True if the action holds up the rest of the queue
    pub fn is_blocking(&self) -> bool {
        matches!(self, Lifecycle::Running)
    }

    /// Lifecycle after a successful `start`
    pub fn after_start(self) -> Result<Lifecycle, ActionError> {
        match self {
            Lifecycle::NotStarted => Ok(Lifecycle::Running),
            from => Err(invalid_transition(from, "start")),
        }
    }

    /// Lifecycle after a `step` that returned `end`.
    ///
    /// A backgrounded action never becomes blocking again.
    pub fn after_step(self, end: EndState) -> Result<Lifecycle, ActionError> {
        match (self, end) {
            (Lifecycle::Running | Lifecycle::Backgrounded, EndState::End) => Ok(Lifecycle::Ended),
            (Lifecycle::Running, EndState::Continue) => Ok(Lifecycle::Running),
            (Lifecycle::Running | Lifecycle::Backgrounded, _) => Ok(Lifecycle::Backgrounded),
            (from, _) => Err(invalid_transition(from, "step")),
        }
    }
}

/// Action contract violations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionError {
    /// `op` is not allowed from lifecycle `from`
    InvalidTransition {
        /// Lifecycle the action was in
        from: Lifecycle,
        /// Operation attempted ("start" or "step")
        op: &'static str,
    },
}

impl core::fmt::Display for ActionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActionError::InvalidTransition { from, op } => {
                write!(f, "invalid action transition: {} while {}", op, from.name())
            }
        }
    }
}

fn invalid_transition(from: Lifecycle, op: &'static str) -> ActionError {
    debug_assert!(false, "invalid action transition: {} while {}", op, from.name());
    ActionError::InvalidTransition { from, op }
}

/// A unit of autonomous behaviour commanding a context `C`
///
/// `C` is whatever the action drives: typically the robot's subsystems plus
/// the current pressure sample. Actions hold no reference to it between
/// calls.
pub trait Action<C> {
    /// Short name for logging
    fn name(&self) -> &'static str {
        "action"
    }

    /// Called exactly once, when the action becomes the foreground action
    fn start(&mut self, ctx: &mut C);

    /// Called once per tick after `start`, until it returns `End`
    fn step(&mut self, ctx: &mut C) -> EndState;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Tests: lifecycle transitions
    // ========================================================================

    #[test]
    fn test_lifecycle_start_then_step() {
        let running = Lifecycle::NotStarted.after_start().unwrap();
        assert_eq!(running, Lifecycle::Running);
        assert_eq!(running.after_step(EndState::Continue).unwrap(), Lifecycle::Running);
        assert_eq!(
            running.after_step(EndState::Background).unwrap(),
            Lifecycle::Backgrounded
        );
        assert_eq!(running.after_step(EndState::End).unwrap(), Lifecycle::Ended);
    }

    #[test]
    fn test_backgrounded_never_blocks_again() {
        let bg = Lifecycle::Backgrounded;
        assert_eq!(bg.after_step(EndState::Continue).unwrap(), Lifecycle::Backgrounded);
        assert!(!bg.is_blocking());
        assert!(bg.is_active());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "invalid action transition"))]
    fn test_double_start_is_rejected() {
        let result = Lifecycle::Running.after_start();
        assert_eq!(
            result,
            Err(ActionError::InvalidTransition {
                from: Lifecycle::Running,
                op: "start",
            })
        );
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "invalid action transition"))]
    fn test_step_after_end_is_rejected() {
        assert!(Lifecycle::Ended.after_step(EndState::Continue).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ActionError::InvalidTransition {
            from: Lifecycle::Ended,
            op: "step",
        };
        let mut buf = heapless::String::<64>::new();
        core::fmt::write(&mut buf, format_args!("{}", err)).unwrap();
        assert_eq!(buf.as_str(), "invalid action transition: step while ended");
    }
}
