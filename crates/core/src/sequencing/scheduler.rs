//! Action Scheduler
//!
//! Runs a fixed queue of actions cooperatively. At most one action is in the
//! foreground at a time; any number may run in the background. Nothing is
//! ever preempted.
//!
//! # Tick order
//!
//! 1. Every active action is stepped once, in queue order.
//! 2. Ended actions leave the running set.
//! 3. If no remaining action is blocking, the next queued action is started
//!    and becomes the foreground action. It is first stepped on the
//!    following tick.
//!
//! Step 3 looks at the running set after all of this tick's removals, so a
//! foreground action that ends lets its successor start in the same tick.

use alloc::boxed::Box;
use heapless::Vec;

use super::action::{Action, ActionError, Lifecycle};

/// Maximum number of actions in one routine
pub const MAX_ACTIONS: usize = 32;

/// Scheduler misuse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Queue already holds `MAX_ACTIONS` actions
    QueueFull,
    /// `start()` called after actions were already started
    AlreadyStarted,
    /// `tick()` called before `start()`
    NotStarted,
    /// An action lifecycle rule was broken
    Action(ActionError),
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::QueueFull => write!(f, "action queue full"),
            SchedulerError::AlreadyStarted => write!(f, "scheduler already started"),
            SchedulerError::NotStarted => write!(f, "scheduler not started"),
            SchedulerError::Action(e) => write!(f, "{}", e),
        }
    }
}

impl From<ActionError> for SchedulerError {
    fn from(e: ActionError) -> Self {
        SchedulerError::Action(e)
    }
}

struct Slot<C> {
    action: Box<dyn Action<C>>,
    lifecycle: Lifecycle,
}

/// Cooperative action scheduler over a context `C`
pub struct ActionScheduler<C> {
    slots: Vec<Slot<C>, MAX_ACTIONS>,
    /// Index of the next action to start
    cursor: usize,
    started: bool,
}

impl<C> ActionScheduler<C> {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            started: false,
        }
    }

    /// Append an action to the queue
    pub fn push(&mut self, action: Box<dyn Action<C>>) -> Result<(), SchedulerError> {
        self.slots
            .push(Slot {
                action,
                lifecycle: Lifecycle::NotStarted,
            })
            .map_err(|_| SchedulerError::QueueFull)
    }

    /// Number of queued actions, finished ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no actions are queued
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reset the cursor and start the first action.
    ///
    /// Every action may be started at most once, so this fails if any action
    /// has already left `NotStarted`.
    pub fn start(&mut self, ctx: &mut C) -> Result<(), SchedulerError> {
        if self
            .slots
            .iter()
            .any(|slot| slot.lifecycle != Lifecycle::NotStarted)
        {
            return Err(SchedulerError::AlreadyStarted);
        }
        self.cursor = 0;
        self.started = true;
        log::debug!("scheduler: start with {} actions", self.slots.len());
        self.start_next(ctx)
    }

    /// Advance every running action by one step.
    ///
    /// An empty queue is valid; ticking it does nothing.
    pub fn tick(&mut self, ctx: &mut C) -> Result<(), SchedulerError> {
        if !self.started {
            return Err(SchedulerError::NotStarted);
        }

        for (index, slot) in self.slots.iter_mut().enumerate().take(self.cursor) {
            if !slot.lifecycle.is_active() {
                continue;
            }
            let end = slot.action.step(ctx);
            let next = slot.lifecycle.after_step(end)?;
            if next != slot.lifecycle {
                log::debug!(
                    "scheduler: [{}] {} {} -> {}",
                    index,
                    slot.action.name(),
                    slot.lifecycle.name(),
                    next.name()
                );
            }
            slot.lifecycle = next;
        }

        if !self.is_blocked() {
            self.start_next(ctx)?;
        }
        Ok(())
    }

    /// True once every action has been started and has ended
    pub fn is_finished(&self) -> bool {
        self.started && self.cursor >= self.slots.len() && self.running_count() == 0
    }

    /// Number of actions currently being stepped
    pub fn running_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.lifecycle.is_active())
            .count()
    }

    /// Index of the blocking action, if any
    pub fn foreground_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.lifecycle.is_blocking())
    }

    /// Lifecycle of the action at `index`
    pub fn lifecycle(&self, index: usize) -> Option<Lifecycle> {
        self.slots.get(index).map(|slot| slot.lifecycle)
    }

    fn is_blocked(&self) -> bool {
        self.foreground_index().is_some()
    }

    fn start_next(&mut self, ctx: &mut C) -> Result<(), SchedulerError> {
        let index = self.cursor;
        let Some(slot) = self.slots.get_mut(index) else {
            return Ok(());
        };
        let next = slot.lifecycle.after_start()?;
        slot.action.start(ctx);
        slot.lifecycle = next;
        self.cursor += 1;
        log::debug!("scheduler: [{}] {} started", index, slot.action.name());
        Ok(())
    }
}

impl<C> Default for ActionScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
