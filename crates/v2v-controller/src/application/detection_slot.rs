//! DetectionSlot: the one piece of state shared by the engine and the
//! detection task.
//!
//! # What lives here? (for beginners)
//!
//! Two values cross between the concurrent activities:
//!
//! - the **trigger**: "please run one capture + classify cycle", written by the
//!   engine and cleared by the detection task;
//! - the **result**: the verdict of the last completed cycle, written by the
//!   detection task and read (then reset) by the engine.
//!
//! Both live in one `SlotState` behind a `tokio::sync::watch` channel.  Every
//! update goes through `send_modify`, which takes the channel's internal lock,
//! so a reader always sees a complete state and never a half-written one.
//! Waiting is done with `Receiver::wait_for`, which checks the current value
//! first, so a wake-up cannot be missed.
//!
//! # Cycle numbering
//!
//! Each accepted trigger is numbered.  [`DetectionSlot::request`] hands the
//! engine a [`DetectionTicket`] carrying that number, and
//! [`DetectionSlot::wait_for`] resolves once a cycle with at least that number
//! has been published.  A trigger raised while another is still pending is
//! folded into the pending one: both callers get the same ticket and exactly
//! one detection cycle services them.

use tokio::sync::watch;
use v2v_core::DetectionResult;

/// Proof that a detection was requested; redeem with [`DetectionSlot::wait_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DetectionTicket(u64);

/// A trigger taken by the detection task; hand back to [`DetectionSlot::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DetectionCycle(u64);

/// A result together with the cycle count at the moment it was read.
///
/// Hand it back to [`DetectionSlot::reset_if_unchanged`] to consume the
/// result without erasing a verdict published after the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionReading {
    pub result: DetectionResult,
    completed: u64,
}

impl DetectionTicket {
    /// The cycle number this ticket waits for.
    pub fn number(self) -> u64 {
        self.0
    }
}

impl DetectionCycle {
    /// The number of this cycle; matches the ticket it services.
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SlotState {
    result: DetectionResult,
    pending: bool,
    requested: u64,
    completed: u64,
}

/// Synchronized trigger/result handoff between the engine and the detection task.
#[derive(Debug)]
pub struct DetectionSlot {
    state: watch::Sender<SlotState>,
}

impl DetectionSlot {
    /// Creates a slot with no pending trigger and a `Negative` result.
    pub fn new() -> Self {
        let (state, _rx) = watch::channel(SlotState::default());
        Self { state }
    }

    // ── Engine side ───────────────────────────────────────────────────────────

    /// Raises the trigger unless one is already pending.
    pub fn request(&self) -> DetectionTicket {
        let mut ticket = 0;
        self.state.send_modify(|s| {
            if !s.pending {
                s.pending = true;
                s.requested += 1;
            }
            ticket = s.requested;
        });
        DetectionTicket(ticket)
    }

    /// Waits until the cycle for `ticket` (or a later one) has completed and
    /// returns the result it published.
    pub async fn wait_for(&self, ticket: DetectionTicket) -> DetectionResult {
        self.wait_reading(ticket).await.result
    }

    /// Like [`wait_for`](Self::wait_for), but keeps the cycle count for
    /// [`reset_if_unchanged`](Self::reset_if_unchanged).
    pub async fn wait_reading(&self, ticket: DetectionTicket) -> DetectionReading {
        let mut rx = self.state.subscribe();
        let done = rx
            .wait_for(|s| s.completed >= ticket.0)
            .await
            .map(|s| DetectionReading {
                result: s.result,
                completed: s.completed,
            });
        // The sender lives in `self`, so the channel cannot be closed here.
        done.unwrap_or_else(|_| self.reading())
    }

    /// Returns the result of the most recently completed cycle.
    pub fn current(&self) -> DetectionResult {
        self.state.borrow().result
    }

    /// Returns the current result and the cycle it belongs to.
    pub fn reading(&self) -> DetectionReading {
        let s = self.state.borrow();
        DetectionReading {
            result: s.result,
            completed: s.completed,
        }
    }

    /// Resets the result to `Negative` so a positive is reported only once.
    pub fn reset(&self) {
        self.state
            .send_modify(|s| s.result = DetectionResult::default());
    }

    /// Resets the result to `Negative` unless a cycle has published since
    /// `seen` was read.  Returns `true` if the result was reset.
    pub fn reset_if_unchanged(&self, seen: DetectionReading) -> bool {
        self.state.send_if_modified(|s| {
            if s.completed == seen.completed {
                s.result = DetectionResult::default();
                true
            } else {
                false
            }
        })
    }

    /// Returns whether a trigger is waiting to be serviced.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }

    // ── Detection task side ───────────────────────────────────────────────────

    /// Waits for a pending trigger, clears it, and returns the cycle to run.
    pub async fn next_trigger(&self) -> DetectionCycle {
        let mut rx = self.state.subscribe();
        // Cannot fail: the sender lives in `self`.
        let _ = rx.wait_for(|s| s.pending).await;
        drop(rx);

        let mut cycle = 0;
        self.state.send_modify(|s| {
            s.pending = false;
            cycle = s.requested;
        });
        DetectionCycle(cycle)
    }

    /// Publishes the verdict of `cycle`.
    pub fn publish(&self, cycle: DetectionCycle, result: DetectionResult) {
        self.state.send_modify(|s| {
            s.result = result;
            s.completed = s.completed.max(cycle.0);
        });
    }
}

impl Default for DetectionSlot {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
