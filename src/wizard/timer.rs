//! Single-slot pending transition
//!
//! At most one transition is outstanding at a time. Scheduling replaces
//! whatever was pending, so the last scheduled transition wins.

use std::time::Instant;

/// What happens when a pending transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Move the active step forward by one
    Advance,
    /// Hide the last step because it was left empty
    HideIdle,
}

#[derive(Debug, Default)]
pub struct PendingTransition {
    slot: Option<(Instant, TransitionKind)>,
}

impl PendingTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` at `deadline`, replacing anything already pending
    pub fn schedule(&mut self, deadline: Instant, kind: TransitionKind) {
        self.slot = Some((deadline, kind));
    }

    pub fn cancel(&mut self) {
        self.slot = None;
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.slot.map(|(deadline, _)| deadline)
    }

    pub fn kind(&self) -> Option<TransitionKind> {
        self.slot.map(|(_, kind)| kind)
    }

    /// Take the transition if its deadline has passed
    ///
    /// Returns each scheduled transition at most once.
    pub fn take_due(&mut self, now: Instant) -> Option<TransitionKind> {
        match self.slot {
            Some((deadline, kind)) if deadline <= now => {
                self.slot = None;
                Some(kind)
            }
            _ => None,
        }
    }
}
