//! Session state machine.
//!
//! State transitions:
//! - Active(p) --commit--> Active(p) + pending --advance--> Active(p + 1)
//! - Active(last) --commit--> pending --advance--> Complete
//! - empty batch: Complete from the start
//!
//! Design: same pattern as the queue's task records. The state is the single
//! source of truth and only changes through methods, which enforce the
//! invariants below so callers cannot break them:
//! - `position` never decreases and never exceeds the batch length
//! - with no commit pending, `decisions.len() == position`
//! - a commit is pending at most once per card

use super::batch::TriageBatch;
use super::decision::Decision;
use super::ids::TaskId;

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Card at `position` is on screen.
    Active { position: usize },

    /// All cards decided (terminal).
    Complete,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Complete)
    }
}

/// A decision accepted for the current card, not yet advanced past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub position: usize,
    pub task_id: TaskId,
    pub outcome: bool,
}

/// Result of advancing past a committed card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { position: usize },
    Complete(Vec<Decision>),
}

#[derive(Debug, Clone)]
pub struct SessionState {
    len: usize,
    position: usize,
    decisions: Vec<Decision>,
    pending_outcome: Option<bool>,
}

impl SessionState {
    pub fn new(batch_len: usize) -> Self {
        Self {
            len: batch_len,
            position: 0,
            decisions: Vec::with_capacity(batch_len),
            pending_outcome: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.position >= self.len {
            SessionPhase::Complete
        } else {
            SessionPhase::Active {
                position: self.position,
            }
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decisions accumulated so far. Empty once handed over on completion.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn pending_outcome(&self) -> Option<bool> {
        self.pending_outcome
    }

    /// Accept `outcome` for the current card.
    ///
    /// Returns `None` (and changes nothing) when the session is complete or a
    /// commit is already pending for this card.
    pub fn commit(&mut self, batch: &TriageBatch, outcome: bool) -> Option<Commit> {
        let SessionPhase::Active { position } = self.phase() else {
            return None;
        };
        if self.pending_outcome.is_some() {
            return None;
        }
        let task = batch.get(position)?;

        self.decisions.push(Decision::new(task.id, outcome));
        self.pending_outcome = Some(outcome);
        Some(Commit {
            position,
            task_id: task.id,
            outcome,
        })
    }

    /// Move past the committed card.
    ///
    /// Returns `None` when no commit is pending. On the last card the
    /// decision sequence is moved out and returned with `Advance::Complete`.
    pub fn advance(&mut self) -> Option<Advance> {
        self.pending_outcome.take()?;
        self.position += 1;

        if self.position < self.len {
            Some(Advance::Next {
                position: self.position,
            })
        } else {
            Some(Advance::Complete(std::mem::take(&mut self.decisions)))
        }
    }
}
