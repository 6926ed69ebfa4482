//! Attempt scheduler
//!
//! Serializes attempt starts so that no two begin less than the attempt
//! delay apart, whatever the rate at which candidates arrive. Pure state:
//! the owning task supplies the time and sleeps until [`deadline`].
//!
//! [`deadline`]: AttemptScheduler::deadline

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::connect::types::CandidateEndpoint;

/// FIFO of candidates waiting for a start slot.
#[derive(Debug)]
pub struct AttemptScheduler {
    delay: Duration,
    queue: VecDeque<CandidateEndpoint>,
    last_start: Option<Instant>,
    // Some exactly when the queue is non-empty.
    deadline: Option<Instant>,
}

impl AttemptScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            queue: VecDeque::new(),
            last_start: None,
            deadline: None,
        }
    }

    /// Queue a candidate.
    ///
    /// With no start pending, the candidate is due at once when the delay
    /// has elapsed since the last start, otherwise when it elapses.
    pub fn submit(&mut self, candidate: CandidateEndpoint, now: Instant) {
        self.queue.push_back(candidate);
        if self.deadline.is_none() {
            let due = match self.last_start {
                Some(last) => (last + self.delay).max(now),
                None => now,
            };
            self.deadline = Some(due);
        }
    }

    /// When the head of the queue may start, if anything is queued.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Release the head candidate if its start time has come.
    ///
    /// Records `now` as the last start and, when more candidates wait,
    /// immediately schedules the next start one delay later.
    pub fn pop_due(&mut self, now: Instant) -> Option<CandidateEndpoint> {
        if self.deadline? > now {
            return None;
        }
        let candidate = self.queue.pop_front()?;
        self.last_start = Some(now);
        self.deadline = if self.queue.is_empty() {
            None
        } else {
            Some(now + self.delay)
        };
        Some(candidate)
    }

    /// Drop every queued candidate and the pending start. Returns how many
    /// candidates were discarded.
    pub fn cancel_all(&mut self) -> usize {
        let discarded = self.queue.len();
        self.queue.clear();
        self.deadline = None;
        discarded
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn last_start(&self) -> Option<Instant> {
        self.last_start
    }
}
