//! Race coordinator
//!
//! Owns the in-flight attempts of one operation, the failures collected so
//! far and the single-winner guard. Attempts are futures held in a
//! [`FuturesUnordered`]; cancelling them means dropping them.

use std::io;
use std::mem;

use futures::StreamExt;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::FuturesUnordered;

use crate::connect::types::{CandidateEndpoint, Connect};
use crate::error::AttemptFailure;

/// Identifier of one attempt within its operation.
pub type AttemptId = u64;

/// Completion report of a single attempt.
pub struct AttemptOutcome<T> {
    pub id: AttemptId,
    pub endpoint: CandidateEndpoint,
    pub result: io::Result<T>,
}

/// The four conditions whose conjunction means the operation has nothing
/// left to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExhaustionConditions {
    pub resolution_complete: bool,
    pub queue_empty: bool,
    pub in_flight_empty: bool,
    pub no_winner: bool,
}

impl ExhaustionConditions {
    pub fn all_hold(&self) -> bool {
        self.resolution_complete && self.queue_empty && self.in_flight_empty && self.no_winner
    }
}

pub struct RaceCoordinator<T> {
    in_flight: FuturesUnordered<BoxFuture<'static, AttemptOutcome<T>>>,
    failures: Vec<AttemptFailure>,
    next_id: AttemptId,
    winner: bool,
}

impl<T: Send + 'static> RaceCoordinator<T> {
    pub fn new() -> Self {
        Self {
            in_flight: FuturesUnordered::new(),
            failures: Vec::new(),
            next_id: 0,
            winner: false,
        }
    }

    /// Start one attempt against `candidate`.
    pub fn begin_attempt<C>(&mut self, connector: &C, candidate: CandidateEndpoint) -> AttemptId
    where
        C: Connect<Connection = T> + ?Sized,
    {
        let id = self.next_id;
        self.next_id += 1;

        let attempt = connector.connect(&candidate);
        self.in_flight.push(
            async move {
                AttemptOutcome {
                    id,
                    endpoint: candidate,
                    result: attempt.await,
                }
            }
            .boxed(),
        );
        id
    }

    /// Wait for the next attempt to finish.
    ///
    /// Pending forever while nothing is in flight, so it can sit in a
    /// `select!` next to the other event sources.
    pub async fn next_outcome(&mut self) -> AttemptOutcome<T> {
        if self.in_flight.is_empty() {
            return futures::future::pending().await;
        }
        match self.in_flight.next().await {
            Some(outcome) => outcome,
            None => futures::future::pending().await,
        }
    }

    pub fn record_failure(&mut self, endpoint: &CandidateEndpoint, error: io::Error) {
        self.failures.push(AttemptFailure::new(endpoint.addr, error));
    }

    /// Claim the win. Only the first claim succeeds.
    pub fn record_winner(&mut self) -> bool {
        !mem::replace(&mut self.winner, true)
    }

    pub fn has_winner(&self) -> bool {
        self.winner
    }

    /// Abandon every in-flight attempt. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let abandoned = mem::take(&mut self.in_flight);
        let count = abandoned.len();
        drop(abandoned);
        count
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn failures(&self) -> &[AttemptFailure] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<AttemptFailure> {
        mem::take(&mut self.failures)
    }
}

impl<T: Send + 'static> Default for RaceCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}
