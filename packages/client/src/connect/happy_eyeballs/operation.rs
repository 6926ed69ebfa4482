//! Hostname connect operation
//!
//! One spawned task owns all state of an operation: the resolution, the
//! attempt scheduler and the race. Resolver events, the scheduler timer,
//! attempt outcomes and cancellation are multiplexed in a single
//! `select!` loop, so no two handlers ever run concurrently and the result
//! is delivered exactly once.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{oneshot, watch};
use tokio::time::Instant;
use tracing::Instrument;

use super::connecting::{CancelHandle, Connecting};
use super::race::{AttemptOutcome, ExhaustionConditions, RaceCoordinator};
use super::scheduler::AttemptScheduler;
use crate::clock::Clock;
use crate::config::ConnectParams;
use crate::connect::types::{Connect, map_address};
use crate::dns::{HostResolution, Name, ResolutionEvent, ResolutionEvents, ResolutionReceiver, Resolve};
use crate::error::{ConnectError, Result};
use crate::telemetry::ConnectStats;

/// Collaborators shared by every operation of an endpoint.
pub(crate) struct OperationContext<R, C> {
    pub resolver: Arc<R>,
    pub connector: Arc<C>,
    pub clock: Arc<dyn Clock>,
    pub stats: Arc<ConnectStats>,
}

/// Spawn the operation onto the current tokio runtime.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub(crate) fn spawn<R, C>(
    ctx: OperationContext<R, C>,
    name: Name,
    port: u16,
    params: ConnectParams,
) -> Connecting<C::Connection>
where
    R: Resolve,
    C: Connect,
{
    let (cancel, cancel_rx) = CancelHandle::new();
    let (result_tx, result_rx) = oneshot::channel();
    let span = tracing::debug_span!("hostname_connect", host = %name, port);

    let OperationContext {
        resolver,
        connector,
        clock,
        stats,
    } = ctx;
    let (receiver, events) = ResolutionReceiver::channel();
    let operation = HostnameConnect::new(name, port, params, connector, clock, stats, events, cancel_rx);

    tokio::spawn(
        async move {
            let result = operation.run(&*resolver, receiver).await;
            if result_tx.send(result).is_err() {
                tracing::trace!("caller dropped before the result was delivered");
            }
        }
        .instrument(span),
    );

    Connecting::new(result_rx, cancel)
}

enum Step<T> {
    Continue,
    Settled(Result<T>),
}

struct HostnameConnect<C: Connect> {
    name: Name,
    port: u16,
    params: ConnectParams,
    connector: Arc<C>,
    clock: Arc<dyn Clock>,
    stats: Arc<ConnectStats>,
    events: ResolutionEvents,
    resolution: Option<Box<dyn HostResolution>>,
    resolution_complete: bool,
    events_closed: bool,
    scheduler: AttemptScheduler,
    race: RaceCoordinator<C::Connection>,
    cancel: watch::Receiver<bool>,
}

impl<C: Connect> HostnameConnect<C> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: Name,
        port: u16,
        params: ConnectParams,
        connector: Arc<C>,
        clock: Arc<dyn Clock>,
        stats: Arc<ConnectStats>,
        events: ResolutionEvents,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        let scheduler = AttemptScheduler::new(params.attempt_delay);
        Self {
            name,
            port,
            params,
            connector,
            clock,
            stats,
            events,
            resolution: None,
            resolution_complete: false,
            events_closed: false,
            scheduler,
            race: RaceCoordinator::new(),
            cancel,
        }
    }

    async fn run<R: Resolve + ?Sized>(
        mut self,
        resolver: &R,
        receiver: ResolutionReceiver,
    ) -> Result<C::Connection> {
        ConnectStats::incr(&self.stats.operations_started);
        tracing::debug!("starting hostname resolution");
        resolver.resolve(&self.name, self.port, receiver);

        loop {
            if *self.cancel.borrow() {
                return self.settle_cancelled();
            }

            let step = self.step().await;
            if let Step::Settled(result) = step {
                return result;
            }

            self.start_due_attempts();

            if self.exhaustion().all_hold() {
                return self.settle_exhausted();
            }
        }
    }

    /// Wait for the next event and handle it.
    async fn step(&mut self) -> Step<C::Connection> {
        let timer = sleep_until(&self.clock, self.scheduler.deadline());

        tokio::select! {
            biased;

            changed = self.cancel.changed() => {
                // A dropped sender means the caller is gone.
                if changed.is_err() || *self.cancel.borrow() {
                    return Step::Settled(self.settle_cancelled());
                }
                Step::Continue
            }

            event = self.events.recv(), if !self.events_closed => {
                self.on_resolution_event(event);
                Step::Continue
            }

            () = timer => Step::Continue,

            outcome = self.race.next_outcome() => self.on_attempt_outcome(outcome),
        }
    }

    fn on_resolution_event(&mut self, event: Option<ResolutionEvent>) {
        match event {
            Some(ResolutionEvent::Began(handle)) => {
                if self.resolution.replace(handle).is_some() {
                    tracing::warn!("resolver reported resolution start twice");
                }
            }
            Some(ResolutionEvent::Address(address)) => {
                match map_address(&address, self.port, &self.params) {
                    Some(candidate) => {
                        tracing::trace!(candidate = %candidate, "queueing candidate");
                        self.scheduler.submit(candidate, self.clock.now());
                    }
                    None => {
                        tracing::trace!(address = %address, "dropping address of unusable family");
                        ConnectStats::incr(&self.stats.addresses_dropped);
                    }
                }
            }
            Some(ResolutionEvent::Complete) => {
                tracing::debug!(queued = self.scheduler.len(), "hostname resolution complete");
                self.resolution_complete = true;
                self.events_closed = true;
                self.resolution = None;
            }
            None => {
                if !self.resolution_complete {
                    tracing::warn!("resolver went away without completing, treating as complete");
                }
                self.resolution_complete = true;
                self.events_closed = true;
                self.resolution = None;
            }
        }
    }

    fn on_attempt_outcome(&mut self, outcome: AttemptOutcome<C::Connection>) -> Step<C::Connection> {
        let AttemptOutcome {
            id,
            endpoint,
            result,
        } = outcome;

        match result {
            Ok(connection) => {
                if !self.race.record_winner() {
                    return Step::Continue;
                }
                tracing::debug!(attempt = id, remote = %endpoint, "connection established");
                self.shutdown();
                ConnectStats::incr(&self.stats.operations_succeeded);
                Step::Settled(Ok(connection))
            }
            Err(error) => {
                tracing::debug!(attempt = id, remote = %endpoint, error = %error, "connection attempt failed");
                ConnectStats::incr(&self.stats.attempts_failed);
                self.race.record_failure(&endpoint, error);
                Step::Continue
            }
        }
    }

    fn start_due_attempts(&mut self) {
        while let Some(candidate) = self.scheduler.pop_due(self.clock.now()) {
            let id = self.race.begin_attempt(&*self.connector, candidate.clone());
            ConnectStats::incr(&self.stats.attempts_started);
            tracing::debug!(attempt = id, remote = %candidate, "starting connection attempt");
        }
    }

    fn exhaustion(&self) -> ExhaustionConditions {
        ExhaustionConditions {
            resolution_complete: self.resolution_complete,
            queue_empty: self.scheduler.is_empty(),
            in_flight_empty: self.race.in_flight() == 0,
            no_winner: !self.race.has_winner(),
        }
    }

    fn settle_cancelled(&mut self) -> Result<C::Connection> {
        tracing::debug!(in_flight = self.race.in_flight(), "connect operation cancelled");
        self.shutdown();
        ConnectStats::incr(&self.stats.operations_cancelled);
        Err(ConnectError::cancelled(self.name.as_str(), self.port))
    }

    fn settle_exhausted(&mut self) -> Result<C::Connection> {
        let failures = self.race.take_failures();
        tracing::debug!(failures = failures.len(), "every candidate failed");
        ConnectStats::incr(&self.stats.operations_failed);
        Err(ConnectError::exhausted(self.name.as_str(), failures))
    }

    /// Stop everything still running: in-flight attempts, queued
    /// candidates and the resolution.
    fn shutdown(&mut self) {
        let abandoned = self.race.cancel_all();
        if abandoned > 0 {
            tracing::trace!(abandoned, "cancelled in-flight attempts");
            ConnectStats::add(&self.stats.attempts_cancelled, abandoned);
        }
        self.scheduler.cancel_all();
        self.cancel_resolution();
    }

    fn cancel_resolution(&mut self) {
        let mut cancelled = false;
        if !self.resolution_complete {
            if let Some(mut handle) = self.resolution.take() {
                handle.cancel();
                cancelled = true;
            }
            self.resolution_complete = true;
        }

        self.events.close();
        self.events_closed = true;
        // A start report still queued carries the only handle.
        while let Ok(event) = self.events.try_recv() {
            if let ResolutionEvent::Began(mut handle) = event {
                if !cancelled {
                    handle.cancel();
                    cancelled = true;
                }
            }
        }
    }
}

fn sleep_until(clock: &Arc<dyn Clock>, deadline: Option<Instant>) -> BoxFuture<'static, ()> {
    match deadline {
        Some(deadline) => clock.sleep_until(deadline),
        None => Box::pin(futures::future::pending()),
    }
}
