//! Time source for attempt spacing
//!
//! The connect operation never reads the system time directly; it asks its
//! [`Clock`]. [`TokioClock`] follows `tokio::time`, so paused test runtimes
//! drive it deterministically.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::time::Instant;

/// Current time plus a sleep that ends at a deadline.
///
/// Dropping the future returned by [`Clock::sleep_until`] cancels the timer.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;

    fn sleep_until(&self, deadline: Instant) -> BoxFuture<'static, ()>;
}

/// Clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) -> BoxFuture<'static, ()> {
        tokio::time::sleep_until(deadline).boxed()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep_until(&self, deadline: Instant) -> BoxFuture<'static, ()> {
        (**self).sleep_until(deadline)
    }
}
