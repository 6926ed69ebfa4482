//! DNS resolution traits
//!
//! Contains the core [`Resolve`] trait and the [`HostResolution`] handle a
//! resolver hands back so an in-progress lookup can be cancelled.

use std::sync::Arc;

use super::receiver::ResolutionReceiver;
use super::types::Name;

/// Cancellation handle for one in-progress resolution.
pub trait HostResolution: Send + 'static {
    /// Stop the resolution. No further receiver calls happen afterwards.
    fn cancel(&mut self);
}

impl HostResolution for futures::future::AbortHandle {
    fn cancel(&mut self) {
        self.abort();
    }
}

/// A resolution that already finished when it began; nothing to cancel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Finished;

impl HostResolution for Finished {
    fn cancel(&mut self) {}
}

/// Trait for asynchronous hostname resolution.
///
/// Implementations report through the receiver, in order:
/// [`ResolutionReceiver::resolution_began`] exactly once, then
/// [`ResolutionReceiver::address_resolved`] for every address as it becomes
/// available, then [`ResolutionReceiver::resolution_complete`]. A failed
/// lookup is reported as completion without addresses.
///
/// `resolve` is called from within a tokio runtime and must not block.
pub trait Resolve: Send + Sync + 'static {
    fn resolve(&self, name: &Name, port: u16, receiver: ResolutionReceiver);
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: &Name, port: u16, receiver: ResolutionReceiver) {
        (**self).resolve(name, port, receiver);
    }
}

impl<R: Resolve + ?Sized> Resolve for Box<R> {
    fn resolve(&self, name: &Name, port: u16, receiver: ResolutionReceiver) {
        (**self).resolve(name, port, receiver);
    }
}
