//! Resolution receiver
//!
//! The receiver is the only way a resolver talks to a connect operation.
//! Every call becomes a [`ResolutionEvent`] on a channel drained by the
//! operation's owning task, so resolvers may report from any task or thread.

use std::fmt;

use futures::future::{AbortHandle, AbortRegistration};
use tokio::sync::mpsc;

use super::traits::{Finished, HostResolution};
use super::types::ResolvedAddress;

/// One notification from a resolver.
pub enum ResolutionEvent {
    Began(Box<dyn HostResolution>),
    Address(ResolvedAddress),
    Complete,
}

impl fmt::Debug for ResolutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Began(_) => f.write_str("Began"),
            Self::Address(addr) => f.debug_tuple("Address").field(addr).finish(),
            Self::Complete => f.write_str("Complete"),
        }
    }
}

/// Receiving end of a [`ResolutionReceiver`].
pub type ResolutionEvents = mpsc::UnboundedReceiver<ResolutionEvent>;

/// Sink for the results of one hostname resolution.
///
/// `resolution_complete` consumes the receiver, so no address can follow
/// completion. Dropping the receiver without completing counts as
/// completion on the operation side.
#[derive(Debug)]
pub struct ResolutionReceiver {
    tx: mpsc::UnboundedSender<ResolutionEvent>,
    began: bool,
}

impl ResolutionReceiver {
    /// Create a receiver together with the channel its events arrive on.
    pub fn channel() -> (Self, ResolutionEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, began: false }, rx)
    }

    /// Resolution started; `handle` cancels it.
    pub fn resolution_began<H: HostResolution>(&mut self, handle: H) {
        debug_assert!(!self.began, "resolution_began reported twice");
        self.began = true;
        self.send(ResolutionEvent::Began(Box::new(handle)));
    }

    /// Report that resolution started and return the registration for an
    /// abortable lookup future whose abort handle was handed over.
    pub fn resolution_began_abortable(&mut self) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        self.resolution_began(handle);
        registration
    }

    /// One more address is available.
    pub fn address_resolved(&self, address: impl Into<ResolvedAddress>) {
        self.send(ResolutionEvent::Address(address.into()));
    }

    /// Resolution finished; no more addresses follow.
    pub fn resolution_complete(self) {
        self.send(ResolutionEvent::Complete);
    }

    /// Report a resolution that needs no lookup: begin, deliver every
    /// address, complete.
    pub fn resolve_immediately<I>(mut self, addresses: I)
    where
        I: IntoIterator,
        I::Item: Into<ResolvedAddress>,
    {
        self.resolution_began(Finished);
        for address in addresses {
            self.address_resolved(address);
        }
        self.resolution_complete();
    }

    fn send(&self, event: ResolutionEvent) {
        // The operation may already have settled and dropped its end.
        if self.tx.send(event).is_err() {
            tracing::trace!("resolution event dropped, operation already settled");
        }
    }
}
