//! Connector abstraction
//!
//! A connector performs exactly one connection attempt against one
//! candidate. Cancellation is dropping the returned future.

use std::io;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::candidate::CandidateEndpoint;

/// Establishes a single connection to a candidate endpoint.
///
/// The returned future must honour `endpoint.timeout` and report expiry as
/// an [`io::ErrorKind::TimedOut`] error. Dropping it before completion
/// abandons the attempt and releases its socket.
pub trait Connect: Send + Sync + 'static {
    /// What a successful attempt produces: a stream or a protocol built on
    /// top of one.
    type Connection: Send + 'static;

    fn connect(&self, endpoint: &CandidateEndpoint) -> BoxFuture<'static, io::Result<Self::Connection>>;
}

impl<C: Connect + ?Sized> Connect for Arc<C> {
    type Connection = C::Connection;

    fn connect(&self, endpoint: &CandidateEndpoint) -> BoxFuture<'static, io::Result<Self::Connection>> {
        (**self).connect(endpoint)
    }
}
