//! Hostname endpoint
//!
//! Entry point of the engine. An endpoint bundles a resolver, a connector
//! and a clock; every [`connect`](HostnameEndpoint::connect) call starts an
//! independent operation on the current tokio runtime.

use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, TokioClock};
use crate::config::ConnectParams;
use crate::connect::happy_eyeballs::{self, OperationContext};
use crate::connect::{Connect, Connecting, TcpConnector};
use crate::dns::{GaiResolver, Name, Resolve};
use crate::telemetry::{ConnectStats, ConnectStatsSnapshot};

/// Connects to `hostname:port` by racing staggered attempts over every
/// resolved address.
///
/// ```no_run
/// # async fn demo() -> hostdial_client::Result<()> {
/// use hostdial_client::HostnameEndpoint;
///
/// let endpoint = HostnameEndpoint::tcp();
/// let stream = endpoint.connect("example.com", 443).await?;
/// # drop(stream);
/// # Ok(())
/// # }
/// ```
pub struct HostnameEndpoint<R = GaiResolver, C = TcpConnector, K = TokioClock> {
    resolver: Arc<R>,
    connector: Arc<C>,
    clock: Arc<K>,
    params: ConnectParams,
    stats: Arc<ConnectStats>,
}

impl HostnameEndpoint {
    /// System resolver and raw TCP streams with default parameters.
    pub fn tcp() -> Self {
        Self::new(GaiResolver::new(), TcpConnector::new())
    }
}

impl<R: Resolve, C: Connect> HostnameEndpoint<R, C, TokioClock> {
    pub fn new(resolver: R, connector: C) -> Self {
        Self {
            resolver: Arc::new(resolver),
            connector: Arc::new(connector),
            clock: Arc::new(TokioClock),
            params: ConnectParams::default(),
            stats: Arc::new(ConnectStats::new()),
        }
    }
}

impl<R: Resolve, C: Connect, K: Clock> HostnameEndpoint<R, C, K> {
    /// Replace the time source used for attempt spacing.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> HostnameEndpoint<R, C, K2> {
        HostnameEndpoint {
            resolver: self.resolver,
            connector: self.connector,
            clock: Arc::new(clock),
            params: self.params,
            stats: self.stats,
        }
    }

    /// Default parameters for [`connect`](Self::connect).
    #[must_use]
    pub fn with_params(mut self, params: ConnectParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ConnectParams {
        &self.params
    }

    /// Counters shared by every operation started from this endpoint and
    /// its clones.
    pub fn stats(&self) -> ConnectStatsSnapshot {
        self.stats.snapshot()
    }

    /// Connect using the endpoint's parameters.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn connect(&self, hostname: &str, port: u16) -> Connecting<C::Connection> {
        self.connect_with(hostname, port, self.params.clone())
    }

    /// Connect using `params` for this operation only.
    ///
    /// An invalid hostname or invalid parameters settle the returned future
    /// immediately without touching the resolver.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn connect_with(
        &self,
        hostname: &str,
        port: u16,
        params: ConnectParams,
    ) -> Connecting<C::Connection> {
        let name = match Name::parse(hostname) {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!(hostname, error = %err, "rejecting hostname");
                return Connecting::ready(Err(err));
            }
        };
        if let Err(err) = params.validate() {
            tracing::debug!(hostname, error = %err, "rejecting connect parameters");
            return Connecting::ready(Err(err));
        }

        let clock: Arc<dyn Clock> = self.clock.clone();
        let ctx = OperationContext {
            resolver: Arc::clone(&self.resolver),
            connector: Arc::clone(&self.connector),
            clock,
            stats: Arc::clone(&self.stats),
        };
        happy_eyeballs::spawn(ctx, name, port, params)
    }
}

impl<R, C, K> Clone for HostnameEndpoint<R, C, K> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            connector: Arc::clone(&self.connector),
            clock: Arc::clone(&self.clock),
            params: self.params.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<R, C, K> fmt::Debug for HostnameEndpoint<R, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostnameEndpoint")
            .field("params", &self.params)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}
