//! Terminal methods of the `Dial` builder
//!
//! Turn the configured builder into an endpoint or start an operation.

use hostdial_client::{Connect, Connecting, HostnameEndpoint, Resolve};

use super::core::Dial;

impl<R: Resolve, C: Connect> Dial<R, C> {
    /// Build a reusable endpoint
    ///
    /// Operations started from the endpoint (and its clones) share one set
    /// of statistics.
    ///
    /// # Returns
    /// `HostnameEndpoint` configured with this builder's collaborators and
    /// parameters
    #[must_use]
    pub fn endpoint(self) -> HostnameEndpoint<R, C> {
        HostnameEndpoint::new(self.resolver, self.connector).with_params(self.params)
    }

    /// Connect to `hostname:port`
    ///
    /// # Arguments
    /// * `hostname` - Host name or IP literal; IPv6 literals may be bracketed
    /// * `port` - Destination port
    ///
    /// # Returns
    /// `Connecting` future resolving to the first established connection
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn connect(self, hostname: &str, port: u16) -> Connecting<C::Connection> {
        if self.debug_enabled {
            tracing::debug!(
                hostname,
                port,
                attempt_delay = ?self.params.attempt_delay,
                timeout = ?self.params.timeout,
                "Dial: connecting"
            );
        }
        self.endpoint().connect(hostname, port)
    }
}
