//! Connect parameter methods for the `Dial` builder

use std::net::SocketAddr;
use std::time::Duration;

use hostdial_client::{AddressFamilies, ConnectParams};

use super::core::Dial;

impl<R, C> Dial<R, C> {
    /// Set the timeout of each individual connection attempt
    ///
    /// # Arguments
    /// * `timeout` - Upper bound for one attempt; must be non-zero
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.params.timeout = timeout;
        self
    }

    /// Set the minimum spacing between attempt starts
    ///
    /// # Arguments
    /// * `delay` - Time to wait after starting one attempt before the next
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn attempt_delay(mut self, delay: Duration) -> Self {
        self.params.attempt_delay = delay;
        self
    }

    /// Bind every outgoing socket to a local address
    ///
    /// # Arguments
    /// * `local` - Local address; port 0 lets the OS choose
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn bind(mut self, local: SocketAddr) -> Self {
        self.params.bind_address = Some(local);
        self
    }

    /// Only connect over IPv4
    #[must_use]
    pub fn ipv4_only(self) -> Self {
        self.families(AddressFamilies::ipv4_only())
    }

    /// Only connect over IPv6
    #[must_use]
    pub fn ipv6_only(self) -> Self {
        self.families(AddressFamilies::ipv6_only())
    }

    /// Restrict the address families candidates are built for
    #[must_use]
    pub fn families(mut self, families: AddressFamilies) -> Self {
        self.params.families = families;
        self
    }

    /// Replace every parameter at once
    #[must_use]
    pub fn params(mut self, params: ConnectParams) -> Self {
        self.params = params;
        self
    }

    /// Parameters operations will be started with
    pub fn current_params(&self) -> &ConnectParams {
        &self.params
    }
}
