//! Connection configuration
//!
//! Parameters fixed for the lifetime of one hostname connect operation, plus
//! socket tuning applied by the TCP connector.

use std::net::SocketAddr;
use std::time::Duration;

pub mod validation;


pub use validation::{ConfigDefaults, validate_params};

/// Address family of a resolved address or candidate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4
    Inet,
    /// IPv6
    Inet6,
}

impl AddressFamily {
    #[must_use]
    pub fn of(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => Self::Inet,
            SocketAddr::V6(_) => Self::Inet6,
        }
    }
}

/// Set of address families the engine is allowed to connect over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressFamilies {
    pub ipv4: bool,
    pub ipv6: bool,
}

impl AddressFamilies {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
        }
    }

    #[must_use]
    pub const fn ipv4_only() -> Self {
        Self {
            ipv4: true,
            ipv6: false,
        }
    }

    #[must_use]
    pub const fn ipv6_only() -> Self {
        Self {
            ipv4: false,
            ipv6: true,
        }
    }

    #[must_use]
    pub fn contains(self, family: AddressFamily) -> bool {
        match family {
            AddressFamily::Inet => self.ipv4,
            AddressFamily::Inet6 => self.ipv6,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.ipv4 && !self.ipv6
    }
}

impl Default for AddressFamilies {
    fn default() -> Self {
        Self::all()
    }
}

/// Parameters of one hostname connect operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Timeout applied to each individual connection attempt.
    pub timeout: Duration,
    /// Local address to bind outgoing sockets to.
    pub bind_address: Option<SocketAddr>,
    /// Minimum spacing between the starts of successive attempts.
    pub attempt_delay: Duration,
    /// Families candidates may be built for.
    pub families: AddressFamilies,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            timeout: ConfigDefaults::ATTEMPT_TIMEOUT,
            bind_address: None,
            attempt_delay: ConfigDefaults::ATTEMPT_DELAY,
            families: AddressFamilies::all(),
        }
    }
}

impl ConnectParams {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_bind_address(mut self, bind_address: SocketAddr) -> Self {
        self.bind_address = Some(bind_address);
        self
    }

    #[must_use]
    pub fn with_attempt_delay(mut self, attempt_delay: Duration) -> Self {
        self.attempt_delay = attempt_delay;
        self
    }

    #[must_use]
    pub fn with_families(mut self, families: AddressFamilies) -> Self {
        self.families = families;
        self
    }

    /// Check the parameters before an operation starts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnectError::InvalidParams`] for a zero attempt
    /// timeout or an empty family set.
    pub fn validate(&self) -> crate::Result<()> {
        validate_params(self)
    }
}

/// TCP socket configuration applied to every established stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    pub nodelay: bool,
    pub keepalive: Option<Duration>,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            nodelay: true,
            keepalive: Some(ConfigDefaults::KEEPALIVE),
        }
    }
}
