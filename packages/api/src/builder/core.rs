//! Core `Dial` builder structure and base functionality
//!
//! Contains the `Dial` struct and the methods that swap the resolver and
//! connector it will use.

use std::fmt;

use hostdial_client::{Connect, ConnectParams, GaiResolver, Resolve, TcpConnector};

/// Fluent builder for hostname connect operations
///
/// Type parameters select the collaborators:
/// - `R`: the resolver, [`GaiResolver`] by default
/// - `C`: the connector, [`TcpConnector`] yielding raw streams by default
pub struct Dial<R = GaiResolver, C = TcpConnector> {
    /// Resolver handing addresses to the engine
    pub(crate) resolver: R,
    /// Connector making each individual attempt
    pub(crate) connector: C,
    /// Parameters for every operation started from this builder
    pub(crate) params: ConnectParams,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl Dial {
    /// Start from the system resolver and plain TCP streams with default
    /// parameters
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: GaiResolver::new(),
            connector: TcpConnector::new(),
            params: ConnectParams::default(),
            debug_enabled: false,
        }
    }
}

impl Default for Dial {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolve, C: Connect> Dial<R, C> {
    /// Replace the resolver
    ///
    /// # Arguments
    /// * `resolver` - Any [`Resolve`] implementation, e.g. a
    ///   `HickoryResolver` or a `StaticResolver` with overrides
    ///
    /// # Returns
    /// `Dial` using the new resolver, for method chaining
    #[must_use]
    pub fn resolver<R2: Resolve>(self, resolver: R2) -> Dial<R2, C> {
        Dial {
            resolver,
            connector: self.connector,
            params: self.params,
            debug_enabled: self.debug_enabled,
        }
    }

    /// Replace the connector
    ///
    /// # Arguments
    /// * `connector` - Any [`Connect`] implementation, e.g. a
    ///   `TcpConnector` building a protocol on each stream
    ///
    /// # Returns
    /// `Dial` whose operations yield the new connector's connection type
    #[must_use]
    pub fn connector<C2: Connect>(self, connector: C2) -> Dial<R, C2> {
        Dial {
            resolver: self.resolver,
            connector,
            params: self.params,
            debug_enabled: self.debug_enabled,
        }
    }

    /// Enable debug logging for operations started from this builder
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }
}

impl<R, C> fmt::Debug for Dial<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dial")
            .field("params", &self.params)
            .field("debug_enabled", &self.debug_enabled)
            .finish_non_exhaustive()
    }
}
