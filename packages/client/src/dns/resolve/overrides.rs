//! DNS resolver with hostname overrides
//!
//! Answers configured hostnames from a fixed table and hands every other
//! name to a fallback resolver. Useful for tests and custom routing.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use super::receiver::ResolutionReceiver;
use super::traits::Resolve;
use super::types::Name;
use crate::dns::gai::GaiResolver;

/// Resolver with static hostname overrides.
#[derive(Debug, Clone)]
pub struct StaticResolver<R = GaiResolver> {
    overrides: HashMap<String, Vec<IpAddr>>,
    fallback: R,
}

impl StaticResolver<GaiResolver> {
    pub fn new() -> Self {
        Self::with_fallback(GaiResolver::new())
    }
}

impl Default for StaticResolver<GaiResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolve> StaticResolver<R> {
    pub fn with_fallback(fallback: R) -> Self {
        Self {
            overrides: HashMap::new(),
            fallback,
        }
    }

    /// Answer `hostname` with `addrs`, in the given order. Matching is
    /// case-insensitive.
    #[must_use]
    pub fn insert(mut self, hostname: &str, addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        self.overrides
            .insert(hostname.to_ascii_lowercase(), addrs.into_iter().collect());
        self
    }
}

impl<R: Resolve> Resolve for StaticResolver<R> {
    fn resolve(&self, name: &Name, port: u16, receiver: ResolutionReceiver) {
        match self.overrides.get(&name.as_str().to_ascii_lowercase()) {
            Some(ips) => {
                tracing::trace!(hostname = %name, count = ips.len(), "answered from overrides");
                receiver.resolve_immediately(ips.iter().map(|ip| SocketAddr::new(*ip, port)));
            }
            None => self.fallback.resolve(name, port, receiver),
        }
    }
}
