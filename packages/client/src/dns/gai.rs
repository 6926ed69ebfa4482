//! System getaddrinfo-based DNS resolver
//!
//! Runs the blocking system lookup on tokio's blocking pool through
//! [`tokio::net::lookup_host`] and reports the results back through the
//! resolution receiver.

use std::net::SocketAddr;

use futures::future::Abortable;
use tracing::debug;

use crate::config::AddressFamily;
use crate::dns::resolve::utilities::sort_addresses_by_preference;
use crate::dns::resolve::{Name, Resolve, ResolutionReceiver};

/// Resolver backed by the operating system's `getaddrinfo`.
///
/// IP literals are answered without a lookup. A failed lookup is reported as
/// a completed resolution without addresses.
#[derive(Debug, Clone, Default)]
pub struct GaiResolver {
    prefer: Option<AddressFamily>,
}

impl GaiResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver addresses of `family` before the others.
    #[must_use]
    pub fn prefer(mut self, family: AddressFamily) -> Self {
        self.prefer = Some(family);
        self
    }

    #[must_use]
    pub fn prefer_ipv6(self, prefer: bool) -> Self {
        if prefer {
            self.prefer(AddressFamily::Inet6)
        } else {
            self.prefer(AddressFamily::Inet)
        }
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: &Name, port: u16, mut receiver: ResolutionReceiver) {
        if let Some(ip) = name.ip_literal() {
            receiver.resolve_immediately([SocketAddr::new(ip, port)]);
            return;
        }

        let hostname = name.as_str().to_owned();
        let prefer = self.prefer;
        let registration = receiver.resolution_began_abortable();

        let lookup = async move {
            match tokio::net::lookup_host((hostname.as_str(), port)).await {
                Ok(addrs) => {
                    let mut addrs: Vec<SocketAddr> = addrs.collect();
                    sort_addresses_by_preference(&mut addrs, prefer);
                    debug!(%hostname, count = addrs.len(), "system lookup finished");
                    for addr in addrs {
                        receiver.address_resolved(addr);
                    }
                }
                Err(error) => {
                    debug!(%hostname, %error, "system lookup failed");
                }
            }
            receiver.resolution_complete();
        };

        tokio::spawn(Abortable::new(lookup, registration));
    }
}
