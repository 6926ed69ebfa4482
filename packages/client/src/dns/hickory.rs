//! DNS resolution via the [hickory-resolver](https://github.com/hickory-dns/hickory-dns) crate

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use futures::future::{Abortable, BoxFuture, FutureExt};
use futures::stream::FuturesUnordered;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::debug;

use crate::config::AddressFamily;
use crate::dns::resolve::{Name, Resolve, ResolutionReceiver};

type FamilyLookup = BoxFuture<'static, (AddressFamily, Result<Vec<SocketAddr>, ResolveError>)>;

/// Resolver issuing separate A and AAAA queries through hickory.
///
/// Both queries run concurrently and each family's addresses are reported
/// as soon as its answer arrives, so connection attempts on the faster
/// family can start while the other query is still outstanding. A failed
/// query only loses its own family.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioResolver>,
}

impl HickoryResolver {
    pub fn new(resolver: TokioResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Create a resolver from the system configuration (`/etc/resolv.conf`
    /// on unix).
    ///
    /// # Errors
    ///
    /// Returns the hickory error when the system configuration cannot be
    /// read.
    pub fn from_system_conf() -> Result<Self, ResolveError> {
        Ok(Self::new(TokioResolver::builder_tokio()?.build()))
    }

    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(opts)
                .build();
        Self::new(resolver)
    }
}

impl fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryResolver").finish_non_exhaustive()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: &Name, port: u16, mut receiver: ResolutionReceiver) {
        if let Some(ip) = name.ip_literal() {
            receiver.resolve_immediately([SocketAddr::new(ip, port)]);
            return;
        }

        let hostname = name.as_str().to_owned();
        let registration = receiver.resolution_began_abortable();

        let mut lookups: FuturesUnordered<FamilyLookup> = FuturesUnordered::new();
        lookups.push(ipv4_lookup(Arc::clone(&self.resolver), hostname.clone(), port));
        lookups.push(ipv6_lookup(Arc::clone(&self.resolver), hostname.clone(), port));

        let lookup = report_lookups(hostname, lookups, receiver);
        tokio::spawn(Abortable::new(lookup, registration));
    }
}

/// Forward each family's answer as it arrives, then complete. A failed
/// family is logged and skipped.
async fn report_lookups<S, E>(hostname: String, mut lookups: S, receiver: ResolutionReceiver)
where
    S: Stream<Item = (AddressFamily, Result<Vec<SocketAddr>, E>)> + Unpin,
    E: fmt::Display,
{
    while let Some((family, result)) = lookups.next().await {
        match result {
            Ok(addrs) => {
                debug!(%hostname, ?family, count = addrs.len(), "hickory lookup finished");
                for addr in addrs {
                    receiver.address_resolved(addr);
                }
            }
            Err(error) => {
                debug!(%hostname, ?family, %error, "hickory lookup failed");
            }
        }
    }
    receiver.resolution_complete();
}

fn ipv4_lookup(resolver: Arc<TokioResolver>, hostname: String, port: u16) -> FamilyLookup {
    async move {
        let result = resolver.ipv4_lookup(hostname.as_str()).await.map(|lookup| {
            lookup
                .iter()
                .map(|a| SocketAddr::from((a.0, port)))
                .collect()
        });
        (AddressFamily::Inet, result)
    }
    .boxed()
}

fn ipv6_lookup(resolver: Arc<TokioResolver>, hostname: String, port: u16) -> FamilyLookup {
    async move {
        let result = resolver.ipv6_lookup(hostname.as_str()).await.map(|lookup| {
            lookup
                .iter()
                .map(|aaaa| SocketAddr::from((aaaa.0, port)))
                .collect()
        });
        (AddressFamily::Inet6, result)
    }
    .boxed()
}
