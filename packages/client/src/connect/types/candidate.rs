//! Candidate endpoints
//!
//! A candidate is one directly connectable remote address plus the fixed
//! per-operation connection parameters. [`map_address`] derives candidates
//! from resolved addresses.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::{AddressFamily, ConnectParams};
use crate::dns::ResolvedAddress;

/// Family specific, single address connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEndpoint {
    /// Remote address, carrying the operation's destination port.
    pub addr: SocketAddr,
    /// Timeout for the one attempt made against this candidate.
    pub timeout: Duration,
    /// Local address to bind before connecting.
    pub bind_address: Option<SocketAddr>,
}

impl CandidateEndpoint {
    pub fn new(addr: SocketAddr, timeout: Duration, bind_address: Option<SocketAddr>) -> Self {
        Self {
            addr,
            timeout,
            bind_address,
        }
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.addr)
    }
}

impl fmt::Display for CandidateEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// Map a resolved address to a candidate endpoint.
///
/// Returns `None` for unsupported address kinds and for families not enabled
/// in `params`. The resolver's port is replaced by `port`, the destination
/// port of the operation.
pub fn map_address(
    address: &ResolvedAddress,
    port: u16,
    params: &ConnectParams,
) -> Option<CandidateEndpoint> {
    let family = address.family()?;
    if !params.families.contains(family) {
        return None;
    }

    let mut addr = address.socket_addr()?;
    addr.set_port(port);
    Some(CandidateEndpoint::new(addr, params.timeout, params.bind_address))
}
