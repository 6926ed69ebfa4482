//! Core DNS types for hostname resolution
//!
//! Defines the validated hostname [`Name`] handed to resolvers and the
//! [`ResolvedAddress`] values they deliver back.

use std::fmt;
use std::net::{IpAddr, SocketAddr, SocketAddrV4, SocketAddrV6};

use super::utilities::normalize_hostname;
use crate::config::AddressFamily;
use crate::error::ConnectError;

/// DNS name representation for hostname resolution.
///
/// Always normalized: surrounding brackets of an IPv6 literal and a single
/// trailing root dot are removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Validate and normalize a caller supplied hostname.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::InvalidHostname`] when the name is empty, too
    /// long, or has a malformed label.
    pub fn parse(hostname: &str) -> Result<Self, ConnectError> {
        normalize_hostname(hostname)
            .map(Name)
            .map_err(|reason| ConnectError::invalid_hostname(hostname, reason))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address this name denotes when it is an IP literal.
    pub fn ip_literal(&self) -> Option<IpAddr> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An address delivered by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAddress {
    Inet(SocketAddrV4),
    Inet6(SocketAddrV6),
    /// Any other kind of address a resolver may produce, e.g. a unix socket
    /// path. Never connected to.
    Unsupported { family: String },
}

impl ResolvedAddress {
    /// Family of the address, `None` when unsupported.
    pub fn family(&self) -> Option<AddressFamily> {
        match self {
            Self::Inet(_) => Some(AddressFamily::Inet),
            Self::Inet6(_) => Some(AddressFamily::Inet6),
            Self::Unsupported { .. } => None,
        }
    }

    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            Self::Inet(addr) => Some(SocketAddr::V4(*addr)),
            Self::Inet6(addr) => Some(SocketAddr::V6(*addr)),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<SocketAddr> for ResolvedAddress {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => Self::Inet(v4),
            SocketAddr::V6(v6) => Self::Inet6(v6),
        }
    }
}

impl From<SocketAddrV4> for ResolvedAddress {
    fn from(addr: SocketAddrV4) -> Self {
        Self::Inet(addr)
    }
}

impl From<SocketAddrV6> for ResolvedAddress {
    fn from(addr: SocketAddrV6) -> Self {
        Self::Inet6(addr)
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inet(addr) => write!(f, "{addr}"),
            Self::Inet6(addr) => write!(f, "{addr}"),
            Self::Unsupported { family } => write!(f, "<unsupported {family} address>"),
        }
    }
}
