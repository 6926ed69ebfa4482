//! hostdial public API
//!
//! Connect to a hostname by racing staggered TCP attempts across every
//! address it resolves to. Start with [`Dial`] or the [`connect`] shorthand.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # async fn demo() -> hostdial::Result<()> {
//! let stream = hostdial::Dial::new()
//!     .attempt_delay(Duration::from_millis(250))
//!     .timeout(Duration::from_secs(10))
//!     .connect("example.com", 443)
//!     .await?;
//! # drop(stream);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

// Re-export all public API components
pub use builder::*;

// Re-export important types from client package
pub use hostdial_client::{
    AddressFamilies, AddressFamily, AttemptFailure, BuildProtocol, CancelHandle,
    CandidateEndpoint, Clock, Connect, ConnectError, ConnectParams, ConnectStatsSnapshot,
    Connecting, GaiResolver, HickoryResolver, HostResolution, HostnameEndpoint, Name, RawStream,
    ResolutionReceiver, Resolve, ResolvedAddress, Result, StaticResolver, TcpConfig, TcpConnector,
    TokioClock,
};

use tokio::net::TcpStream;

/// Create a new builder with the system resolver and plain TCP streams
///
/// Shorthand for `Dial::new()`
#[must_use]
pub fn dial() -> Dial {
    Dial::new()
}

/// Connect to `hostname:port` with default parameters
///
/// Shorthand for `Dial::new().connect(hostname, port)`
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn connect(hostname: &str, port: u16) -> Connecting<TcpStream> {
    Dial::new().connect(hostname, port)
}
