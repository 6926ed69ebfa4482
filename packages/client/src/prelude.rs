//! hostdial prelude
//!
//! The types end users need to start, configure, observe and cancel
//! hostname connect operations.

// Entry point
pub use crate::endpoint::HostnameEndpoint;
pub use crate::connect::{CancelHandle, Connecting};

// Configuration
pub use crate::config::{AddressFamilies, AddressFamily, ConnectParams, TcpConfig};

// Error types
pub use crate::error::{AttemptFailure, ConnectError, Result};

// Collaborators
pub use crate::clock::{Clock, TokioClock};
pub use crate::connect::{BuildProtocol, CandidateEndpoint, Connect, RawStream, TcpConnector};
pub use crate::dns::{
    GaiResolver, HickoryResolver, HostResolution, Name, ResolutionReceiver, Resolve,
    ResolvedAddress, StaticResolver,
};

// Telemetry types
pub use crate::telemetry::{ConnectStats, ConnectStatsSnapshot};
