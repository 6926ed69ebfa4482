use std::fmt;
use std::io;
use std::net::SocketAddr;

/// A Result alias where the Err case is [`ConnectError`].
pub type Result<T> = std::result::Result<T, ConnectError>;

/// One failed connection attempt, kept in the order failures were observed.
#[derive(Debug)]
pub struct AttemptFailure {
    /// Remote address the attempt targeted.
    pub endpoint: SocketAddr,
    /// Error the connector reported.
    pub error: io::Error,
}

impl AttemptFailure {
    pub fn new(endpoint: SocketAddr, error: io::Error) -> Self {
        Self { endpoint, error }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.error)
    }
}

/// Terminal error of a hostname connect operation.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("no usable addresses resolved for hostname {hostname}")]
    NoAddresses { hostname: String },

    #[error(
        "all {} connection attempts to {hostname} failed (last: {})",
        failures.len(),
        last_failure(failures)
    )]
    AllAttemptsFailed {
        hostname: String,
        failures: Vec<AttemptFailure>,
    },

    #[error("connecting to {hostname}:{port} was cancelled")]
    Cancelled { hostname: String, port: u16 },

    #[error("invalid hostname {hostname:?}: {reason}")]
    InvalidHostname { hostname: String, reason: String },

    #[error("invalid connect parameters: {0}")]
    InvalidParams(String),

    #[error("connection task terminated without delivering a result")]
    Terminated,
}

fn last_failure(failures: &[AttemptFailure]) -> String {
    failures
        .last()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}
