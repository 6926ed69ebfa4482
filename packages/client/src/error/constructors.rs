use super::types::{AttemptFailure, ConnectError};

impl ConnectError {
    /// Create a NoAddresses error
    pub fn no_addresses(hostname: impl Into<String>) -> Self {
        Self::NoAddresses {
            hostname: hostname.into(),
        }
    }

    /// Create a Cancelled error
    pub fn cancelled(hostname: impl Into<String>, port: u16) -> Self {
        Self::Cancelled {
            hostname: hostname.into(),
            port,
        }
    }

    /// Create an InvalidHostname error
    pub fn invalid_hostname(hostname: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHostname {
            hostname: hostname.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidParams error
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    /// Build the terminal error for an exhausted operation.
    ///
    /// An empty failure list means no address was ever attempted, which is
    /// reported as [`ConnectError::NoAddresses`].
    pub fn exhausted(hostname: impl Into<String>, failures: Vec<AttemptFailure>) -> Self {
        let hostname = hostname.into();
        if failures.is_empty() {
            Self::NoAddresses { hostname }
        } else {
            Self::AllAttemptsFailed { hostname, failures }
        }
    }
}
