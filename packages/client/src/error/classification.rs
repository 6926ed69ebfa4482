use std::io;

use super::types::{AttemptFailure, ConnectError};

impl ConnectError {
    /// Returns true if the operation was cancelled by the caller.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns true if the hostname resolved to no usable address.
    #[must_use]
    pub fn is_no_addresses(&self) -> bool {
        matches!(self, Self::NoAddresses { .. })
    }

    /// Returns true if every recorded attempt failed by timing out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::AllAttemptsFailed { failures, .. } => failures
                .iter()
                .all(|failure| failure.error.kind() == io::ErrorKind::TimedOut),
            _ => false,
        }
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidHostname { .. } | Self::InvalidParams(_))
    }

    /// Individual attempt failures, in the order they occurred.
    #[must_use]
    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            Self::AllAttemptsFailed { failures, .. } => failures,
            _ => &[],
        }
    }
}
