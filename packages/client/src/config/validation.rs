//! Configuration defaults and validation

use std::time::Duration;

use super::ConnectParams;
use crate::error::ConnectError;

/// Default values shared by the configuration types.
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Per-attempt connect timeout.
    pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Spacing between attempt starts.
    pub const ATTEMPT_DELAY: Duration = Duration::from_millis(300);
    /// TCP keepalive idle time.
    pub const KEEPALIVE: Duration = Duration::from_secs(60);
}

/// Validate connect parameters.
///
/// # Errors
///
/// Returns `ConnectError::InvalidParams` if:
/// - the per-attempt timeout is zero
/// - no address family is enabled
pub fn validate_params(params: &ConnectParams) -> crate::Result<()> {
    if params.timeout.is_zero() {
        return Err(ConnectError::invalid_params(
            "attempt timeout must be greater than zero",
        ));
    }
    if params.families.is_empty() {
        return Err(ConnectError::invalid_params(
            "at least one address family must be enabled",
        ));
    }
    Ok(())
}
