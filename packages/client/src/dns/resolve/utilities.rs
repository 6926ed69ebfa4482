//! Hostname normalization and validation helpers

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use crate::config::AddressFamily;

/// Maximum length of a full domain name.
const MAX_HOSTNAME_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// Check if a hostname is a valid IP address.
/// Used to skip DNS resolution for IP literals.
pub fn is_ip_address(hostname: &str) -> bool {
    hostname.parse::<IpAddr>().is_ok()
}

/// Normalize a hostname for resolution.
///
/// Bracketed IPv6 literals (`[::1]`) are unwrapped and a single trailing
/// root dot is dropped. IP literals pass through untouched.
///
/// # Errors
///
/// Returns a description of the problem if:
/// - the hostname is empty or only whitespace
/// - brackets surround something other than an IPv6 literal
/// - the hostname exceeds 253 characters
/// - a label is empty or longer than 63 characters
/// - the hostname contains whitespace, control characters or stray brackets
pub fn normalize_hostname(hostname: &str) -> Result<String, String> {
    let trimmed = hostname.trim();
    if trimmed.is_empty() {
        return Err("empty hostname".to_string());
    }

    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return match inner.parse::<Ipv6Addr>() {
            Ok(_) => Ok(inner.to_string()),
            Err(_) => Err("brackets must enclose an IPv6 address".to_string()),
        };
    }

    if is_ip_address(trimmed) {
        return Ok(trimmed.to_string());
    }

    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    validate_hostname(name)?;
    Ok(name.to_string())
}

/// Validate the structure of a hostname.
///
/// Only structurally broken names are rejected. Label contents beyond that
/// are the resolver's business: service and override names such as
/// `db_primary` or `_sip._tcp.example` are looked up as given.
///
/// # Errors
///
/// Returns a description of the first violated rule.
pub fn validate_hostname(hostname: &str) -> Result<(), String> {
    if hostname.is_empty() {
        return Err("empty hostname".to_string());
    }
    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "hostname too long (max {MAX_HOSTNAME_LEN} characters)"
        ));
    }
    if let Some(c) = hostname
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '[' | ']'))
    {
        return Err(format!("hostname contains invalid character {c:?}"));
    }

    for label in hostname.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(format!("invalid label length in {hostname:?}"));
        }
    }

    Ok(())
}

/// Order addresses so the preferred family comes first.
///
/// The sort is stable: resolver order is kept within each family.
pub fn sort_addresses_by_preference(addrs: &mut [SocketAddr], prefer: Option<AddressFamily>) {
    if let Some(preferred) = prefer {
        addrs.sort_by_key(|addr| AddressFamily::of(addr) != preferred);
    }
}
